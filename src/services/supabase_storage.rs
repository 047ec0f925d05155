use async_trait::async_trait;
use reqwest::{multipart, Client};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::settings::SupabaseSettings,
        models::file::{FileData, StoredBlob},
    },
    services::{error::StorageError, generate_blob_key},
};

pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorageService {
    pub fn new(settings: SupabaseSettings) -> Self {
        Self {
            client: Client::new(),
            storage_url: settings.storage_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            bucket_name: settings.bucket_name,
        }
    }

    fn object_url(&self, blob_id: &str) -> String {
        format!(
            "{}/object/{}/{}",
            self.storage_url, self.bucket_name, blob_id
        )
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    async fn upload(&self, file_data: FileData) -> Result<StoredBlob, ApplicationError> {
        let blob_id = generate_blob_key(&file_data.filename);
        let size = file_data.size();

        let file_part = multipart::Part::bytes(file_data.content)
            .file_name(file_data.filename.clone())
            .mime_str(&file_data.mime_type)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let form = multipart::Form::new().part("file", file_part);

        let response = self
            .client
            .post(self.object_url(&blob_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                StorageError::ProviderError(format!("Upload failed: {}", error_text)).into(),
            );
        }

        Ok(StoredBlob {
            blob_id,
            size,
            mime_type: file_data.mime_type,
            filename: file_data.filename,
            provider: "supabase".to_string(),
        })
    }

    async fn download(&self, blob_id: &str) -> Result<Vec<u8>, ApplicationError> {
        let response = self
            .client
            .get(self.object_url(blob_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::NotFound(blob_id.to_string()).into());
        }

        if !response.status().is_success() {
            return Err(StorageError::ProviderError(format!(
                "Download failed with status: {}",
                response.status()
            ))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, blob_id: &str) -> Result<(), ApplicationError> {
        let response = self
            .client
            .delete(self.object_url(blob_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::NotFound(blob_id.to_string()).into());
        }

        if !response.status().is_success() {
            return Err(StorageError::ProviderError(format!(
                "Delete failed with status: {}",
                response.status()
            ))
            .into());
        }

        Ok(())
    }
}
