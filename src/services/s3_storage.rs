use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::settings::S3Settings,
        models::file::{FileData, StoredBlob},
    },
    services::{error::StorageError, generate_blob_key},
};

pub struct S3StorageService {
    client: Client,
    bucket_name: String,
}

impl S3StorageService {
    pub fn new(settings: S3Settings) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id,
            settings.secret_access_key,
            None,
            None,
            "storeit-settings",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region))
            .credentials_provider(credentials);

        // S3-compatible stores (MinIO, R2, Supabase) need path-style URLs.
        if let Some(endpoint) = settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket_name: settings.bucket_name,
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload(&self, file_data: FileData) -> Result<StoredBlob, ApplicationError> {
        let key = generate_blob_key(&file_data.filename);
        let size = file_data.size();

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .content_type(&file_data.mime_type)
            .body(ByteStream::from(file_data.content))
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Upload failed: {}", e)))?;

        Ok(StoredBlob {
            blob_id: key,
            size,
            mime_type: file_data.mime_type,
            filename: file_data.filename,
            provider: "s3".to_string(),
        })
    }

    async fn download(&self, blob_id: &str) -> Result<Vec<u8>, ApplicationError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(blob_id)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    StorageError::NotFound(blob_id.to_string())
                } else {
                    StorageError::ProviderError(format!("Download failed: {}", service_error))
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn delete(&self, blob_id: &str) -> Result<(), ApplicationError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(blob_id)
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Delete failed: {}", e)))?;

        Ok(())
    }
}
