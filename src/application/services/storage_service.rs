use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::file::{FileData, StoredBlob},
};

#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, file_data: FileData) -> Result<StoredBlob, ApplicationError>;
    async fn download(&self, blob_id: &str) -> Result<Vec<u8>, ApplicationError>;
    async fn delete(&self, blob_id: &str) -> Result<(), ApplicationError>;
}
