use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::{dto::file_dto::FileDTO, error::ApplicationError},
    domain::models::{
        file::{FileDocument, FileList},
        query::FileQuery,
    },
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create_file(&self, file: FileDTO) -> Result<FileDocument, ApplicationError>;
    async fn get_file(&self, file_id: Uuid) -> Result<FileDocument, ApplicationError>;

    /// Runs `query` and returns the matching page plus the total number of
    /// matches ignoring the limit.
    async fn list_files(&self, query: &FileQuery) -> Result<FileList, ApplicationError>;

    async fn update_file(&self, file: FileDTO) -> Result<FileDocument, ApplicationError>;
    async fn delete_file(&self, file_id: Uuid) -> Result<FileDocument, ApplicationError>;
}
