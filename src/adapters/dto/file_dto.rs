use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{
    action::FileAction,
    file::{FileDocument, FileList, FileType},
};

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub extension: String,
    pub size: u64,
    pub url: String,
    pub owner: Uuid,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub users: Vec<String>,
    #[serde(rename = "bucketFileId")]
    pub bucket_file_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<FileDocument> for FileResponse {
    fn from(file: FileDocument) -> Self {
        Self {
            id: file.id,
            name: file.name,
            file_type: file.file_type,
            extension: file.extension,
            size: file.size,
            url: file.url,
            owner: file.owner,
            account_id: file.account_id,
            users: file.users,
            bucket_file_id: file.bucket_file_id,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub total: u64,
    pub documents: Vec<FileResponse>,
}

impl From<FileList> for FileListResponse {
    fn from(list: FileList) -> Self {
        Self {
            total: list.total,
            documents: list.documents.into_iter().map(FileResponse::from).collect(),
        }
    }
}

/// Query string of the listing routes. `types` is a comma separated list of
/// stored types and is ignored on the typed route.
#[derive(Debug, Deserialize, Default)]
pub struct ListFilesQuery {
    pub types: Option<String>,
    pub query: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct FileActionRequest {
    pub action: FileAction,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedFileResponse {
    pub id: Uuid,
    pub deleted: bool,
}
