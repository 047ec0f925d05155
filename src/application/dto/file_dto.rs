use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::file::{FileDocument, FileType};

/// Partial file document. Creation fills every field; updates set only the
/// fields that change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileDTO {
    pub id: Uuid,
    pub name: Option<String>,
    pub file_type: Option<FileType>,
    pub extension: Option<String>,
    pub size: Option<u64>,
    pub url: Option<String>,
    pub owner: Option<Uuid>,
    pub account_id: Option<String>,
    pub users: Option<Vec<String>>,
    pub bucket_file_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FileDTO {
    pub fn for_update(id: Uuid) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn is_empty_update(&self) -> bool {
        self.name.is_none()
            && self.file_type.is_none()
            && self.extension.is_none()
            && self.size.is_none()
            && self.url.is_none()
            && self.owner.is_none()
            && self.account_id.is_none()
            && self.users.is_none()
            && self.bucket_file_id.is_none()
    }
}

impl From<FileDocument> for FileDTO {
    fn from(value: FileDocument) -> Self {
        FileDTO {
            id: value.id,
            name: Some(value.name),
            file_type: Some(value.file_type),
            extension: Some(value.extension),
            size: Some(value.size),
            url: Some(value.url),
            owner: Some(value.owner),
            account_id: Some(value.account_id),
            users: Some(value.users),
            bucket_file_id: Some(value.bucket_file_id),
            created_at: Some(value.created_at),
            updated_at: Some(value.updated_at),
        }
    }
}

impl From<FileDTO> for FileDocument {
    fn from(value: FileDTO) -> Self {
        let created_at = value.created_at.unwrap_or_else(Utc::now);
        FileDocument {
            id: value.id,
            name: value.name.unwrap_or_default(),
            file_type: value.file_type.unwrap_or(FileType::Other),
            extension: value.extension.unwrap_or_default(),
            size: value.size.unwrap_or(0),
            url: value.url.unwrap_or_default(),
            owner: value.owner.unwrap_or_default(),
            account_id: value.account_id.unwrap_or_default(),
            users: value.users.unwrap_or_default(),
            bucket_file_id: value.bucket_file_id.unwrap_or_default(),
            created_at,
            updated_at: value.updated_at.unwrap_or(created_at),
        }
    }
}
