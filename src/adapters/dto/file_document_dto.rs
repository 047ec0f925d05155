use sqlx::{postgres::PgRow, FromRow, Row};

use crate::{application::dto::file_dto::FileDTO, domain::models::file::FileType};

impl FromRow<'_, PgRow> for FileDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let size: i64 = row.try_get("size")?;
        let file_type: String = row.try_get("file_type")?;

        Ok(FileDTO {
            id: row.try_get("id")?,
            name: Some(row.try_get("name")?),
            file_type: Some(FileType::parse(&file_type).unwrap_or(FileType::Other)),
            extension: Some(row.try_get("extension")?),
            size: Some(size.max(0) as u64),
            url: Some(row.try_get("url")?),
            owner: Some(row.try_get("owner")?),
            account_id: Some(row.try_get("account_id")?),
            users: Some(row.try_get("users")?),
            bucket_file_id: Some(row.try_get("bucket_file_id")?),
            created_at: Some(row.try_get("created_at")?),
            updated_at: Some(row.try_get("updated_at")?),
        })
    }
}

impl FileDTO {
    pub fn sanitize(&mut self) {
        if let Some(size) = self.size {
            self.size = Some(std::cmp::min(size, i64::MAX as u64));
        }
        if let Some(ref mut name) = self.name {
            *name = name.trim().to_string();
        }
    }
}
