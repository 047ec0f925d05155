use async_trait::async_trait;
use sqlx::{query_as, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    application::{
        dto::file_dto::FileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::{
        file::{FileDocument, FileList},
        query::{FileQuery, Filter, SortDirection, SortField},
    },
};

pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    fn sort_column(field: SortField) -> &'static str {
        match field {
            SortField::CreatedAt => "created_at",
            SortField::Name => "name",
            SortField::Size => "size",
        }
    }

    /// `%needle%` with LIKE wildcards in the needle escaped.
    fn like_pattern(needle: &str) -> String {
        let escaped = needle
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }

    pub(crate) fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
        match filter {
            Filter::OwnerIn(owners) => {
                builder.push("owner = ANY(");
                builder.push_bind(owners.clone());
                builder.push(")");
            }
            Filter::SharedWith(email) => {
                builder.push_bind(email.clone());
                builder.push(" = ANY(users)");
            }
            Filter::TypeIn(types) => {
                let types: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
                builder.push("file_type = ANY(");
                builder.push_bind(types);
                builder.push(")");
            }
            Filter::NameContains(needle) => {
                builder.push("name ILIKE ");
                builder.push_bind(Self::like_pattern(needle));
            }
            Filter::And(filters) | Filter::Or(filters) if filters.is_empty() => {
                builder.push(if matches!(filter, Filter::And(_)) {
                    "TRUE"
                } else {
                    "FALSE"
                });
            }
            Filter::And(filters) | Filter::Or(filters) => {
                let joiner = if matches!(filter, Filter::And(_)) {
                    " AND "
                } else {
                    " OR "
                };
                builder.push("(");
                for (i, inner) in filters.iter().enumerate() {
                    if i > 0 {
                        builder.push(joiner);
                    }
                    Self::push_filter(builder, inner);
                }
                builder.push(")");
            }
        }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<FileDocument, ApplicationError> {
        let mut file = file;
        file.sanitize();

        let query = r#"
            INSERT INTO application.files (
                id, name, file_type, extension, size, url, owner,
                account_id, users, bucket_file_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
        "#;

        let new_file: FileDocument = file.into();

        let created: FileDTO = query_as::<_, FileDTO>(query)
            .bind(new_file.id)
            .bind(&new_file.name)
            .bind(new_file.file_type.as_str())
            .bind(&new_file.extension)
            .bind(new_file.size as i64)
            .bind(&new_file.url)
            .bind(new_file.owner)
            .bind(&new_file.account_id)
            .bind(&new_file.users)
            .bind(&new_file.bucket_file_id)
            .bind(new_file.created_at)
            .bind(new_file.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    async fn get_file(&self, file_id: Uuid) -> Result<FileDocument, ApplicationError> {
        let query = "SELECT * FROM application.files WHERE id = $1";

        let fetched: Option<FileDTO> = query_as::<_, FileDTO>(query)
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        fetched.map(Into::into).ok_or(ApplicationError::NotFound)
    }

    async fn list_files(&self, query: &FileQuery) -> Result<FileList, ApplicationError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM application.files WHERE ");
        Self::push_filter(&mut count, &query.filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM application.files WHERE ");
        Self::push_filter(&mut select, &query.filter);
        select.push(" ORDER BY ");
        select.push(Self::sort_column(query.sort.field));
        select.push(match query.sort.direction {
            SortDirection::Asc => " ASC",
            SortDirection::Desc => " DESC",
        });
        select.push(", id");
        if let Some(limit) = query.limit {
            select.push(" LIMIT ");
            select.push_bind(limit as i64);
        }

        let rows: Vec<FileDTO> = select
            .build_query_as::<FileDTO>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(FileList {
            documents: rows.into_iter().map(Into::into).collect(),
            total: total.max(0) as u64,
        })
    }

    async fn update_file(&self, file: FileDTO) -> Result<FileDocument, ApplicationError> {
        let mut file = file;
        file.sanitize();

        if file.is_empty_update() {
            return self.get_file(file.id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE application.files SET ");
        let mut separated = builder.separated(", ");

        if let Some(name) = &file.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name.clone());
        }
        if let Some(file_type) = file.file_type {
            separated.push("file_type = ");
            separated.push_bind_unseparated(file_type.as_str());
        }
        if let Some(extension) = &file.extension {
            separated.push("extension = ");
            separated.push_bind_unseparated(extension.clone());
        }
        if let Some(size) = file.size {
            separated.push("size = ");
            separated.push_bind_unseparated(size as i64);
        }
        if let Some(url) = &file.url {
            separated.push("url = ");
            separated.push_bind_unseparated(url.clone());
        }
        if let Some(owner) = file.owner {
            separated.push("owner = ");
            separated.push_bind_unseparated(owner);
        }
        if let Some(account_id) = &file.account_id {
            separated.push("account_id = ");
            separated.push_bind_unseparated(account_id.clone());
        }
        if let Some(users) = &file.users {
            separated.push("users = ");
            separated.push_bind_unseparated(users.clone());
        }
        if let Some(bucket_file_id) = &file.bucket_file_id {
            separated.push("bucket_file_id = ");
            separated.push_bind_unseparated(bucket_file_id.clone());
        }
        separated.push("updated_at = NOW()");

        builder.push(" WHERE id = ");
        builder.push_bind(file.id);
        builder.push(" RETURNING *");

        let updated: Option<FileDTO> = builder
            .build_query_as::<FileDTO>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        updated.map(Into::into).ok_or(ApplicationError::NotFound)
    }

    async fn delete_file(&self, file_id: Uuid) -> Result<FileDocument, ApplicationError> {
        let query = "DELETE FROM application.files WHERE id = $1 RETURNING *";

        let deleted: Option<FileDTO> = query_as::<_, FileDTO>(query)
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        deleted.map(Into::into).ok_or(ApplicationError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{file::FileType, query::Sort};

    #[test]
    fn compiles_listing_filter() {
        let user_id = Uuid::new_v4();
        let query = FileQuery::listing(
            user_id,
            "ana@example.com",
            &[FileType::Image],
            "50%_off",
            Sort::default(),
            None,
        );
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM application.files WHERE ");
        PgFileRepository::push_filter(&mut builder, &query.filter);

        assert_eq!(
            builder.sql(),
            "SELECT * FROM application.files WHERE ((owner = ANY($1) OR $2 = ANY(users)) \
             AND file_type = ANY($3) AND name ILIKE $4)"
        );
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(PgFileRepository::like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn empty_groups_compile_to_constants() {
        let mut builder = QueryBuilder::<Postgres>::new("");
        PgFileRepository::push_filter(
            &mut builder,
            &Filter::And(vec![Filter::Or(vec![]), Filter::And(vec![])]),
        );
        assert_eq!(builder.sql(), "(FALSE AND TRUE)");
    }
}
