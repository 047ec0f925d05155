use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    adapters::{
        dto::file_dto::{
            DeletedFileResponse, FileActionRequest, FileListResponse, FileResponse,
            ListFilesQuery,
        },
        extractors::CurrentUser,
    },
    application::{
        error::ApplicationError,
        use_cases::{files::ActionOutcome, FileUseCase, ListFiles},
    },
    domain::models::{
        file::{FileData, FileType},
        query::Sort,
    },
};

pub struct FileController;

impl FileController {
    /// GET /api/v1/files
    pub async fn list_files(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
        Query(query): Query<ListFilesQuery>,
    ) -> Result<Json<FileListResponse>, ApplicationError> {
        let types = match query.types.as_deref() {
            Some(types) => Self::parse_types(types)?,
            None => Vec::new(),
        };
        let list = files.list(&user, Self::listing(types, query)).await?;
        Ok(Json(list.into()))
    }

    /// GET /api/v1/files/types/{type}
    pub async fn list_files_by_type(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
        Path(segment): Path<String>,
        Query(query): Query<ListFilesQuery>,
    ) -> Result<Json<FileListResponse>, ApplicationError> {
        let types = FileType::for_route(&segment);
        let list = files.list(&user, Self::listing(types, query)).await?;
        Ok(Json(list.into()))
    }

    /// POST /api/v1/files
    ///
    /// Multipart body: `file` (required) and `path`, the page to revalidate.
    pub async fn upload_file(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let mut file_data: Option<FileData> = None;
        let mut path = String::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let mime_type = field
                        .content_type()
                        .map(str::to_string)
                        .unwrap_or_else(|| {
                            mime_guess::from_path(&filename)
                                .first_or_octet_stream()
                                .to_string()
                        });
                    let bytes = field.bytes().await.map_err(|e| {
                        warn!("Cannot read file bytes: {}", e);
                        ApplicationError::BadRequest("Invalid file data".to_string())
                    })?;

                    file_data = Some(FileData::new(bytes.to_vec(), filename, mime_type));
                }
                "path" => {
                    path = field.text().await.map_err(|e| {
                        warn!("Invalid path field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?;
                }
                _ => {}
            }
        }

        let file_data = file_data.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field".to_string())
        })?;

        let file = files.upload(&user, file_data, &path).await?;
        info!("User {} uploaded file {}", user.id, file.id);

        Ok((StatusCode::CREATED, Json(FileResponse::from(file))))
    }

    /// GET /api/v1/files/{file_id}/content
    pub async fn download_file(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
        Path(file_id): Path<Uuid>,
    ) -> Result<Response, ApplicationError> {
        let (file, content) = files.download(&user, file_id).await?;

        let content_type = mime_guess::from_path(&file.name)
            .first_or_octet_stream()
            .to_string();
        let disposition = format!(
            "attachment; filename=\"{}\"",
            file.name.replace(['"', '\\'], "_")
        );

        Ok((
            [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            content,
        )
            .into_response())
    }

    /// POST /api/v1/files/{file_id}/actions
    pub async fn apply_action(
        State(files): State<Arc<FileUseCase>>,
        CurrentUser(user): CurrentUser,
        Path(file_id): Path<Uuid>,
        Json(body): Json<FileActionRequest>,
    ) -> Result<Response, ApplicationError> {
        let action_name = body.action.name();
        let outcome = files.apply(&user, file_id, body.action, &body.path).await?;
        info!("User {} applied {} to file {}", user.id, action_name, file_id);

        Ok(match outcome {
            ActionOutcome::Updated(file) => Json(FileResponse::from(file)).into_response(),
            ActionOutcome::Deleted(id) => {
                Json(DeletedFileResponse { id, deleted: true }).into_response()
            }
        })
    }

    fn parse_types(types: &str) -> Result<Vec<FileType>, ApplicationError> {
        types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                FileType::parse(t)
                    .ok_or_else(|| ApplicationError::BadRequest(format!("Unknown file type: {}", t)))
            })
            .collect()
    }

    fn listing(types: Vec<FileType>, query: ListFilesQuery) -> ListFiles {
        ListFiles {
            types,
            search_text: query.query.unwrap_or_default(),
            sort: query.sort.as_deref().map(Sort::parse).unwrap_or_default(),
            limit: query.limit,
        }
    }
}
