use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        dto::file_dto::FileDTO,
        error::ApplicationError,
        repositories::{
            file_repository::FileRepository, route_cache_repository::RouteCacheRepository,
        },
        services::StorageService,
    },
    domain::models::{
        action::FileAction,
        file::{classify, renamed, FileData, FileDocument, FileList, FileType},
        query::{FileQuery, Sort},
        usage::TotalSpace,
        user::{is_valid_email, normalize_email, User},
    },
};

const DASHBOARD_RECENT_FILES: u32 = 10;

/// Listing refinements taken from the route.
#[derive(Debug, Clone, Default)]
pub struct ListFiles {
    pub types: Vec<FileType>,
    pub search_text: String,
    pub sort: Sort,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Updated(FileDocument),
    Deleted(Uuid),
}

pub struct FileUseCase {
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn StorageService>,
    route_cache: Arc<dyn RouteCacheRepository>,
    public_url: String,
    max_upload_size: u64,
    storage_quota: u64,
}

impl FileUseCase {
    pub fn new(
        files: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageService>,
        route_cache: Arc<dyn RouteCacheRepository>,
        public_url: String,
        max_upload_size: u64,
        storage_quota: u64,
    ) -> Self {
        Self {
            files,
            storage,
            route_cache,
            public_url,
            max_upload_size,
            storage_quota,
        }
    }

    /// Stores the blob, then its document. If the document cannot be created
    /// the blob is deleted again so no unreferenced content is left behind.
    pub async fn upload(
        &self,
        user: &User,
        file_data: FileData,
        path: &str,
    ) -> Result<FileDocument, ApplicationError> {
        if file_data.filename.trim().is_empty() {
            return Err(ApplicationError::BadRequest("Missing file name".to_string()));
        }
        if file_data.size() > self.max_upload_size {
            return Err(ApplicationError::PayloadTooLarge);
        }

        let blob = self.storage.upload(file_data).await?;
        info!(
            "Stored blob {} ({} bytes) via {}",
            blob.blob_id, blob.size, blob.provider
        );

        let (extension, file_type) = classify(&blob.filename);
        let id = Uuid::new_v4();
        let now = Utc::now();
        let file_dto = FileDTO {
            id,
            name: Some(blob.filename.clone()),
            file_type: Some(file_type),
            extension: Some(extension),
            size: Some(blob.size),
            url: Some(self.content_url(id)),
            owner: Some(user.id),
            account_id: Some(user.account_id.clone()),
            users: Some(Vec::new()),
            bucket_file_id: Some(blob.blob_id.clone()),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let file = match self.files.create_file(file_dto).await {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to create file document: {:?}", e);
                if let Err(cleanup) = self.storage.delete(&blob.blob_id).await {
                    error!(
                        orphaned_blob = %blob.blob_id,
                        "Failed to delete blob after document creation failure: {:?}",
                        cleanup
                    );
                }
                return Err(e);
            }
        };

        self.revalidate(path).await;
        Ok(file)
    }

    pub async fn list(&self, user: &User, params: ListFiles) -> Result<FileList, ApplicationError> {
        let query = FileQuery::listing(
            user.id,
            &user.email,
            &params.types,
            &params.search_text,
            params.sort,
            params.limit,
        );
        self.files.list_files(&query).await
    }

    /// Fetches a file the user can see. Files that are neither owned by nor
    /// shared with the user are reported as missing.
    pub async fn get_visible(
        &self,
        user: &User,
        file_id: Uuid,
    ) -> Result<FileDocument, ApplicationError> {
        let file = self.files.get_file(file_id).await?;
        if file.is_owned_by(user.id) || file.is_shared_with(&user.email) {
            Ok(file)
        } else {
            Err(ApplicationError::NotFound)
        }
    }

    pub async fn download(
        &self,
        user: &User,
        file_id: Uuid,
    ) -> Result<(FileDocument, Vec<u8>), ApplicationError> {
        let file = self.get_visible(user, file_id).await?;
        let content = self.storage.download(&file.bucket_file_id).await?;
        Ok((file, content))
    }

    pub async fn apply(
        &self,
        user: &User,
        file_id: Uuid,
        action: FileAction,
        path: &str,
    ) -> Result<ActionOutcome, ApplicationError> {
        let file = self.get_visible(user, file_id).await?;
        if !file.is_owned_by(user.id) {
            warn!(
                "User {} attempted to {} file {} they do not own",
                user.id,
                action.name(),
                file_id
            );
            return Err(ApplicationError::Forbidden);
        }

        let outcome = match action {
            FileAction::Rename { name } => {
                if name.trim().is_empty() {
                    return Err(ApplicationError::BadRequest("Name cannot be empty".to_string()));
                }
                let mut update = FileDTO::for_update(file.id);
                update.name = Some(renamed(&name, &file.extension));
                ActionOutcome::Updated(self.files.update_file(update).await?)
            }
            FileAction::Share { emails } => {
                let mut users = file.users.clone();
                for email in emails {
                    let email = normalize_email(&email);
                    if !is_valid_email(&email) {
                        return Err(ApplicationError::BadRequest(format!(
                            "Invalid email address: {}",
                            email
                        )));
                    }
                    if !users.contains(&email) {
                        users.push(email);
                    }
                }
                let mut update = FileDTO::for_update(file.id);
                update.users = Some(users);
                ActionOutcome::Updated(self.files.update_file(update).await?)
            }
            FileAction::Unshare { email } => {
                let email = normalize_email(&email);
                let mut update = FileDTO::for_update(file.id);
                update.users = Some(file.users.into_iter().filter(|u| *u != email).collect());
                ActionOutcome::Updated(self.files.update_file(update).await?)
            }
            FileAction::Delete => {
                let deleted = self.files.delete_file(file.id).await?;
                self.storage.delete(&deleted.bucket_file_id).await?;
                ActionOutcome::Deleted(deleted.id)
            }
        };

        self.revalidate(path).await;
        Ok(outcome)
    }

    pub async fn total_space_used(&self, user: &User) -> Result<TotalSpace, ApplicationError> {
        let owned = self.files.list_files(&FileQuery::owned_by(user.id)).await?;
        Ok(TotalSpace::from_files(self.storage_quota, &owned.documents))
    }

    /// Recent files and usage, fetched concurrently.
    pub async fn dashboard(&self, user: &User) -> Result<(FileList, TotalSpace), ApplicationError> {
        let recent = ListFiles {
            limit: Some(DASHBOARD_RECENT_FILES),
            ..Default::default()
        };
        tokio::try_join!(self.list(user, recent), self.total_space_used(user))
    }

    pub async fn route_version(&self, path: &str) -> Result<u64, ApplicationError> {
        self.route_cache.version(path).await
    }

    fn content_url(&self, file_id: Uuid) -> String {
        format!("{}/api/v1/files/{}/content", self.public_url, file_id)
    }

    /// The write already happened; a failed refresh signal only leaves the
    /// client on a stale listing.
    async fn revalidate(&self, path: &str) {
        if path.is_empty() {
            return;
        }
        if let Err(e) = self.route_cache.revalidate(path).await {
            warn!("Failed to revalidate route {}: {:?}", path, e);
        }
    }
}
