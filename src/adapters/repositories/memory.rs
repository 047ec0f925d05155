//! In-process stand-ins for the backend traits, used by the test suites.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    application::{
        dto::{file_dto::FileDTO, user_dto::UserDTO},
        error::ApplicationError,
        repositories::{
            file_repository::FileRepository, route_cache_repository::RouteCacheRepository,
            user_repository::UserRepository,
        },
        services::{AccountService, StorageService},
    },
    domain::models::{
        file::{FileData, FileDocument, FileList, StoredBlob},
        query::{FileQuery, Filter, SortDirection, SortField},
        session::{attempts_exhausted, passcode_matches, Account, Session},
        user::{normalize_email, User},
    },
};

pub fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        full_name: "Test User".to_string(),
        email: normalize_email(email),
        avatar: String::new(),
        account_id: Uuid::new_v4().to_string(),
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    miss_next_lookup: AtomicBool,
}

impl MemoryUserRepository {
    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    /// The next email lookup answers `None`, as a concurrent sign-up
    /// that has not committed yet would see it.
    pub fn miss_next_lookup(&self) {
        self.miss_next_lookup.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        let user: User = user.into();
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(ApplicationError::DatabaseError("duplicate email".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError> {
        if self.miss_next_lookup.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<User>, ApplicationError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.account_id == account_id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryFileRepository {
    files: Mutex<Vec<FileDocument>>,
    fail_creates: AtomicBool,
}

impl MemoryFileRepository {
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    fn matches(filter: &Filter, file: &FileDocument) -> bool {
        match filter {
            Filter::OwnerIn(owners) => owners.contains(&file.owner),
            Filter::SharedWith(email) => file.users.contains(email),
            Filter::TypeIn(types) => types.contains(&file.file_type),
            Filter::NameContains(needle) => {
                file.name.to_lowercase().contains(&needle.to_lowercase())
            }
            Filter::And(filters) => filters.iter().all(|f| Self::matches(f, file)),
            Filter::Or(filters) => filters.iter().any(|f| Self::matches(f, file)),
        }
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<FileDocument, ApplicationError> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError("insert rejected".to_string()));
        }
        let file: FileDocument = file.into();
        self.files.lock().unwrap().push(file.clone());
        Ok(file)
    }

    async fn get_file(&self, file_id: Uuid) -> Result<FileDocument, ApplicationError> {
        let files = self.files.lock().unwrap();
        files
            .iter()
            .find(|f| f.id == file_id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn list_files(&self, query: &FileQuery) -> Result<FileList, ApplicationError> {
        let files = self.files.lock().unwrap();
        let mut matching: Vec<FileDocument> = files
            .iter()
            .filter(|f| Self::matches(&query.filter, f))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = match query.sort.field {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::Name => a.name.cmp(&b.name),
                SortField::Size => a.size.cmp(&b.size),
            };
            match query.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = matching.len() as u64;
        if let Some(limit) = query.limit {
            matching.truncate(limit as usize);
        }
        Ok(FileList {
            documents: matching,
            total,
        })
    }

    async fn update_file(&self, file: FileDTO) -> Result<FileDocument, ApplicationError> {
        let mut files = self.files.lock().unwrap();
        let stored = files
            .iter_mut()
            .find(|f| f.id == file.id)
            .ok_or(ApplicationError::NotFound)?;
        if let Some(name) = file.name {
            stored.name = name;
        }
        if let Some(users) = file.users {
            stored.users = users;
        }
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_file(&self, file_id: Uuid) -> Result<FileDocument, ApplicationError> {
        let mut files = self.files.lock().unwrap();
        let index = files
            .iter()
            .position(|f| f.id == file_id)
            .ok_or(ApplicationError::NotFound)?;
        Ok(files.remove(index))
    }
}

#[derive(Default)]
pub struct MemoryStorageService {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorageService {
    pub fn contains(&self, blob_id: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(blob_id)
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageService for MemoryStorageService {
    async fn upload(&self, file_data: FileData) -> Result<StoredBlob, ApplicationError> {
        let blob_id = Uuid::new_v4().to_string();
        let size = file_data.size();
        self.blobs
            .lock()
            .unwrap()
            .insert(blob_id.clone(), file_data.content);
        Ok(StoredBlob {
            blob_id,
            size,
            mime_type: file_data.mime_type,
            filename: file_data.filename,
            provider: "memory".to_string(),
        })
    }

    async fn download(&self, blob_id: &str) -> Result<Vec<u8>, ApplicationError> {
        self.blobs
            .lock()
            .unwrap()
            .get(blob_id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn delete(&self, blob_id: &str) -> Result<(), ApplicationError> {
        self.blobs
            .lock()
            .unwrap()
            .remove(blob_id)
            .map(|_| ())
            .ok_or(ApplicationError::NotFound)
    }
}

struct PendingCode {
    code: String,
    expires_at: chrono::DateTime<Utc>,
    failed_attempts: u64,
}

#[derive(Default)]
pub struct MemoryAccountService {
    accounts: Mutex<HashMap<String, String>>,
    codes: Mutex<HashMap<String, PendingCode>>,
    sessions: Mutex<HashMap<String, String>>,
    fail_delivery: AtomicBool,
    counter: Mutex<u32>,
}

impl MemoryAccountService {
    pub fn fail_delivery(&self, fail: bool) {
        self.fail_delivery.store(fail, Ordering::SeqCst);
    }

    pub fn last_code(&self, account_id: &str) -> Option<String> {
        self.codes
            .lock()
            .unwrap()
            .get(account_id)
            .map(|pending| pending.code.clone())
    }

    pub fn expire_codes(&self) {
        for pending in self.codes.lock().unwrap().values_mut() {
            pending.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

#[async_trait]
impl AccountService for MemoryAccountService {
    async fn create_email_token(&self, email: &str) -> Result<String, ApplicationError> {
        if self.fail_delivery.load(Ordering::SeqCst) {
            return Err(ApplicationError::OtpDelivery("mailer offline".to_string()));
        }
        let account_id = {
            let mut accounts = self.accounts.lock().unwrap();
            match accounts.iter().find(|(_, e)| e.as_str() == email) {
                Some((id, _)) => id.clone(),
                None => {
                    let id = Uuid::new_v4().to_string();
                    accounts.insert(id.clone(), email.to_string());
                    id
                }
            }
        };
        let code = {
            let mut counter = self.counter.lock().unwrap();
            *counter += 1;
            format!("{:06}", 123_456 + *counter)
        };
        self.codes.lock().unwrap().insert(
            account_id.clone(),
            PendingCode {
                code,
                expires_at: Utc::now() + Duration::minutes(15),
                failed_attempts: 0,
            },
        );
        Ok(account_id)
    }

    async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<Session, ApplicationError> {
        {
            let mut codes = self.codes.lock().unwrap();
            let Some(pending) = codes.get_mut(account_id) else {
                return Err(ApplicationError::InvalidOtp);
            };
            if pending.expires_at <= Utc::now() {
                codes.remove(account_id);
                return Err(ApplicationError::InvalidOtp);
            }
            if !passcode_matches(Some(pending.code.as_str()), secret) {
                pending.failed_attempts += 1;
                if attempts_exhausted(pending.failed_attempts) {
                    codes.remove(account_id);
                }
                return Err(ApplicationError::InvalidOtp);
            }
            codes.remove(account_id);
        }
        let session_secret = Uuid::new_v4().simple().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(session_secret.clone(), account_id.to_string());
        Ok(Session {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            secret: session_secret,
            expires_at: Utc::now() + Duration::days(365),
        })
    }

    async fn get_account(&self, session_secret: &str) -> Result<Account, ApplicationError> {
        let account_id = self
            .sessions
            .lock()
            .unwrap()
            .get(session_secret)
            .cloned()
            .ok_or(ApplicationError::Unauthorized)?;
        let email = self
            .accounts
            .lock()
            .unwrap()
            .get(&account_id)
            .cloned()
            .ok_or(ApplicationError::Unauthorized)?;
        Ok(Account {
            id: account_id,
            email,
        })
    }

    async fn delete_session(&self, session_secret: &str) -> Result<(), ApplicationError> {
        self.sessions.lock().unwrap().remove(session_secret);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRouteCache {
    versions: Mutex<HashMap<String, u64>>,
}

impl MemoryRouteCache {
    pub fn version_of(&self, path: &str) -> u64 {
        self.versions
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl RouteCacheRepository for MemoryRouteCache {
    async fn revalidate(&self, path: &str) -> Result<u64, ApplicationError> {
        let mut versions = self.versions.lock().unwrap();
        let version = versions.entry(path.to_string()).or_insert(0);
        *version += 1;
        Ok(*version)
    }

    async fn version(&self, path: &str) -> Result<u64, ApplicationError> {
        Ok(self.version_of(path))
    }
}
