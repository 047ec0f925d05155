mod error;
mod http_mailer;
mod log_mailer;
mod s3_storage;
mod supabase_storage;

pub use error::{MailError, StorageError};
pub use http_mailer::HttpMailer;
pub use log_mailer::LogMailer;
pub use s3_storage::S3StorageService;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use tracing::warn;

use crate::{
    application::services::{Mailer, StorageService},
    domain::config::settings::{Provider, Settings},
};

pub fn create_storage_service(settings: &Settings) -> Result<Arc<dyn StorageService>, StorageError> {
    match settings.provider {
        Provider::S3 => {
            let s3_settings = settings.s3.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("S3 settings not found".to_string())
            })?;

            let service = S3StorageService::new(s3_settings.clone());
            Ok(Arc::new(service))
        }
        Provider::Supabase => {
            let supabase_settings = settings.supabase.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Supabase settings not found".to_string())
            })?;

            let service = SupabaseStorageService::new(supabase_settings.clone());
            Ok(Arc::new(service))
        }
    }
}

pub fn create_mailer(settings: &Settings) -> Arc<dyn Mailer> {
    match &settings.mail {
        Some(mail_settings) => Arc::new(HttpMailer::new(mail_settings.clone())),
        None => {
            warn!("MAIL_API_URL not set: passcodes will only be written to the log");
            Arc::new(LogMailer)
        }
    }
}

/// Object key for a new blob: a unique prefix plus the file name with anything
/// outside `[A-Za-z0-9.-]` replaced by `_`.
fn generate_blob_key(filename: &str) -> String {
    let safe_filename = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();

    format!("{}/{}", uuid::Uuid::new_v4().simple(), safe_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_keys_are_unique_and_safe() {
        let a = generate_blob_key("my report (final).pdf");
        let b = generate_blob_key("my report (final).pdf");
        assert_ne!(a, b);
        assert!(a.ends_with("/my_report__final_.pdf"));
    }
}
