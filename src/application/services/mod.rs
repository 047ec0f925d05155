pub mod account_service;
pub mod mailer;
pub mod storage_service;

pub use account_service::AccountService;
pub use mailer::{MailMessage, Mailer};
pub use storage_service::StorageService;
