pub mod auth;
pub mod files;

pub use auth::AuthUseCase;
pub use files::{FileUseCase, ListFiles};
