use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::session::{Account, Session},
};

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Emails a one-time passcode to `email` and returns the account id the
    /// code is bound to. Known emails keep their account id.
    async fn create_email_token(&self, email: &str) -> Result<String, ApplicationError>;

    /// Exchanges a passcode for a session. Wrong, expired and already used
    /// codes all fail with `ApplicationError::InvalidOtp`.
    async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<Session, ApplicationError>;

    /// Resolves the account behind a session secret.
    async fn get_account(&self, session_secret: &str) -> Result<Account, ApplicationError>;

    async fn delete_session(&self, session_secret: &str) -> Result<(), ApplicationError>;
}
