use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    application::{
        dto::user_dto::UserDTO,
        error::ApplicationError,
        repositories::user_repository::UserRepository,
        services::AccountService,
    },
    domain::models::{
        session::Session,
        user::{is_valid_email, normalize_email, User},
    },
};

/// One-time passcode sign-in and identity resolution.
pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    accounts: Arc<dyn AccountService>,
    default_avatar: String,
}

impl AuthUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        accounts: Arc<dyn AccountService>,
        default_avatar: String,
    ) -> Self {
        Self {
            users,
            accounts,
            default_avatar,
        }
    }

    /// Sends a passcode to `email`, creating the user record on first contact.
    /// Returns the account id the passcode must be verified against.
    pub async fn create_account(
        &self,
        full_name: &str,
        email: &str,
    ) -> Result<String, ApplicationError> {
        let email = Self::checked_email(email)?;
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ApplicationError::BadRequest("Full name is required".to_string()));
        }

        let existing_user = self.users.get_user_by_email(&email).await?;
        let account_id = self.send_email_otp(&email).await?;

        if existing_user.is_none() {
            let mut user_dto = UserDTO::for_signup(
                full_name.to_string(),
                email.clone(),
                self.default_avatar.clone(),
                account_id.clone(),
            );
            user_dto.sanitize();
            match self.users.create_user(user_dto).await {
                Ok(user) => info!("Created user {} for account {}", user.id, account_id),
                // A concurrent first sign-up for the same email may have won the insert.
                Err(e) => match self.users.get_user_by_email(&email).await? {
                    Some(user) => info!(
                        "User {} was created concurrently for account {}",
                        user.id, account_id
                    ),
                    None => return Err(e),
                },
            }
        }

        Ok(account_id)
    }

    /// Resends a passcode to an already registered email.
    pub async fn sign_in(&self, email: &str) -> Result<String, ApplicationError> {
        let email = Self::checked_email(email)?;
        if self.users.get_user_by_email(&email).await?.is_none() {
            warn!("Sign-in requested for unknown email");
            return Err(ApplicationError::NotFound);
        }
        self.send_email_otp(&email).await
    }

    pub async fn verify_secret(
        &self,
        account_id: &str,
        passcode: &str,
    ) -> Result<Session, ApplicationError> {
        let passcode = passcode.trim();
        if account_id.trim().is_empty() || passcode.is_empty() {
            return Err(ApplicationError::InvalidOtp);
        }

        match self.accounts.create_session(account_id, passcode).await {
            Ok(session) => {
                info!("Session {} created for account {}", session.id, account_id);
                Ok(session)
            }
            Err(ApplicationError::InvalidOtp) => Err(ApplicationError::InvalidOtp),
            Err(e) => {
                error!("Failed to verify OTP for account {}: {:?}", account_id, e);
                Err(ApplicationError::InvalidOtp)
            }
        }
    }

    /// Resolves the user behind a session secret. `Ok(None)` means the
    /// session is valid but no user record carries its account id.
    pub async fn current_user(&self, session_secret: &str) -> Result<Option<User>, ApplicationError> {
        let account = self.accounts.get_account(session_secret).await?;
        let user = self.users.get_user_by_account_id(&account.id).await?;
        if user.is_none() {
            warn!("Authenticated account {} has no user record", account.id);
        }
        Ok(user)
    }

    pub async fn sign_out(&self, session_secret: &str) -> Result<(), ApplicationError> {
        self.accounts.delete_session(session_secret).await
    }

    async fn send_email_otp(&self, email: &str) -> Result<String, ApplicationError> {
        self.accounts.create_email_token(email).await.map_err(|e| {
            error!("Failed to send email OTP: {:?}", e);
            match e {
                ApplicationError::OtpDelivery(msg) => ApplicationError::OtpDelivery(msg),
                other => ApplicationError::OtpDelivery(format!("{:?}", other)),
            }
        })
    }

    fn checked_email(email: &str) -> Result<String, ApplicationError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ApplicationError::BadRequest("Invalid email address".to_string()));
        }
        Ok(email)
    }
}
