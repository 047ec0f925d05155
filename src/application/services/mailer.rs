use async_trait::async_trait;
use serde::Serialize;

use crate::application::error::ApplicationError;

#[derive(Debug, Clone, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl MailMessage {
    pub fn otp(to: &str, code: &str, ttl_seconds: u64) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your StoreIt verification code".to_string(),
            text: format!(
                "Your verification code is {}. It expires in {} minutes.",
                code,
                ttl_seconds / 60
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), ApplicationError>;
}
