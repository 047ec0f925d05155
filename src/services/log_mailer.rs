use async_trait::async_trait;
use tracing::info;

use crate::application::{
    error::ApplicationError,
    services::{MailMessage, Mailer},
};

/// Development mailer: writes the message to the log instead of sending it.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), ApplicationError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "{}",
            message.text
        );
        Ok(())
    }
}
