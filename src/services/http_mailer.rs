use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::{
    application::{
        error::ApplicationError,
        services::{MailMessage, Mailer},
    },
    domain::config::settings::MailSettings,
    services::error::MailError,
};

/// Sends mail through a transactional mail HTTP API that accepts
/// `{from, to, subject, text}` with a bearer key.
pub struct HttpMailer {
    client: Client,
    settings: MailSettings,
}

#[derive(Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(settings: MailSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), ApplicationError> {
        let body = OutgoingMail {
            from: &self.settings.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(MailError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        info!(to = %message.to, "Mail delivered");
        Ok(())
    }
}
