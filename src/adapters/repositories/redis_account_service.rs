use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use redis::AsyncCommands;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::{
        error::ApplicationError,
        services::{AccountService, MailMessage, Mailer},
    },
    domain::models::session::{attempts_exhausted, passcode_matches, Account, Session},
};

const SESSION_SECRET_LENGTH: usize = 64;

/// Accounts, passcodes and sessions kept in Redis. Passcodes and sessions
/// expire through key TTLs.
pub struct RedisAccountService {
    client: redis::aio::ConnectionManager,
    mailer: Arc<dyn Mailer>,
    otp_ttl_seconds: u64,
    session_ttl_seconds: u64,
}

impl RedisAccountService {
    pub fn new(
        client: redis::aio::ConnectionManager,
        mailer: Arc<dyn Mailer>,
        otp_ttl_seconds: u64,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            client,
            mailer,
            otp_ttl_seconds,
            session_ttl_seconds,
        }
    }

    fn email_key(email: &str) -> String {
        format!("account:email:{}", email)
    }

    fn account_key(account_id: &str) -> String {
        format!("account:{}", account_id)
    }

    fn otp_key(account_id: &str) -> String {
        format!("otp:{}", account_id)
    }

    fn attempts_key(account_id: &str) -> String {
        format!("otp_attempts:{}", account_id)
    }

    fn session_key(secret: &str) -> String {
        format!("session:{}", secret)
    }

    fn generate_code() -> String {
        format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
    }

    fn generate_secret() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_SECRET_LENGTH)
            .map(char::from)
            .collect()
    }

    fn redis_error(context: &str, e: redis::RedisError) -> ApplicationError {
        ApplicationError::InternalError(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl AccountService for RedisAccountService {
    async fn create_email_token(&self, email: &str) -> Result<String, ApplicationError> {
        let mut conn = self.client.clone();
        let email_key = Self::email_key(email);

        // SET NX keeps the first account id issued for an email.
        let candidate = Uuid::new_v4().to_string();
        let created: bool = conn
            .set_nx(&email_key, &candidate)
            .await
            .map_err(|e| Self::redis_error("Failed to reserve account", e))?;
        let account_id: String = conn
            .get(&email_key)
            .await
            .map_err(|e| Self::redis_error("Failed to read account", e))?;
        if created {
            conn.set::<_, _, ()>(Self::account_key(&account_id), email)
                .await
                .map_err(|e| Self::redis_error("Failed to store account", e))?;
            info!("Created account {}", account_id);
        }

        // A fresh code starts with a fresh attempt budget.
        let code = Self::generate_code();
        let otp_key = Self::otp_key(&account_id);
        let (): () = redis::pipe()
            .atomic()
            .set_ex(&otp_key, &code, self.otp_ttl_seconds)
            .ignore()
            .del(Self::attempts_key(&account_id))
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| Self::redis_error("Failed to store passcode", e))?;

        if let Err(e) = self
            .mailer
            .send(MailMessage::otp(email, &code, self.otp_ttl_seconds))
            .await
        {
            // a code nobody received must not stay redeemable
            if let Err(cleanup) = conn.del::<_, ()>(&otp_key).await {
                warn!(
                    undelivered_otp = %otp_key,
                    "Failed to discard passcode after delivery failure: {}",
                    cleanup
                );
            }
            return Err(e);
        }

        info!("Passcode issued for account {}", account_id);
        Ok(account_id)
    }

    async fn create_session(
        &self,
        account_id: &str,
        secret: &str,
    ) -> Result<Session, ApplicationError> {
        let mut conn = self.client.clone();
        let otp_key = Self::otp_key(account_id);

        let stored: Option<String> = conn
            .get(&otp_key)
            .await
            .map_err(|e| Self::redis_error("Failed to read passcode", e))?;
        if stored.is_none() {
            warn!("No pending passcode for account {}", account_id);
            return Err(ApplicationError::InvalidOtp);
        }
        if !passcode_matches(stored.as_deref(), secret) {
            let attempts_key = Self::attempts_key(account_id);
            let (failed_attempts,): (u64,) = redis::pipe()
                .atomic()
                .incr(&attempts_key, 1u64)
                .expire(&attempts_key, self.otp_ttl_seconds as i64)
                .ignore()
                .query_async(&mut conn)
                .await
                .map_err(|e| Self::redis_error("Failed to count passcode attempt", e))?;

            if attempts_exhausted(failed_attempts) {
                warn!(
                    "Passcode attempts exhausted for account {}, discarding code",
                    account_id
                );
                conn.del::<_, ()>(vec![otp_key, attempts_key])
                    .await
                    .map_err(|e| Self::redis_error("Failed to discard passcode", e))?;
            } else {
                warn!(
                    "Passcode mismatch for account {} ({} failed)",
                    account_id, failed_attempts
                );
            }
            return Err(ApplicationError::InvalidOtp);
        }

        // GETDEL is atomic: only one request can consume the code.
        let consumed: Option<String> = conn
            .get_del(&otp_key)
            .await
            .map_err(|e| Self::redis_error("Failed to consume passcode", e))?;
        if !passcode_matches(consumed.as_deref(), secret) {
            return Err(ApplicationError::InvalidOtp);
        }
        if let Err(e) = conn.del::<_, ()>(Self::attempts_key(account_id)).await {
            warn!("Failed to clear passcode attempts for {}: {}", account_id, e);
        }

        let session_secret = Self::generate_secret();
        conn.set_ex::<_, _, ()>(
            Self::session_key(&session_secret),
            account_id,
            self.session_ttl_seconds,
        )
        .await
        .map_err(|e| Self::redis_error("Failed to store session", e))?;

        Ok(Session {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            secret: session_secret,
            expires_at: Utc::now() + Duration::seconds(self.session_ttl_seconds as i64),
        })
    }

    async fn get_account(&self, session_secret: &str) -> Result<Account, ApplicationError> {
        let mut conn = self.client.clone();

        let account_id: Option<String> = conn
            .get(Self::session_key(session_secret))
            .await
            .map_err(|e| Self::redis_error("Failed to read session", e))?;
        let account_id = account_id.ok_or(ApplicationError::Unauthorized)?;

        let email: Option<String> = conn
            .get(Self::account_key(&account_id))
            .await
            .map_err(|e| Self::redis_error("Failed to read account", e))?;
        let email = email.ok_or(ApplicationError::Unauthorized)?;

        Ok(Account {
            id: account_id,
            email,
        })
    }

    async fn delete_session(&self, session_secret: &str) -> Result<(), ApplicationError> {
        let mut conn = self.client.clone();
        conn.del::<_, ()>(Self::session_key(session_secret))
            .await
            .map_err(|e| Self::redis_error("Failed to delete session", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_record() {
        assert_eq!(
            RedisAccountService::email_key("ana@example.com"),
            "account:email:ana@example.com"
        );
        assert_eq!(RedisAccountService::account_key("acc-1"), "account:acc-1");
        assert_eq!(RedisAccountService::otp_key("acc-1"), "otp:acc-1");
        assert_eq!(
            RedisAccountService::attempts_key("acc-1"),
            "otp_attempts:acc-1"
        );
        assert_eq!(RedisAccountService::session_key("s3cr3t"), "session:s3cr3t");
    }

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..100 {
            let code = RedisAccountService::generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn session_secrets_are_long_and_alphanumeric() {
        let a = RedisAccountService::generate_secret();
        let b = RedisAccountService::generate_secret();
        assert_eq!(a.len(), SESSION_SECRET_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
