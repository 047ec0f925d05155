use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity-backend account. One per email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(skip_serializing)]
    pub secret: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

/// Wrong guesses a pending passcode survives. The guess that reaches this
/// count discards the code.
pub const MAX_OTP_ATTEMPTS: u64 = 5;

pub fn passcode_matches(pending: Option<&str>, submitted: &str) -> bool {
    matches!(pending, Some(code) if !submitted.is_empty() && code == submitted)
}

pub fn attempts_exhausted(failed_attempts: u64) -> bool {
    failed_attempts >= MAX_OTP_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passcode_must_match_a_pending_code() {
        assert!(passcode_matches(Some("123456"), "123456"));
        assert!(!passcode_matches(Some("123456"), "654321"));
        assert!(!passcode_matches(None, "123456"));
        assert!(!passcode_matches(Some(""), ""));
    }

    #[test]
    fn attempts_run_out_at_the_limit() {
        assert!(!attempts_exhausted(0));
        assert!(!attempts_exhausted(MAX_OTP_ATTEMPTS - 1));
        assert!(attempts_exhausted(MAX_OTP_ATTEMPTS));
    }
}
