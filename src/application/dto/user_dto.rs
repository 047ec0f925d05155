use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDTO {
    pub id: Uuid,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserDTO {
    /// New user record with a fresh id; the profile fields start as
    /// placeholders until the user edits them elsewhere.
    pub fn for_signup(full_name: String, email: String, avatar: String, account_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: Some(full_name),
            email: Some(email),
            avatar: Some(avatar),
            account_id: Some(account_id),
            created_at: Some(Utc::now()),
        }
    }

    pub fn sanitize(&mut self) {
        if let Some(ref mut full_name) = self.full_name {
            *full_name = full_name.trim().to_string();
        }
        if let Some(ref mut email) = self.email {
            *email = crate::domain::models::user::normalize_email(email);
        }
    }
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        UserDTO {
            id: value.id,
            full_name: Some(value.full_name),
            email: Some(value.email),
            avatar: Some(value.avatar),
            account_id: Some(value.account_id),
            created_at: Some(value.created_at),
        }
    }
}

impl From<UserDTO> for User {
    fn from(value: UserDTO) -> Self {
        User {
            id: value.id,
            full_name: value.full_name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            avatar: value.avatar.unwrap_or_default(),
            account_id: value.account_id.unwrap_or_default(),
            created_at: value.created_at.unwrap_or_else(Utc::now),
        }
    }
}
