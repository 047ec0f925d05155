use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::{application::dto::user_dto::UserDTO, domain::models::user::User};

impl FromRow<'_, PgRow> for UserDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserDTO {
            id: row.try_get("id")?,
            full_name: Some(row.try_get("full_name")?),
            email: Some(row.try_get("email")?),
            avatar: Some(row.try_get("avatar")?),
            account_id: Some(row.try_get("account_id")?),
            created_at: Some(row.try_get("created_at")?),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            avatar: user.avatar,
            account_id: user.account_id,
        }
    }
}
