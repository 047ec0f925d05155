use async_trait::async_trait;

use crate::{
    application::{dto::user_dto::UserDTO, error::ApplicationError},
    domain::models::user::User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ApplicationError>;
    async fn get_user_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<User>, ApplicationError>;
}
