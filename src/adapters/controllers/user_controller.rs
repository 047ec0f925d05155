use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::{
    adapters::{dto::user_dto::UserResponse, extractors::SESSION_COOKIE},
    application::{error::ApplicationError, use_cases::AuthUseCase},
};

pub struct UserController;

impl UserController {
    /// GET /api/v1/users/me
    ///
    /// Answers `null` for a missing or expired session.
    pub async fn get_current_user(
        State(auth): State<Arc<AuthUseCase>>,
        jar: CookieJar,
    ) -> Result<Json<Option<UserResponse>>, ApplicationError> {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Json(None));
        };

        match auth.current_user(cookie.value()).await {
            Ok(user) => Ok(Json(user.map(UserResponse::from))),
            Err(ApplicationError::Unauthorized) => Ok(Json(None)),
            Err(e) => Err(e),
        }
    }
}
