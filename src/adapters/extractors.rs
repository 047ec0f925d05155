use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::{
    application::{error::ApplicationError, use_cases::AuthUseCase},
    domain::models::user::User,
};

pub const SESSION_COOKIE: &str = "storeit-session";

/// The session secret carried by the `storeit-session` cookie.
pub struct SessionSecret(pub String);

impl<S> FromRequestParts<S> for SessionSecret
where
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApplicationError::Unauthorized)?;

        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|secret| !secret.is_empty())
            .map(SessionSecret)
            .ok_or(ApplicationError::Unauthorized)
    }
}

/// The signed-in user. Requests without a valid session, or whose account
/// has no user record, are rejected with 401.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AuthUseCase>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionSecret(secret) = SessionSecret::from_request_parts(parts, state).await?;
        let auth = Arc::<AuthUseCase>::from_ref(state);

        auth.current_user(&secret)
            .await?
            .map(CurrentUser)
            .ok_or(ApplicationError::Unauthorized)
    }
}
