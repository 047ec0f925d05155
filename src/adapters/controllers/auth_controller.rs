use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use crate::{
    adapters::{
        dto::auth_dto::{
            AccountIdResponse, CreateAccountRequest, SessionResponse, SignInRequest,
            VerifyOtpRequest,
        },
        extractors::SESSION_COOKIE,
    },
    application::{error::ApplicationError, use_cases::AuthUseCase},
};

pub struct AuthController;

impl AuthController {
    /// POST /api/v1/auth/otp
    pub async fn create_account(
        State(auth): State<Arc<AuthUseCase>>,
        Json(body): Json<CreateAccountRequest>,
    ) -> Result<Json<AccountIdResponse>, ApplicationError> {
        let account_id = auth.create_account(&body.full_name, &body.email).await?;
        Ok(Json(AccountIdResponse { account_id }))
    }

    /// POST /api/v1/auth/sign-in
    pub async fn sign_in(
        State(auth): State<Arc<AuthUseCase>>,
        Json(body): Json<SignInRequest>,
    ) -> Result<Json<AccountIdResponse>, ApplicationError> {
        let account_id = auth.sign_in(&body.email).await?;
        Ok(Json(AccountIdResponse { account_id }))
    }

    /// POST /api/v1/auth/verify
    ///
    /// Exchanges the passcode for a session and stores the session secret in
    /// the `storeit-session` cookie.
    pub async fn verify_secret(
        State(auth): State<Arc<AuthUseCase>>,
        jar: CookieJar,
        Json(body): Json<VerifyOtpRequest>,
    ) -> Result<(CookieJar, Json<SessionResponse>), ApplicationError> {
        let session = auth.verify_secret(&body.account_id, &body.password).await?;

        let cookie = Cookie::build((SESSION_COOKIE, session.secret))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true);

        Ok((
            jar.add(cookie),
            Json(SessionResponse {
                session_id: session.id,
            }),
        ))
    }

    /// POST /api/v1/auth/sign-out
    pub async fn sign_out(
        State(auth): State<Arc<AuthUseCase>>,
        jar: CookieJar,
    ) -> Result<(CookieJar, StatusCode), ApplicationError> {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            auth.sign_out(cookie.value()).await?;
            info!("Session signed out");
        }

        let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
        Ok((jar, StatusCode::NO_CONTENT))
    }
}
