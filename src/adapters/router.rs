use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::adapters::{
    controllers::{
        auth_controller::AuthController, file_controller::FileController,
        health_controller::HealthController, usage_controller::UsageController,
        user_controller::UserController,
    },
    middleware::validate_service_secret,
    state::AppState,
};

/// Room for the multipart framing around the file part.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

async fn hello_world() -> &'static str {
    "Hello, world!"
}

pub fn build_router(app_state: AppState) -> Router {
    let upload_limit = usize::try_from(app_state.settings.max_upload_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    // Protected routes that require the X-Service-Secret header
    let protected_routes = Router::new()
        .route("/api/v1/health", get(HealthController::health_check))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_service_secret,
        ));

    let auth_routes = Router::new()
        .route("/api/v1/auth/otp", post(AuthController::create_account))
        .route("/api/v1/auth/sign-in", post(AuthController::sign_in))
        .route("/api/v1/auth/verify", post(AuthController::verify_secret))
        .route("/api/v1/auth/sign-out", post(AuthController::sign_out))
        .route("/api/v1/users/me", get(UserController::get_current_user));

    let file_routes = Router::new()
        .route(
            "/api/v1/files",
            get(FileController::list_files)
                .post(FileController::upload_file)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/files/types/{file_type}",
            get(FileController::list_files_by_type),
        )
        .route(
            "/api/v1/files/{file_id}/content",
            get(FileController::download_file),
        )
        .route(
            "/api/v1/files/{file_id}/actions",
            post(FileController::apply_action),
        )
        .route("/api/v1/usage", get(UsageController::get_usage))
        .route("/api/v1/dashboard", get(UsageController::get_dashboard))
        .route(
            "/api/v1/routes/version",
            get(UsageController::get_route_version),
        );

    let cors = cors_layer(app_state.settings.cors_allowed_origins.as_deref());

    Router::new()
        .route("/", get(hello_world))
        .merge(protected_routes)
        .merge(auth_routes)
        .merge(file_routes)
        .layer(cors)
        .with_state(app_state)
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();

            // The session cookie only travels on credentialed requests.
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    }
}
