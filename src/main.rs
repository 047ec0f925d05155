mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::{PgFileRepository, PgUserRepository, RedisAccountService, RedisRouteCache},
    router::build_router,
    state::AppState,
};
use application::{
    repositories::{
        file_repository::FileRepository, route_cache_repository::RouteCacheRepository,
        user_repository::UserRepository,
    },
    services::AccountService,
    use_cases::{AuthUseCase, FileUseCase},
};
use domain::config::settings::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // aws-sdk-s3 and reqwest share the rustls provider; install it before any client is built
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let settings = Settings::from_env().expect("ERROR: Invalid configuration");
    tracing::info!(
        "Starting storeit-service with {:?} storage at {}",
        settings.provider,
        settings.public_url
    );

    // Connect to PostgreSQL and Redis in parallel for faster startup
    tracing::info!("Connecting to databases...");
    let (pool, redis_conn_manager) = tokio::join!(
        async {
            sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(&settings.database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.")
        },
        async {
            let redis_client = redis::Client::open(settings.redis_url.as_str())
                .expect("ERROR: Failed to create Redis client. Check REDIS_URL format.");
            redis::aio::ConnectionManager::new(redis_client)
                .await
                .expect(
                    "ERROR: Failed to connect to Redis. Check REDIS_URL and network connectivity.",
                )
        }
    );
    tracing::info!("Database connections established");

    let storage_service =
        services::create_storage_service(&settings).expect("Failed to create storage service");
    let mailer = services::create_mailer(&settings);

    let user_repo = Arc::new(PgUserRepository::new(pool.clone())) as Arc<dyn UserRepository>;
    let file_repo = Arc::new(PgFileRepository::new(pool)) as Arc<dyn FileRepository>;
    let account_service = Arc::new(RedisAccountService::new(
        redis_conn_manager.clone(),
        mailer,
        settings.otp_ttl_seconds,
        settings.session_ttl_seconds,
    )) as Arc<dyn AccountService>;
    let route_cache =
        Arc::new(RedisRouteCache::new(redis_conn_manager)) as Arc<dyn RouteCacheRepository>;

    let app_state = AppState {
        auth: Arc::new(AuthUseCase::new(
            user_repo,
            account_service,
            settings.default_avatar.clone(),
        )),
        files: Arc::new(FileUseCase::new(
            file_repo,
            storage_service,
            route_cache,
            settings.public_url.clone(),
            settings.max_upload_size,
            settings.storage_quota,
        )),
        settings: Arc::new(settings),
    };

    let port = app_state.settings.port;
    let router = build_router(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
