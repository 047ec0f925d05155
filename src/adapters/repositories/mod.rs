#[cfg(test)]
pub mod memory;
mod pg_file_repository;
mod pg_user_repository;
mod redis_account_service;
mod redis_route_cache;

pub use pg_file_repository::PgFileRepository;
pub use pg_user_repository::PgUserRepository;
pub use redis_account_service::RedisAccountService;
pub use redis_route_cache::RedisRouteCache;
