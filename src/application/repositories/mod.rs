pub mod file_repository;
pub mod route_cache_repository;
pub mod user_repository;
