use async_trait::async_trait;
use redis::AsyncCommands;

use crate::application::{
    error::ApplicationError, repositories::route_cache_repository::RouteCacheRepository,
};

pub struct RedisRouteCache {
    client: redis::aio::ConnectionManager,
}

impl RedisRouteCache {
    pub fn new(client: redis::aio::ConnectionManager) -> Self {
        Self { client }
    }

    fn get_redis_key(path: &str) -> String {
        format!("route_version:{}", path)
    }
}

#[async_trait]
impl RouteCacheRepository for RedisRouteCache {
    async fn revalidate(&self, path: &str) -> Result<u64, ApplicationError> {
        let mut conn = self.client.clone();
        conn.incr(Self::get_redis_key(path), 1u64)
            .await
            .map_err(|e| ApplicationError::InternalError(format!("Failed to revalidate route: {}", e)))
    }

    async fn version(&self, path: &str) -> Result<u64, ApplicationError> {
        let mut conn = self.client.clone();
        let version: Option<u64> = conn
            .get(Self::get_redis_key(path))
            .await
            .map_err(|e| ApplicationError::InternalError(format!("Failed to read route version: {}", e)))?;
        Ok(version.unwrap_or(0))
    }
}
