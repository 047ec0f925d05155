use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// Per-route version counters. A mutation bumps the version of the route it
/// was issued from so clients know their cached listing for it is stale.
#[async_trait]
pub trait RouteCacheRepository: Send + Sync {
    async fn revalidate(&self, path: &str) -> Result<u64, ApplicationError>;
    async fn version(&self, path: &str) -> Result<u64, ApplicationError>;
}
