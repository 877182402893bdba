use async_trait::async_trait;

use crate::errors::ServiceError;
use super::store::LookupResult;

/// Trait abstraction for the title -> link catalog.
/// Implementations can be file-backed, database-backed, or remote KV.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search(&self, query: &str) -> LookupResult;
    /// Insert or update; `ServiceError::Validation` when title or link is blank.
    async fn add(&self, movie: &str, link: &str) -> Result<(), ServiceError>;
}
