use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Byte-oriented key/value store for rendered page results.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes all values matching a pattern (e.g., "page:book:*").
    /// Returns how many were removed.
    async fn delete_pattern(&self, pattern: &str) -> Result<usize>;
}
