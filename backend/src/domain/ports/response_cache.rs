//! Port interface for caching serialised read responses.
use std::time::Duration;

use async_trait::async_trait;

use super::{CacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum ResponseCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "response cache backend failure: {message}",
    }
}

/// Key/value cache holding serialised JSON payloads with a time to live.
///
/// Callers treat every error as a cache miss.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Read a cached payload.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, ResponseCacheError>;

    /// Store a payload that expires after roughly `ttl`.
    async fn set(
        &self,
        key: &CacheKey,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), ResponseCacheError>;

    /// Drop a single entry.
    async fn invalidate(&self, key: &CacheKey) -> Result<(), ResponseCacheError>;

    /// Drop every entry whose key starts with `prefix`.
    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), ResponseCacheError>;
}
