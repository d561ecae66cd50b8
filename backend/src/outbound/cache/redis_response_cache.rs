//! `ResponseCache` over a pooled Redis connection.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis;
use rand::Rng;
use tracing::debug;

use crate::domain::ports::{CacheKey, ResponseCache, ResponseCacheError};
use crate::outbound::redis::RedisPool;

const SCAN_BATCH: usize = 100;

/// Redis implementation of [`ResponseCache`].
#[derive(Clone)]
pub struct RedisResponseCache {
    pool: RedisPool,
}

impl RedisResponseCache {
    /// Create a cache over the shared pool.
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

fn backend_error(err: &impl std::fmt::Display) -> ResponseCacheError {
    ResponseCacheError::backend(err.to_string())
}

/// Spread `ttl` uniformly over ±10 %, never below one millisecond.
pub(crate) fn jittered_ttl(ttl: Duration, rng: &mut impl Rng) -> Duration {
    let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
    let spread = millis / 10;
    let offset = rng.gen_range(0..=spread.saturating_mul(2));
    let jittered = millis.saturating_sub(spread).saturating_add(offset);
    Duration::from_millis(jittered.max(1))
}

/// Build a `SCAN MATCH` pattern matching keys that start with `prefix`.
pub(crate) fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl ResponseCache for RedisResponseCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, ResponseCacheError> {
        let mut conn = self.pool.get().await.map_err(|err| backend_error(&err))?;
        redis::cmd("GET")
            .arg(key.as_str())
            .query_async::<Option<String>>(&mut *conn)
            .await
            .map_err(|err| backend_error(&err))
    }

    async fn set(
        &self,
        key: &CacheKey,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), ResponseCacheError> {
        let ttl = jittered_ttl(ttl, &mut rand::thread_rng());
        let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let mut conn = self.pool.get().await.map_err(|err| backend_error(&err))?;
        redis::cmd("SET")
            .arg(key.as_str())
            .arg(payload)
            .arg("PX")
            .arg(millis)
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|err| backend_error(&err))
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), ResponseCacheError> {
        let mut conn = self.pool.get().await.map_err(|err| backend_error(&err))?;
        redis::cmd("DEL")
            .arg(key.as_str())
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|err| backend_error(&err))
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), ResponseCacheError> {
        let pattern = prefix_pattern(prefix);
        let mut conn = self.pool.get().await.map_err(|err| backend_error(&err))?;
        let mut cursor: u64 = 0;
        let mut removed = 0_usize;
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await
                .map_err(|err| backend_error(&err))?;
            if !keys.is_empty() {
                removed += keys.len();
                redis::cmd("DEL")
                    .arg(&keys)
                    .query_async::<()>(&mut *conn)
                    .await
                    .map_err(|err| backend_error(&err))?;
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }
        debug!(prefix, removed, "invalidated cached responses");
        Ok(())
    }
}
