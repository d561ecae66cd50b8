//! Clock-driven in-memory response cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{CacheKey, ResponseCache, ResponseCacheError};

#[derive(Debug, Clone)]
struct Entry {
    payload: String,
    expires_at: DateTime<Utc>,
}

/// Response cache holding entries in a process-local map.
///
/// Expiry is evaluated lazily against the injected clock on read.
pub struct InMemoryResponseCache {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryResponseCache {
    /// Create an empty cache using `clock` for expiry.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, ResponseCacheError> {
        self.entries
            .lock()
            .map_err(|_| ResponseCacheError::backend("cache lock poisoned"))
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, ResponseCacheError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.payload.clone())),
            Some(_) => {
                entries.remove(key.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &CacheKey,
        payload: &str,
        ttl: Duration,
    ) -> Result<(), ResponseCacheError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|err| ResponseCacheError::backend(format!("invalid ttl: {err}")))?;
        let entry = Entry {
            payload: payload.to_owned(),
            expires_at: self.clock.utc() + ttl,
        };
        self.lock()?.insert(key.as_str().to_owned(), entry);
        Ok(())
    }

    async fn invalidate(&self, key: &CacheKey) -> Result<(), ResponseCacheError> {
        self.lock()?.remove(key.as_str());
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), ResponseCacheError> {
        self.lock()?.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
