//! Shared Redis connection pool used by the cache and stream adapters.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

/// Errors that can occur while building or using the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedisPoolError {
    /// The Redis URL was rejected or the server could not be reached.
    #[error("failed to build redis pool: {message}")]
    Build { message: String },

    /// No connection became available in time.
    #[error("failed to get redis connection: {message}")]
    Checkout { message: String },
}

fn build_error(err: &impl std::fmt::Display) -> RedisPoolError {
    RedisPoolError::Build {
        message: err.to_string(),
    }
}

/// Pooled multiplexed Redis connections.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Default checkout timeout.
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);

    /// Connect to `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RedisPoolError::Build`] for malformed URLs or when the
    /// initial connection fails.
    pub async fn connect(
        redis_url: &str,
        connection_timeout: Duration,
    ) -> Result<Self, RedisPoolError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(|err| build_error(&err))?;
        let inner = Pool::builder()
            .max_size(16)
            .connection_timeout(connection_timeout)
            .build(manager)
            .await
            .map_err(|err| build_error(&err))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`RedisPoolError::Checkout`] when the pool is exhausted or
    /// Redis is unreachable.
    pub async fn get(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, RedisPoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| RedisPoolError::Checkout {
                message: err.to_string(),
            })
    }
}
