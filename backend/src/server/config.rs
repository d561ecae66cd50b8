//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use addressbook::outbound::persistence::DbPool;
use addressbook::outbound::redis::RedisPool;
use addressbook::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) settings: AppSettings,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_pool: Option<RedisPool>,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings.
    #[must_use]
    pub fn new(settings: AppSettings, bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            settings,
            db_pool: None,
            redis_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, contacts and accounts are stored in PostgreSQL instead
    /// of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach a Redis pool backing the response cache and notification
    /// broker.
    #[must_use]
    pub fn with_redis_pool(mut self, pool: RedisPool) -> Self {
        self.redis_pool = Some(pool);
        self
    }
}
