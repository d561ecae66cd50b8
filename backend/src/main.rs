//! Address book entry-point: loads settings, prepares storage and serves the
//! REST API.

mod server;

use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use addressbook::inbound::http::health::HealthState;
use addressbook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use addressbook::outbound::queue::drain_worker;
use addressbook::outbound::redis::RedisPool;
use addressbook::settings::AppSettings;

use server::{RunningServer, ServerConfig, create_server};

/// How long shutdown waits for queued notifications to reach the broker.
const NOTIFICATION_DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err_with(|| format!("invalid bind address {}", settings.bind_addr_raw()))?;

    let mut config = ServerConfig::new(settings.clone(), bind_addr);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .wrap_err("database migrations failed")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database_url configured; contacts and accounts are kept in memory");
    }
    if let Some(redis_url) = settings.redis_url() {
        let pool = RedisPool::connect(redis_url, RedisPool::DEFAULT_CONNECTION_TIMEOUT)
            .await
            .wrap_err("failed to connect to redis")?;
        config = config.with_redis_pool(pool);
    } else {
        warn!("no redis_url configured; using in-process cache and logging broker");
    }

    let health_state = web::Data::new(HealthState::new());
    let RunningServer {
        server,
        notification_worker,
    } = create_server(health_state, config).wrap_err("failed to start http server")?;
    info!(%bind_addr, "address book listening");

    // Awaiting consumes the server, dropping every handler's publisher so
    // the worker can finish the queue and exit.
    let served = server.await.wrap_err("http server terminated abnormally");
    if drain_worker(notification_worker, NOTIFICATION_DRAIN_GRACE).await {
        info!("notification queue drained");
    }
    served
}
