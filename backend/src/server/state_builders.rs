//! Builders wiring driven adapters into the HTTP state.
//!
//! Each concern picks its production adapter when the matching pool is
//! configured and an in-process fallback otherwise.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tokio::task::JoinHandle;
use tracing::info;

use addressbook::domain::ports::{
    AccountsCommand, ContactRepository, ContactsCommand, ContactsQuery, NotificationBroker,
    PasswordHasher, PasswordResetMailer, ResponseCache, TokenService, UserAccountRepository,
};
use addressbook::domain::{AccountService, AddressBookService};
use addressbook::inbound::http::state::HttpState;
use addressbook::outbound::cache::RedisResponseCache;
use addressbook::outbound::mail::LoggingPasswordResetMailer;
use addressbook::outbound::memory::{
    InMemoryContactRepository, InMemoryResponseCache, InMemoryUserAccountRepository,
};
use addressbook::outbound::persistence::{DieselContactRepository, DieselUserAccountRepository};
use addressbook::outbound::queue::{LoggingBroker, QueuedNotificationPublisher, RedisStreamBroker};
use addressbook::outbound::security::{
    Argon2PasswordHasher, BuildMode, JwtSettings, JwtTokenService, SigningSecret,
    fingerprint::secret_fingerprint,
};

use super::ServerConfig;

/// HTTP state plus the background notification worker feeding the broker.
pub(crate) struct BuiltState {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) notification_worker: JoinHandle<()>,
}

struct ContactDeps {
    cache: Arc<dyn ResponseCache>,
    publisher: Arc<QueuedNotificationPublisher>,
    clock: Arc<dyn Clock>,
    cache_ttl: Duration,
}

fn contact_ports<R>(
    repo: Arc<R>,
    deps: ContactDeps,
) -> (Arc<dyn ContactsQuery>, Arc<dyn ContactsCommand>)
where
    R: ContactRepository + 'static,
{
    let service = Arc::new(
        AddressBookService::new(repo, deps.cache, deps.publisher, deps.clock)
            .with_cache_ttl(deps.cache_ttl),
    );
    let query: Arc<dyn ContactsQuery> = service.clone();
    let command: Arc<dyn ContactsCommand> = service;
    (query, command)
}

struct AccountDeps {
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    mailer: Arc<dyn PasswordResetMailer>,
    clock: Arc<dyn Clock>,
}

fn account_port<R>(repo: Arc<R>, deps: AccountDeps) -> Arc<dyn AccountsCommand>
where
    R: UserAccountRepository + 'static,
{
    Arc::new(AccountService::new(
        repo,
        deps.hasher,
        deps.tokens,
        deps.mailer,
        deps.clock,
    ))
}

fn build_cache(config: &ServerConfig, clock: Arc<dyn Clock>) -> Arc<dyn ResponseCache> {
    match &config.redis_pool {
        Some(pool) => {
            info!(adapter = "redis", "response cache selected");
            Arc::new(RedisResponseCache::new(pool.clone()))
        }
        None => {
            info!(adapter = "memory", "response cache selected");
            Arc::new(InMemoryResponseCache::new(clock))
        }
    }
}

fn build_broker(config: &ServerConfig) -> Arc<dyn NotificationBroker> {
    match &config.redis_pool {
        Some(pool) => {
            let stream = config.settings.notification_stream();
            info!(adapter = "redis-stream", stream, "notification broker selected");
            Arc::new(RedisStreamBroker::new(pool.clone(), stream))
        }
        None => {
            info!(adapter = "log", "notification broker selected");
            Arc::new(LoggingBroker)
        }
    }
}

fn build_token_service(config: &ServerConfig) -> std::io::Result<Arc<dyn TokenService>> {
    let settings = &config.settings;
    let secret = SigningSecret::resolve(
        settings.jwt_secret(),
        settings.allow_ephemeral_secret,
        BuildMode::from_debug_assertions(),
    )
    .map_err(|e| std::io::Error::other(format!("signing secret unavailable: {e}")))?;
    info!(
        fingerprint = %secret_fingerprint(secret.expose()),
        ephemeral = secret.is_ephemeral(),
        "token signing secret loaded"
    );
    Ok(Arc::new(JwtTokenService::new(
        &secret,
        JwtSettings {
            issuer: settings.jwt_issuer().to_owned(),
            audience: settings.jwt_audience().to_owned(),
            access_ttl: settings.access_token_ttl(),
            reset_ttl: settings.reset_token_ttl(),
        },
    )))
}

/// Build the HTTP state from configuration.
///
/// Must be called from within a Tokio runtime: the notification worker is
/// spawned immediately.
///
/// # Errors
/// Returns [`std::io::Error`] when no usable signing secret is available.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<BuiltState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = build_token_service(config)?;
    let (publisher, notification_worker) = QueuedNotificationPublisher::spawn(
        build_broker(config),
        config.settings.notification_queue_capacity(),
    );

    let contact_deps = ContactDeps {
        cache: build_cache(config, clock.clone()),
        publisher: Arc::new(publisher),
        clock: clock.clone(),
        cache_ttl: config.settings.cache_ttl(),
    };
    let account_deps = AccountDeps {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens,
        mailer: Arc::new(LoggingPasswordResetMailer::new(
            config.settings.public_base_url(),
        )),
        clock,
    };

    let ((contacts_query, contacts), accounts) = match &config.db_pool {
        Some(pool) => {
            info!(adapter = "postgres", "repositories selected");
            (
                contact_ports(
                    Arc::new(DieselContactRepository::new(pool.clone())),
                    contact_deps,
                ),
                account_port(
                    Arc::new(DieselUserAccountRepository::new(pool.clone())),
                    account_deps,
                ),
            )
        }
        None => {
            info!(adapter = "memory", "repositories selected");
            (
                contact_ports(Arc::new(InMemoryContactRepository::new()), contact_deps),
                account_port(Arc::new(InMemoryUserAccountRepository::new()), account_deps),
            )
        }
    };

    Ok(BuiltState {
        http_state: web::Data::new(HttpState::new(contacts_query, contacts, accounts)),
        notification_worker,
    })
}
