//! Service configuration loaded via OrthoConfig.
//!
//! Every value may come from the command line, an `ADDRESSBOOK_*`
//! environment variable or a configuration file. Unset optional values fall
//! back to the defaults exposed by the accessors below. Leaving
//! `database_url` or `redis_url` unset selects the in-process adapters.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_NOTIFICATION_STREAM: &str = "addressbook:notifications";
const DEFAULT_NOTIFICATION_QUEUE_CAPACITY: usize = 256;
const DEFAULT_JWT_ISSUER: &str = "addressbook";
const DEFAULT_JWT_AUDIENCE: &str = "addressbook-clients";
const DEFAULT_ACCESS_TOKEN_TTL_MINS: i64 = 60;
const DEFAULT_RESET_TOKEN_TTL_MINS: i64 = 15;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the address book service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADDRESSBOOK")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Redis connection URL backing the response cache and broker.
    pub redis_url: Option<String>,
    /// Lifetime of the cached contact listing, in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Redis stream receiving contact notifications.
    pub notification_stream: Option<String>,
    /// Bound of the in-process notification queue.
    pub notification_queue_capacity: Option<usize>,
    /// Shared secret used to sign bearer and reset tokens.
    pub jwt_secret: Option<String>,
    /// Issuer claim written to and required on tokens.
    pub jwt_issuer: Option<String>,
    /// Audience claim written to and required on tokens.
    pub jwt_audience: Option<String>,
    /// Lifetime of access tokens, in minutes.
    pub access_token_ttl_mins: Option<i64>,
    /// Lifetime of password reset tokens, in minutes.
    pub reset_token_ttl_mins: Option<i64>,
    /// Base URL used when building password reset links.
    pub public_base_url: Option<String>,
    /// Permit a generated signing secret outside debug builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl AppSettings {
    /// Return the raw listener address, falling back to the default.
    pub fn bind_addr_raw(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Parse the listener address.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr_raw().parse()
    }

    /// Return the configured database URL, treating blank values as unset.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Return the database pool size, falling back to the default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Return the configured Redis URL, treating blank values as unset.
    pub fn redis_url(&self) -> Option<&str> {
        non_blank(self.redis_url.as_deref())
    }

    /// Return the contact listing lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    /// Return the notification stream name, falling back to the default.
    pub fn notification_stream(&self) -> &str {
        self.notification_stream
            .as_deref()
            .unwrap_or(DEFAULT_NOTIFICATION_STREAM)
    }

    /// Return the notification queue bound, falling back to the default.
    pub fn notification_queue_capacity(&self) -> usize {
        self.notification_queue_capacity
            .unwrap_or(DEFAULT_NOTIFICATION_QUEUE_CAPACITY)
    }

    /// Return the configured signing secret, treating blank values as unset.
    pub fn jwt_secret(&self) -> Option<&str> {
        non_blank(self.jwt_secret.as_deref())
    }

    /// Return the token issuer, falling back to the default.
    pub fn jwt_issuer(&self) -> &str {
        self.jwt_issuer.as_deref().unwrap_or(DEFAULT_JWT_ISSUER)
    }

    /// Return the token audience, falling back to the default.
    pub fn jwt_audience(&self) -> &str {
        self.jwt_audience.as_deref().unwrap_or(DEFAULT_JWT_AUDIENCE)
    }

    /// Return the access token lifetime.
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(
            self.access_token_ttl_mins
                .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_MINS),
        )
    }

    /// Return the reset token lifetime.
    pub fn reset_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(
            self.reset_token_ttl_mins
                .unwrap_or(DEFAULT_RESET_TOKEN_TTL_MINS),
        )
    }

    /// Return the public base URL, falling back to the default.
    pub fn public_base_url(&self) -> &str {
        self.public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 14] = [
        "ADDRESSBOOK_BIND_ADDR",
        "ADDRESSBOOK_DATABASE_URL",
        "ADDRESSBOOK_DB_MAX_CONNECTIONS",
        "ADDRESSBOOK_REDIS_URL",
        "ADDRESSBOOK_CACHE_TTL_SECS",
        "ADDRESSBOOK_NOTIFICATION_STREAM",
        "ADDRESSBOOK_NOTIFICATION_QUEUE_CAPACITY",
        "ADDRESSBOOK_JWT_SECRET",
        "ADDRESSBOOK_JWT_ISSUER",
        "ADDRESSBOOK_JWT_AUDIENCE",
        "ADDRESSBOOK_ACCESS_TOKEN_TTL_MINS",
        "ADDRESSBOOK_RESET_TOKEN_TTL_MINS",
        "ADDRESSBOOK_PUBLIC_BASE_URL",
        "ADDRESSBOOK_ALLOW_EPHEMERAL_SECRET",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("addressbook")]).expect("config should load")
    }

    fn cleared_env_with(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr_raw(), DEFAULT_BIND_ADDR);
        assert!(settings.database_url().is_none());
        assert!(settings.redis_url().is_none());
        assert!(settings.jwt_secret().is_none());
        assert_eq!(settings.cache_ttl(), Duration::from_secs(60));
        assert_eq!(settings.notification_stream(), DEFAULT_NOTIFICATION_STREAM);
        assert_eq!(settings.notification_queue_capacity(), 256);
        assert_eq!(settings.access_token_ttl(), chrono::Duration::minutes(60));
        assert_eq!(settings.reset_token_ttl(), chrono::Duration::minutes(15));
        assert_eq!(settings.jwt_issuer(), "addressbook");
        assert_eq!(settings.jwt_audience(), "addressbook-clients");
        assert!(!settings.allow_ephemeral_secret);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_env_with(&[
            ("ADDRESSBOOK_BIND_ADDR", "127.0.0.1:9090"),
            ("ADDRESSBOOK_DATABASE_URL", "postgres://localhost/addressbook"),
            ("ADDRESSBOOK_REDIS_URL", "redis://127.0.0.1:6379"),
            ("ADDRESSBOOK_CACHE_TTL_SECS", "5"),
            ("ADDRESSBOOK_RESET_TOKEN_TTL_MINS", "30"),
            ("ADDRESSBOOK_ALLOW_EPHEMERAL_SECRET", "true"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/addressbook")
        );
        assert_eq!(settings.redis_url(), Some("redis://127.0.0.1:6379"));
        assert_eq!(settings.cache_ttl(), Duration::from_secs(5));
        assert_eq!(settings.reset_token_ttl(), chrono::Duration::minutes(30));
        assert!(settings.allow_ephemeral_secret);
    }

    #[rstest]
    fn blank_urls_select_in_process_adapters() {
        let _guard = lock_env(cleared_env_with(&[
            ("ADDRESSBOOK_DATABASE_URL", "  "),
            ("ADDRESSBOOK_REDIS_URL", ""),
        ]));

        let settings = load_from_empty_args();
        assert!(settings.database_url().is_none());
        assert!(settings.redis_url().is_none());
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env(cleared_env_with(&[("ADDRESSBOOK_BIND_ADDR", "not-an-address")]));

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }
}
