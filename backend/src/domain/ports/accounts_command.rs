//! Driving port for the account lifecycle: registration, login and
//! password reset.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, LoginCredentials, RegistrationRequest};

/// Access token handed back on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// Signed bearer token.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Driving port for account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account; a taken e-mail is an invalid request.
    async fn register(&self, request: RegistrationRequest) -> Result<(), Error>;

    /// Verify credentials and issue an access token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessGrant, Error>;

    /// Start a password reset for `email` if it belongs to an account.
    ///
    /// Succeeds whether or not the account exists.
    async fn forgot_password(&self, email: &str) -> Result<(), Error>;

    /// Redeem a reset token and set a new password.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), Error>;
}
