//! Port for issuing and checking signed tokens.
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenServiceError {
        /// Token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Token is malformed, forged, expired or meant for another purpose.
        Invalid { message: String } => "token rejected: {message}",
    }
}

/// A signed token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded token.
    pub token: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Claims recovered from a valid password reset token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetClaims {
    /// Account the token was issued for.
    pub email: EmailAddress,
}

/// Issues access and password reset tokens. `now` is supplied by the caller
/// so expiry follows the injected clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue an access token for a logged-in account.
    fn issue_access_token(
        &self,
        account: &UserAccount,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenServiceError>;

    /// Issue a single-purpose password reset token.
    fn issue_reset_token(
        &self,
        account: &UserAccount,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenServiceError>;

    /// Check signature, issuer, audience, purpose and expiry of a reset token.
    fn verify_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ResetClaims, TokenServiceError>;
}
