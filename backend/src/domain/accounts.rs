//! User accounts and password reset tickets.

use std::fmt;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use super::contacts::{EMAIL_MAX, email_within_limit, is_valid_email};

/// Validation errors raised by account value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// Account identifier was zero or negative.
    #[error("account id must be positive")]
    NonPositiveId,
    /// E-mail was blank once trimmed.
    #[error("Email is required.")]
    EmptyEmail,
    /// E-mail does not look like `local@domain.tld`.
    #[error("Email must be a valid email address.")]
    InvalidEmail,
    /// E-mail is longer than the stored column allows.
    #[error("Email must not exceed {EMAIL_MAX} characters.")]
    EmailTooLong,
    /// Password hash string was blank.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Store-assigned account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(i64);

impl AccountId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, AccountValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(AccountValidationError::NonPositiveId)
        }
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised account e-mail address.
///
/// ## Invariants
/// - Trimmed and lowercased, so lookups are case-insensitive.
/// - Has the shape `local@domain.tld`.
///
/// # Examples
/// ```
/// use addressbook::domain::EmailAddress;
///
/// let email = EmailAddress::parse("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate a raw address.
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if !email_within_limit(&normalised) {
            return Err(AccountValidationError::EmailTooLong);
        }
        if !is_valid_email(&normalised) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher.
    pub fn new(encoded: impl Into<String>) -> Result<Self, AccountValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(AccountValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Outstanding password reset request.
///
/// Only a SHA-256 fingerprint of the issued token is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetTicket {
    token_fingerprint: String,
    expires_at: DateTime<Utc>,
}

impl PasswordResetTicket {
    /// Build a ticket for a freshly issued token.
    #[must_use]
    pub fn for_token(token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_fingerprint: Self::fingerprint(token),
            expires_at,
        }
    }

    /// Rebuild a ticket from persisted parts.
    #[must_use]
    pub fn from_parts(token_fingerprint: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_fingerprint,
            expires_at,
        }
    }

    /// Hex-encoded SHA-256 digest of a reset token.
    #[must_use]
    pub fn fingerprint(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// Stored token fingerprint.
    #[must_use]
    pub fn token_fingerprint(&self) -> &str {
        self.token_fingerprint.as_str()
    }

    /// Instant after which the ticket is void.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether `token` redeems this ticket at `now`.
    #[must_use]
    pub fn accepts(&self, token: &str, now: DateTime<Utc>) -> bool {
        now < self.expires_at && Self::fingerprint(token) == self.token_fingerprint
    }
}

/// Fields required to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    /// Unique login e-mail.
    pub email: EmailAddress,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: AccountId,
    email: EmailAddress,
    password_hash: PasswordHash,
    reset_ticket: Option<PasswordResetTicket>,
}

impl UserAccount {
    /// Assemble an account from stored parts.
    #[must_use]
    pub fn new(
        id: AccountId,
        email: EmailAddress,
        password_hash: PasswordHash,
        reset_ticket: Option<PasswordResetTicket>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            reset_ticket,
        }
    }

    /// Account identifier.
    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Login e-mail.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Current password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Outstanding reset ticket, if any.
    #[must_use]
    pub fn reset_ticket(&self) -> Option<&PasswordResetTicket> {
        self.reset_ticket.as_ref()
    }

    /// Record a new reset request, replacing any earlier ticket.
    pub fn begin_password_reset(&mut self, ticket: PasswordResetTicket) {
        self.reset_ticket = Some(ticket);
    }

    /// Redeem the outstanding ticket and store the new hash.
    ///
    /// Returns `false` and leaves the account untouched when no ticket
    /// accepts `token` at `now`.
    pub fn complete_password_reset(
        &mut self,
        token: &str,
        now: DateTime<Utc>,
        new_hash: PasswordHash,
    ) -> bool {
        let accepted = self
            .reset_ticket
            .as_ref()
            .is_some_and(|ticket| ticket.accepts(token, now));
        if accepted {
            self.password_hash = new_hash;
            self.reset_ticket = None;
        }
        accepted
    }
}
