//! Account lifecycle service: registration, login and password reset.
//!
//! Credential failures are deliberately uniform. Unknown e-mails and wrong
//! passwords produce the same unauthorised error, and a forgot-password
//! request succeeds whether or not the account exists.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccessGrant, AccountsCommand, PasswordHasher, PasswordHasherError, PasswordResetMailer,
    TokenService, TokenServiceError, UserAccountRepository, UserAccountRepositoryError,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, NewPassword, NewUserAccount, PasswordResetTicket,
    RegistrationRequest, UserAccount,
};

/// Message returned when an e-mail is already registered.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists.";
/// Message returned for any failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
/// Message returned for any rejected reset token.
pub const INVALID_RESET_TOKEN_MESSAGE: &str = "Invalid or expired token.";
/// Message returned when a reset request lacks a token or password.
pub const RESET_FIELDS_REQUIRED_MESSAGE: &str = "Token and new password are required.";

fn map_repository_error(error: UserAccountRepositoryError) -> Error {
    match error {
        UserAccountRepositoryError::DuplicateEmail { .. } => {
            Error::invalid_request(DUPLICATE_EMAIL_MESSAGE)
        }
        UserAccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        UserAccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
    }
}

fn map_hasher_error(error: &PasswordHasherError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn map_signing_error(error: &TokenServiceError) -> Error {
    Error::internal(format!("token issuance failed: {error}"))
}

/// Account service implementing [`AccountsCommand`].
#[derive(Clone)]
pub struct AccountService<R> {
    accounts: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    mailer: Arc<dyn PasswordResetMailer>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    /// Create a new account service.
    pub fn new(
        accounts: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        mailer: Arc<dyn PasswordResetMailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            mailer,
            clock,
        }
    }
}

impl<R> AccountService<R>
where
    R: UserAccountRepository,
{
    async fn find(&self, email: &EmailAddress) -> Result<Option<UserAccount>, Error> {
        self.accounts
            .find_by_email(email)
            .await
            .map_err(map_repository_error)
    }

    async fn start_reset(&self, mut account: UserAccount) -> Result<(), Error> {
        let issued = self
            .tokens
            .issue_reset_token(&account, self.clock.utc())
            .map_err(|err| map_signing_error(&err))?;
        account.begin_password_reset(PasswordResetTicket::for_token(
            &issued.token,
            issued.expires_at,
        ));
        self.accounts
            .save(&account)
            .await
            .map_err(map_repository_error)?;

        match self
            .mailer
            .send_reset_link(account.email(), &issued.token)
            .await
        {
            Ok(()) => info!(account_id = %account.id(), "password reset link sent"),
            Err(error) => warn!(%error, account_id = %account.id(), "password reset mail failed"),
        }
        Ok(())
    }
}

#[async_trait]
impl<R> AccountsCommand for AccountService<R>
where
    R: UserAccountRepository,
{
    async fn register(&self, request: RegistrationRequest) -> Result<(), Error> {
        if self.find(request.email()).await?.is_some() {
            return Err(Error::invalid_request(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(request.password())
            .map_err(|err| map_hasher_error(&err))?;
        let account = self
            .accounts
            .insert(&NewUserAccount {
                email: request.email().clone(),
                password_hash,
            })
            .await
            .map_err(map_repository_error)?;

        info!(account_id = %account.id(), "account registered");
        Ok(())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessGrant, Error> {
        let Ok(email) = EmailAddress::parse(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };
        let Some(account) = self.find(&email).await? else {
            debug!("login attempted for unknown account");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .map_err(|err| map_hasher_error(&err))?;
        if !verified {
            info!(account_id = %account.id(), "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let issued = self
            .tokens
            .issue_access_token(&account, self.clock.utc())
            .map_err(|err| map_signing_error(&err))?;
        info!(account_id = %account.id(), "login succeeded");
        Ok(AccessGrant {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn forgot_password(&self, email: &str) -> Result<(), Error> {
        let Ok(email) = EmailAddress::parse(email) else {
            debug!("password reset requested for malformed e-mail");
            return Ok(());
        };
        match self.find(&email).await? {
            Some(account) => self.start_reset(account).await,
            None => {
                debug!("password reset requested for unknown account");
                Ok(())
            }
        }
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), Error> {
        let token = token.trim();
        if token.is_empty() || new_password.is_empty() {
            return Err(Error::invalid_request(RESET_FIELDS_REQUIRED_MESSAGE));
        }
        let new_password =
            NewPassword::new(new_password).map_err(|err| Error::invalid_request(err.to_string()))?;

        let now = self.clock.utc();
        let claims = self.tokens.verify_reset_token(token, now).map_err(|error| {
            debug!(%error, "reset token rejected");
            Error::unauthorized(INVALID_RESET_TOKEN_MESSAGE)
        })?;
        let Some(mut account) = self.find(&claims.email).await? else {
            return Err(Error::unauthorized(INVALID_RESET_TOKEN_MESSAGE));
        };
        let redeemable = account
            .reset_ticket()
            .is_some_and(|ticket| ticket.accepts(token, now));
        if !redeemable {
            info!(account_id = %account.id(), "reset token does not match outstanding ticket");
            return Err(Error::unauthorized(INVALID_RESET_TOKEN_MESSAGE));
        }

        let new_hash = self
            .hasher
            .hash(&new_password)
            .map_err(|err| map_hasher_error(&err))?;
        if !account.complete_password_reset(token, now, new_hash) {
            return Err(Error::unauthorized(INVALID_RESET_TOKEN_MESSAGE));
        }
        self.accounts
            .save(&account)
            .await
            .map_err(map_repository_error)?;

        info!(account_id = %account.id(), "password reset completed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
