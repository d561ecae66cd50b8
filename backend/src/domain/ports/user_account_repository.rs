//! Port abstraction for user account persistence.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUserAccount, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum UserAccountRepositoryError {
        /// Another account already uses the e-mail address.
        DuplicateEmail { email: String } => "account already exists for {email}",
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
    }
}

/// Storage for registered user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Look up an account by its normalised e-mail.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError>;

    /// Create an account, failing with
    /// [`UserAccountRepositoryError::DuplicateEmail`] when the address is taken.
    async fn insert(
        &self,
        account: &NewUserAccount,
    ) -> Result<UserAccount, UserAccountRepositoryError>;

    /// Persist the password hash and reset ticket of an existing account.
    async fn save(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError>;
}
