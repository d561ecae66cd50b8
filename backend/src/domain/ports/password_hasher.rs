//! Port for one-way password hashing.
use crate::domain::{NewPassword, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted password hashing and verification.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh salt.
    fn hash(&self, password: &NewPassword) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a candidate password against a stored hash.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
