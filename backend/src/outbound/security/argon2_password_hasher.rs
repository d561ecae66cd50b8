//! Argon2id implementation of the `PasswordHasher` port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{NewPassword, PasswordHash};

/// Hashes passwords as Argon2id PHC strings with the crate's default cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &NewPassword) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
        }
    }
}
