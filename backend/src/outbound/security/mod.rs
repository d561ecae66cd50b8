//! Credential adapters: password hashing, signed tokens and the signing
//! secret they share.

mod argon2_password_hasher;
pub mod fingerprint;
mod jwt_token_service;
mod signing_secret;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_service::{JwtSettings, JwtTokenService};
pub use signing_secret::{BuildMode, SigningSecret, SigningSecretError};
