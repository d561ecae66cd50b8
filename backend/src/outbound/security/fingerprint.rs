//! Signing secret fingerprinting for operational visibility.
//!
//! Operators can check which JWT secret is active from the startup log
//! without the secret itself ever being written anywhere.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of `secret` as 16 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use addressbook::outbound::security::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"an example signing secret of 32+ bytes");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
