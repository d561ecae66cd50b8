//! Resolution of the JWT signing secret from configuration.

use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

/// Minimum accepted secret length in bytes.
pub const SIGNING_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to an ephemeral secret with a warning.
    Debug,
    /// Release builds require a configured secret unless explicitly allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while resolving the signing secret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningSecretError {
    /// No secret was configured and ephemeral secrets are not allowed.
    #[error("jwt_secret is required; set ADDRESSBOOK_JWT_SECRET or allow an ephemeral secret")]
    Missing,
    /// The configured secret is too short.
    #[error("jwt_secret too short: need >= {min_len} bytes, got {length}")]
    TooShort { length: usize, min_len: usize },
}

/// HMAC key material, wiped from memory on drop.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl SigningSecret {
    /// Accept configured key material if it is long enough.
    ///
    /// # Errors
    ///
    /// Returns [`SigningSecretError::TooShort`] below
    /// [`SIGNING_SECRET_MIN_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningSecretError> {
        if bytes.len() < SIGNING_SECRET_MIN_LEN {
            return Err(SigningSecretError::TooShort {
                length: bytes.len(),
                min_len: SIGNING_SECRET_MIN_LEN,
            });
        }
        Ok(Self {
            bytes: Zeroizing::new(bytes.to_vec()),
            ephemeral: false,
        })
    }

    /// Generate a random secret valid for this process only.
    #[must_use]
    pub fn ephemeral() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            bytes,
            ephemeral: true,
        }
    }

    /// Pick the configured secret or, where permitted, an ephemeral one.
    ///
    /// # Errors
    ///
    /// Returns [`SigningSecretError::Missing`] when nothing is configured in
    /// a release build without `allow_ephemeral`, and
    /// [`SigningSecretError::TooShort`] for short secrets.
    pub fn resolve(
        configured: Option<&str>,
        allow_ephemeral: bool,
        mode: BuildMode,
    ) -> Result<Self, SigningSecretError> {
        match configured {
            Some(secret) => Self::from_bytes(secret.as_bytes()),
            None if allow_ephemeral || mode == BuildMode::Debug => {
                warn!("no jwt_secret configured; using an ephemeral secret, tokens die with the process");
                Ok(Self::ephemeral())
            }
            None => Err(SigningSecretError::Missing),
        }
    }

    /// Raw key material.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the secret was generated at startup.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("bytes", &"<redacted>")
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[rstest]
    #[case(BuildMode::Debug, false)]
    #[case(BuildMode::Release, false)]
    #[case(BuildMode::Release, true)]
    fn configured_secret_wins(#[case] mode: BuildMode, #[case] allow_ephemeral: bool) {
        let secret = SigningSecret::resolve(Some(SECRET), allow_ephemeral, mode).expect("secret");

        assert_eq!(secret.expose(), SECRET.as_bytes());
        assert!(!secret.is_ephemeral());
    }

    #[rstest]
    fn short_secret_is_rejected() {
        let error = SigningSecret::resolve(Some("short"), true, BuildMode::Debug)
            .expect_err("too short");

        assert_eq!(
            error,
            SigningSecretError::TooShort {
                length: 5,
                min_len: SIGNING_SECRET_MIN_LEN
            }
        );
    }

    #[rstest]
    #[case(BuildMode::Debug, false)]
    #[case(BuildMode::Release, true)]
    fn missing_secret_falls_back_when_permitted(
        #[case] mode: BuildMode,
        #[case] allow_ephemeral: bool,
    ) {
        let secret = SigningSecret::resolve(None, allow_ephemeral, mode).expect("ephemeral");

        assert!(secret.is_ephemeral());
        assert_eq!(secret.expose().len(), EPHEMERAL_SECRET_LEN);
    }

    #[rstest]
    fn missing_secret_in_release_is_an_error() {
        let error = SigningSecret::resolve(None, false, BuildMode::Release).expect_err("missing");

        assert_eq!(error, SigningSecretError::Missing);
    }

    #[rstest]
    fn debug_output_redacts_key_material() {
        let secret = SigningSecret::from_bytes(SECRET.as_bytes()).expect("secret");

        assert!(!format!("{secret:?}").contains(SECRET));
    }
}
