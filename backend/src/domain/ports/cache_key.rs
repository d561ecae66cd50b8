//! Validated key type shared by response cache adapters.
use thiserror::Error;

/// Key under which a serialised response is cached.
///
/// # Examples
/// ```
/// use addressbook::domain::ports::CacheKey;
///
/// let key = CacheKey::new("contacts:all").expect("valid key");
/// assert!(key.has_prefix("contacts:"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Construct a cache key after validating that it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, CacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(CacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the key lives under `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("cache key must not be empty")]
    Empty,
    /// Key contains leading or trailing whitespace.
    #[error("cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}

#[cfg(test)]
mod tests {
    //! Validates cache key parsing and whitespace constraints.
    use super::{CacheKey, CacheKeyValidationError};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn cache_key_rejects_blank(#[case] value: &str) {
        let err = CacheKey::new(value).expect_err("blank keys rejected");
        assert_eq!(err, CacheKeyValidationError::Empty);
    }

    #[rstest]
    #[case(" contacts:all")]
    #[case("contacts:all ")]
    fn cache_key_rejects_whitespace_padding(#[case] value: &str) {
        let err = CacheKey::new(value).expect_err("padded key rejected");
        assert_eq!(err, CacheKeyValidationError::ContainsWhitespace);
    }

    #[rstest]
    #[case("contacts:", true)]
    #[case("contacts:all", true)]
    #[case("accounts:", false)]
    fn cache_key_prefix_matching(#[case] prefix: &str, #[case] expected: bool) {
        let key = CacheKey::new("contacts:all").expect("valid key");
        assert_eq!(key.has_prefix(prefix), expected);
        assert_eq!(key.to_string(), "contacts:all");
    }
}
