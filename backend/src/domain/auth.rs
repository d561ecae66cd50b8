//! Authentication primitives: login credentials, registration requests and
//! replacement passwords.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Plain-text passwords are held in [`Zeroizing`] buffers.

use std::fmt;

use zeroize::Zeroizing;

use super::accounts::{AccountValidationError, EmailAddress};
use super::contacts::EMAIL_MAX;

/// Minimum password length in characters.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length in characters.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthValidationError {
    /// E-mail was missing or blank once trimmed.
    EmptyEmail,
    /// E-mail does not look like `local@domain.tld`.
    InvalidEmail,
    /// E-mail longer than [`EMAIL_MAX`].
    EmailTooLong,
    /// Password was blank.
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort,
    /// Password longer than [`PASSWORD_MAX`].
    PasswordTooLong,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "Email is required."),
            Self::InvalidEmail => write!(f, "Email must be a valid email address."),
            Self::EmailTooLong => write!(f, "Email must not exceed {EMAIL_MAX} characters."),
            Self::EmptyPassword => write!(f, "Password is required."),
            Self::PasswordTooShort => {
                write!(f, "Password must be at least {PASSWORD_MIN} characters.")
            }
            Self::PasswordTooLong => {
                write!(f, "Password must not exceed {PASSWORD_MAX} characters.")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<AccountValidationError> for AuthValidationError {
    fn from(value: AccountValidationError) -> Self {
        match value {
            AccountValidationError::EmptyEmail => Self::EmptyEmail,
            AccountValidationError::EmailTooLong => Self::EmailTooLong,
            _ => Self::InvalidEmail,
        }
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and non-empty. Its shape is not checked:
///   an unknown address fails the same way as a wrong password.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use addressbook::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com", "hunter22").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised e-mail suitable for account lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// A password that satisfies the length policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Check the length policy, counted in characters.
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        let len = raw.chars().count();
        if len == 0 {
            return Err(AuthValidationError::EmptyPassword);
        }
        if len < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort);
        }
        if len > PASSWORD_MAX {
            return Err(AuthValidationError::PasswordTooLong);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plain-text password.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated registration request.
///
/// # Examples
/// ```
/// use addressbook::domain::RegistrationRequest;
///
/// let request = RegistrationRequest::try_from_parts("new@example.com", "longenough").unwrap();
/// assert_eq!(request.email().as_ref(), "new@example.com");
/// assert!(RegistrationRequest::try_from_parts("new@example.com", "short").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    email: EmailAddress,
    password: NewPassword,
}

impl RegistrationRequest {
    /// Validate a raw e-mail and password pair.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::parse(email)?;
        let password = NewPassword::new(password)?;
        Ok(Self { email, password })
    }

    /// Normalised e-mail to register.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &NewPassword {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AuthValidationError::EmptyEmail)]
    #[case("   ", "pw", AuthValidationError::EmptyEmail)]
    #[case("user@example.com", "", AuthValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  Admin@Example.com  ", "secret")]
    #[case("alice@example.com", " correct horse battery staple ")]
    fn valid_credentials_normalise_email(#[case] email: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim().to_lowercase());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case(0, Err(AuthValidationError::EmptyPassword))]
    #[case(PASSWORD_MIN - 1, Err(AuthValidationError::PasswordTooShort))]
    #[case(PASSWORD_MIN, Ok(()))]
    #[case(PASSWORD_MAX, Ok(()))]
    #[case(PASSWORD_MAX + 1, Err(AuthValidationError::PasswordTooLong))]
    fn new_password_length_policy(
        #[case] len: usize,
        #[case] expected: Result<(), AuthValidationError>,
    ) {
        let raw = "ß".repeat(len);
        assert_eq!(NewPassword::new(&raw).map(|_| ()), expected);
    }

    #[rstest]
    fn registration_reports_invalid_email_first() {
        let err = RegistrationRequest::try_from_parts("nope", "short").expect_err("invalid");
        assert_eq!(err, AuthValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Email must be a valid email address.");
    }

    #[rstest]
    fn registration_rejects_email_longer_than_column() {
        let email = format!("{}@example.com", "a".repeat(EMAIL_MAX));
        let err = RegistrationRequest::try_from_parts(&email, "long enough").expect_err("too long");
        assert_eq!(err, AuthValidationError::EmailTooLong);
        assert_eq!(err.to_string(), "Email must not exceed 320 characters.");
    }
}
