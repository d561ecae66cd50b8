//! Field rules applied before a contact is added or updated.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::{ContactDraft, ContactInput};

/// Maximum number of characters in a contact name.
pub const NAME_MAX: usize = 100;
/// Maximum number of characters in a postal address.
pub const ADDRESS_MAX: usize = 250;
/// Maximum number of characters in an e-mail address.
pub const EMAIL_MAX: usize = 320;
/// Exact number of digits in a phone number.
pub const PHONE_DIGITS: usize = 10;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local@domain.tld; the domain needs at least one dot-separated label.
        let pattern = r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` has the shape `local@domain.tld`.
pub(crate) fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Whether `value` fits the stored e-mail column.
pub(crate) fn email_within_limit(value: &str) -> bool {
    value.chars().count() <= EMAIL_MAX
}

/// A single failed field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFieldError {
    /// Name is blank.
    NameRequired,
    /// Name exceeds [`NAME_MAX`] characters.
    NameTooLong,
    /// Phone number is blank.
    PhoneRequired,
    /// Phone number is not exactly [`PHONE_DIGITS`] digits.
    PhoneInvalid,
    /// E-mail is blank.
    EmailRequired,
    /// E-mail does not look like `local@domain.tld`.
    EmailInvalid,
    /// E-mail exceeds [`EMAIL_MAX`] characters.
    EmailTooLong,
    /// Address is blank.
    AddressRequired,
    /// Address exceeds [`ADDRESS_MAX`] characters.
    AddressTooLong,
}

impl fmt::Display for ContactFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "Name is required."),
            Self::NameTooLong => write!(f, "Name must not exceed {NAME_MAX} characters."),
            Self::PhoneRequired => write!(f, "Phone number is required."),
            Self::PhoneInvalid => {
                write!(f, "Phone number must be exactly {PHONE_DIGITS} digits.")
            }
            Self::EmailRequired => write!(f, "Email is required."),
            Self::EmailInvalid => write!(f, "Email must be a valid email address."),
            Self::EmailTooLong => write!(f, "Email must not exceed {EMAIL_MAX} characters."),
            Self::AddressRequired => write!(f, "Address is required."),
            Self::AddressTooLong => {
                write!(f, "Address must not exceed {ADDRESS_MAX} characters.")
            }
        }
    }
}

/// Every rule a contact input failed, in field order.
///
/// ## Invariants
/// - Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationErrors(Vec<ContactFieldError>);

impl ContactValidationErrors {
    /// Failed rules in field order.
    #[must_use]
    pub fn errors(&self) -> &[ContactFieldError] {
        self.0.as_slice()
    }

    /// Human-readable messages, one per failed rule.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ContactValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

impl std::error::Error for ContactValidationErrors {}

fn check_name(value: &str, errors: &mut Vec<ContactFieldError>) {
    if value.is_empty() {
        errors.push(ContactFieldError::NameRequired);
    } else if value.chars().count() > NAME_MAX {
        errors.push(ContactFieldError::NameTooLong);
    }
}

fn check_phone(value: &str, errors: &mut Vec<ContactFieldError>) {
    if value.is_empty() {
        errors.push(ContactFieldError::PhoneRequired);
    } else if value.len() != PHONE_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(ContactFieldError::PhoneInvalid);
    }
}

fn check_email(value: &str, errors: &mut Vec<ContactFieldError>) {
    if value.is_empty() {
        errors.push(ContactFieldError::EmailRequired);
    } else if !email_within_limit(value) {
        errors.push(ContactFieldError::EmailTooLong);
    } else if !is_valid_email(value) {
        errors.push(ContactFieldError::EmailInvalid);
    }
}

fn check_address(value: &str, errors: &mut Vec<ContactFieldError>) {
    if value.is_empty() {
        errors.push(ContactFieldError::AddressRequired);
    } else if value.chars().count() > ADDRESS_MAX {
        errors.push(ContactFieldError::AddressTooLong);
    }
}

impl ContactDraft {
    /// Validate raw input, collecting every failed rule rather than stopping
    /// at the first.
    ///
    /// # Examples
    /// ```
    /// use addressbook::domain::{ContactDraft, ContactInput};
    ///
    /// let errors = ContactDraft::validate(&ContactInput::default())
    ///     .expect_err("blank input is rejected");
    /// assert_eq!(errors.errors().len(), 4);
    /// ```
    pub fn validate(input: &ContactInput) -> Result<Self, ContactValidationErrors> {
        let name = input.name.trim();
        let phone_number = input.phone_number.trim();
        let email = input.email.trim();
        let address = input.address.trim();

        let mut errors = Vec::new();
        check_name(name, &mut errors);
        check_phone(phone_number, &mut errors);
        check_email(email, &mut errors);
        check_address(address, &mut errors);

        if !errors.is_empty() {
            return Err(ContactValidationErrors(errors));
        }

        Ok(Self {
            name: name.to_owned(),
            phone_number: phone_number.to_owned(),
            email: email.to_owned(),
            address: address.to_owned(),
        })
    }
}
