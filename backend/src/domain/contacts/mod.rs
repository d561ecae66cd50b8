//! Address book contacts.
//!
//! A [`Contact`] is only ever built from a [`ContactDraft`], and a draft is
//! only ever produced by validating a raw [`ContactInput`]. Repositories
//! therefore never see unvalidated field values.

mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) use self::validation::{email_within_limit, is_valid_email};
pub use self::validation::{
    ADDRESS_MAX, ContactFieldError, ContactValidationErrors, EMAIL_MAX, NAME_MAX, PHONE_DIGITS,
};

/// Validation error raised when a contact identifier is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("contact id must be positive, got {0}")]
pub struct InvalidContactId(pub i64);

/// Store-assigned contact identifier.
///
/// ## Invariants
/// - Always strictly positive.
///
/// # Examples
/// ```
/// use addressbook::domain::ContactId;
///
/// let id = ContactId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(ContactId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ContactId(i64);

impl ContactId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, InvalidContactId> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(InvalidContactId(raw))
        }
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ContactId {
    type Error = InvalidContactId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactId> for i64 {
    fn from(value: ContactId) -> Self {
        value.0
    }
}

/// Raw, unvalidated contact fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    /// Full name.
    pub name: String,
    /// Phone number; expected to be ten digits.
    pub phone_number: String,
    /// E-mail address.
    pub email: String,
    /// Postal address.
    pub address: String,
}

/// Contact fields that passed validation, ready to be stored.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
/// - `name` has at most [`NAME_MAX`] characters and `address` at most
///   [`ADDRESS_MAX`].
/// - `phone_number` is exactly [`PHONE_DIGITS`] ASCII digits.
/// - `email` has the shape `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    phone_number: String,
    email: String,
    address: String,
}

impl ContactDraft {
    /// Contact name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Ten-digit phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        self.phone_number.as_str()
    }

    /// E-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }
}

/// A stored contact.
///
/// # Examples
/// ```
/// use addressbook::domain::{Contact, ContactDraft, ContactId, ContactInput};
///
/// let draft = ContactDraft::validate(&ContactInput {
///     name: "Ada Lovelace".into(),
///     phone_number: "5550100100".into(),
///     email: "ada@example.com".into(),
///     address: "12 St James's Square".into(),
/// })
/// .expect("valid contact");
/// let contact = Contact::new(ContactId::new(1).expect("positive"), draft);
/// assert_eq!(contact.id().get(), 1);
/// assert_eq!(contact.name(), "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    fields: ContactDraft,
}

impl Contact {
    /// Attach an identifier to validated contact fields.
    #[must_use]
    pub fn new(id: ContactId, fields: ContactDraft) -> Self {
        Self { id, fields }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Contact name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.fields.name()
    }

    /// Ten-digit phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        self.fields.phone_number()
    }

    /// E-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.fields.email()
    }

    /// Postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.fields.address()
    }

    /// Borrow the validated field set.
    #[must_use]
    pub fn fields(&self) -> &ContactDraft {
        &self.fields
    }
}

#[cfg(test)]
mod tests;
