//! Driving port for contact mutations.

use async_trait::async_trait;

use crate::domain::{ContactId, ContactInput, Error};

use super::ContactPayload;

/// Driving port for contact write operations.
///
/// Inputs are validated before any lookup, so an invalid update against an
/// unknown identifier reports the validation failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Validate and store a new contact.
    async fn add_contact(&self, input: ContactInput) -> Result<ContactPayload, Error>;

    /// Validate and replace an existing contact.
    async fn update_contact(
        &self,
        id: ContactId,
        input: ContactInput,
    ) -> Result<ContactPayload, Error>;

    /// Remove an existing contact.
    async fn delete_contact(&self, id: ContactId) -> Result<(), Error>;
}
