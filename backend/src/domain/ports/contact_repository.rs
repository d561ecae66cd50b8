//! Port abstraction for contact persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

/// Storage for address book contacts.
///
/// Unknown identifiers are reported through `None` or `false`, never as an
/// error. `insert` assigns an identifier strictly greater than every
/// identifier assigned before it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every stored contact ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Store a new contact and return it with its assigned identifier.
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError>;

    /// Replace every field of an existing contact.
    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Remove a contact, returning whether it existed.
    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError>;
}
