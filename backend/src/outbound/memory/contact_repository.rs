//! Mutex-guarded contact store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDraft, ContactId};

#[derive(Debug, Default)]
struct ContactTable {
    last_id: i64,
    rows: BTreeMap<ContactId, Contact>,
}

/// Contact repository holding records in memory.
///
/// The identifier counter shares the mutex with the record map, so
/// concurrent inserts never observe or hand out the same identifier.
/// Identifiers are never reused after deletion.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    table: Mutex<ContactTable>,
}

impl InMemoryContactRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ContactTable>, ContactRepositoryError> {
        self.table
            .lock()
            .map_err(|_| ContactRepositoryError::query("contact table lock poisoned"))
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError> {
        let mut table = self.lock()?;
        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ContactRepositoryError::query("contact id space exhausted"))?;
        let id = ContactId::new(next)
            .map_err(|err| ContactRepositoryError::query(err.to_string()))?;
        let contact = Contact::new(id, draft.clone());
        table.last_id = next;
        table.rows.insert(id, contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut table = self.lock()?;
        Ok(table.rows.get_mut(&id).map(|slot| {
            *slot = Contact::new(id, draft.clone());
            slot.clone()
        }))
    }

    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}
