//! Driving port for contact read operations.
//!
//! Inbound adapters use this port to read contacts without depending on the
//! repository or cache behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Contact, ContactId, Error};

/// Serializable contact shape returned by the driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
}

impl From<Contact> for ContactPayload {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_owned(),
            phone_number: value.phone_number().to_owned(),
            email: value.email().to_owned(),
            address: value.address().to_owned(),
        }
    }
}

/// Driving port for contact read operations.
///
/// # Examples
///
/// ```rust,no_run
/// # use addressbook::domain::ContactId;
/// # use addressbook::domain::ports::ContactsQuery;
/// # async fn example(query: &dyn ContactsQuery) -> Result<(), addressbook::domain::Error> {
/// let all = query.list_contacts().await?;
/// if let Some(first) = all.first() {
///     let id = ContactId::new(first.id).expect("stored ids are positive");
///     let again = query.get_contact(id).await?;
///     assert_eq!(&again, first);
/// }
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Every contact ordered by identifier.
    async fn list_contacts(&self) -> Result<Vec<ContactPayload>, Error>;

    /// One contact, or a not-found error naming the identifier.
    async fn get_contact(&self, id: ContactId) -> Result<ContactPayload, Error>;
}
