//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountsCommand, ContactsCommand, ContactsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Contact reads.
    pub contacts_query: Arc<dyn ContactsQuery>,
    /// Contact writes.
    pub contacts: Arc<dyn ContactsCommand>,
    /// Registration, login and password reset.
    pub accounts: Arc<dyn AccountsCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        contacts_query: Arc<dyn ContactsQuery>,
        contacts: Arc<dyn ContactsCommand>,
        accounts: Arc<dyn AccountsCommand>,
    ) -> Self {
        Self {
            contacts_query,
            contacts,
            accounts,
        }
    }
}
