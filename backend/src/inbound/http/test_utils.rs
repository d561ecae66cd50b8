//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockAccountsCommand, MockContactsCommand, MockContactsQuery};
use crate::inbound::http::state::HttpState;

/// Mocks backing an [`HttpState`]; unset expectations fail the test.
#[derive(Default)]
pub struct MockPorts {
    pub contacts_query: MockContactsQuery,
    pub contacts: MockContactsCommand,
    pub accounts: MockAccountsCommand,
}

impl MockPorts {
    /// Wrap the mocks as handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.contacts_query),
            Arc::new(self.contacts),
            Arc::new(self.accounts),
        ))
    }
}
