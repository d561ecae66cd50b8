//! Messages handed to the notification broker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Contact, TraceId};

/// Plain-text notification describing a domain event.
///
/// # Examples
/// ```
/// use addressbook::domain::{Contact, ContactDraft, ContactId, ContactInput, NotificationMessage};
/// use chrono::Utc;
///
/// let draft = ContactDraft::validate(&ContactInput {
///     name: "Ada".into(),
///     phone_number: "5550100100".into(),
///     email: "ada@example.com".into(),
///     address: "London".into(),
/// })
/// .unwrap();
/// let contact = Contact::new(ContactId::new(3).unwrap(), draft);
/// let message = NotificationMessage::contact_created(&contact, Utc::now());
/// assert_eq!(message.body, "New contact added: Ada, ada@example.com, 5550100100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    /// Short event name, e.g. `contact.created`.
    pub subject: String,
    /// Human-readable description.
    pub body: String,
    /// Trace identifier of the request that caused the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// When the event happened.
    pub occurred_at: DateTime<Utc>,
}

impl NotificationMessage {
    /// Subject used for contact creation events.
    pub const CONTACT_CREATED: &'static str = "contact.created";

    /// Describe a newly added contact, tagging it with the current trace id.
    #[must_use]
    pub fn contact_created(contact: &Contact, occurred_at: DateTime<Utc>) -> Self {
        Self {
            subject: Self::CONTACT_CREATED.to_owned(),
            body: format!(
                "New contact added: {}, {}, {}",
                contact.name(),
                contact.email(),
                contact.phone_number()
            ),
            trace_id: TraceId::current().map(|id| id.to_string()),
            occurred_at,
        }
    }
}
