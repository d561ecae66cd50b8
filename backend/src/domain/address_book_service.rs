//! Address book domain service.
//!
//! Implements the contact driving ports over a [`ContactRepository`], caching
//! the full listing in a [`ResponseCache`] and announcing new contacts through
//! a [`NotificationPublisher`].
//!
//! The cache is advisory: read and write failures are logged and the
//! repository answers instead. Every successful mutation bumps a write
//! generation and invalidates the `contacts:` prefix before returning. A
//! listing read is only cached when no write generation passed while it ran.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CacheKey, ContactPayload, ContactRepository, ContactRepositoryError, ContactsCommand,
    ContactsQuery, NotificationPublisher, ResponseCache,
};
use crate::domain::{
    ContactDraft, ContactId, ContactInput, ContactValidationErrors, Error, NotificationMessage,
};

/// Prefix shared by every cache entry derived from contact data.
pub const CONTACTS_CACHE_PREFIX: &str = "contacts:";
/// Cache key holding the serialised contact listing.
pub const CONTACTS_LIST_KEY: &str = "contacts:all";
/// Listing lifetime used when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

/// Invalid-request error listing every validation message in `details`.
#[must_use]
pub fn validation_failed(errors: &ContactValidationErrors) -> Error {
    Error::invalid_request("Validation failed.").with_details(json!(errors.messages()))
}

/// Not-found error naming the requested contact identifier.
#[must_use]
pub fn contact_not_found(id: i64) -> Error {
    Error::not_found(format!("Contact with ID {id} not found."))
}

fn not_found(id: ContactId) -> Error {
    contact_not_found(id.get())
}

fn listing_key() -> Result<CacheKey, Error> {
    CacheKey::new(CONTACTS_LIST_KEY)
        .map_err(|err| Error::internal(format!("invalid contact cache key: {err}")))
}

/// Contact service implementing [`ContactsQuery`] and [`ContactsCommand`].
#[derive(Clone)]
pub struct AddressBookService<R> {
    contacts: Arc<R>,
    cache: Arc<dyn ResponseCache>,
    notifications: Arc<dyn NotificationPublisher>,
    clock: Arc<dyn Clock>,
    cache_ttl: Duration,
    write_generation: Arc<AtomicU64>,
}

impl<R> AddressBookService<R> {
    /// Create a service with the default listing lifetime.
    pub fn new(
        contacts: Arc<R>,
        cache: Arc<dyn ResponseCache>,
        notifications: Arc<dyn NotificationPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contacts,
            cache,
            notifications,
            clock,
            cache_ttl: DEFAULT_CACHE_TTL,
            write_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Override how long the cached listing lives.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    async fn cached_listing(&self, key: &CacheKey) -> Option<Vec<ContactPayload>> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(listing) => {
                    debug!(%key, "contact listing served from cache");
                    Some(listing)
                }
                Err(error) => {
                    warn!(%error, %key, "discarding undecodable cached contact listing");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(%error, %key, "response cache read failed; using repository");
                None
            }
        }
    }

    fn current_generation(&self) -> u64 {
        self.write_generation.load(Ordering::SeqCst)
    }

    /// Cache `listing` unless a write committed since `generation` was read.
    ///
    /// The generation is checked again after the write lands: a mutation
    /// that bumped it in between may have invalidated before our `set`.
    async fn store_listing(&self, key: &CacheKey, listing: &[ContactPayload], generation: u64) {
        if self.current_generation() != generation {
            debug!(%key, "skipping cache fill; contacts changed during read");
            return;
        }
        let raw = match serde_json::to_string(listing) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, %key, "failed to serialise contact listing for cache");
                return;
            }
        };
        if let Err(error) = self.cache.set(key, &raw, self.cache_ttl).await {
            warn!(%error, %key, "response cache write failed");
            return;
        }
        if self.current_generation() != generation {
            debug!(%key, "dropping cache fill raced by a write");
            if let Err(error) = self.cache.invalidate(key).await {
                warn!(%error, %key, "response cache invalidation failed");
            }
        }
    }

    async fn invalidate_contacts(&self) {
        self.write_generation.fetch_add(1, Ordering::SeqCst);
        if let Err(error) = self.cache.invalidate_prefix(CONTACTS_CACHE_PREFIX).await {
            warn!(%error, prefix = CONTACTS_CACHE_PREFIX, "response cache invalidation failed");
        }
    }
}

#[async_trait]
impl<R> ContactsQuery for AddressBookService<R>
where
    R: ContactRepository,
{
    async fn list_contacts(&self) -> Result<Vec<ContactPayload>, Error> {
        let key = listing_key()?;
        if let Some(listing) = self.cached_listing(&key).await {
            return Ok(listing);
        }

        let generation = self.current_generation();
        let listing: Vec<ContactPayload> = self
            .contacts
            .list_all()
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(ContactPayload::from)
            .collect();

        self.store_listing(&key, &listing, generation).await;
        Ok(listing)
    }

    async fn get_contact(&self, id: ContactId) -> Result<ContactPayload, Error> {
        self.contacts
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .map(ContactPayload::from)
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> ContactsCommand for AddressBookService<R>
where
    R: ContactRepository,
{
    async fn add_contact(&self, input: ContactInput) -> Result<ContactPayload, Error> {
        let draft = ContactDraft::validate(&input).map_err(|errors| validation_failed(&errors))?;
        let contact = self
            .contacts
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;

        self.invalidate_contacts().await;
        self.notifications
            .publish(NotificationMessage::contact_created(&contact, self.clock.utc()));
        info!(contact_id = %contact.id(), "contact added");

        Ok(ContactPayload::from(contact))
    }

    async fn update_contact(
        &self,
        id: ContactId,
        input: ContactInput,
    ) -> Result<ContactPayload, Error> {
        let draft = ContactDraft::validate(&input).map_err(|errors| validation_failed(&errors))?;
        let contact = self
            .contacts
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        self.invalidate_contacts().await;
        info!(contact_id = %id, "contact updated");

        Ok(ContactPayload::from(contact))
    }

    async fn delete_contact(&self, id: ContactId) -> Result<(), Error> {
        let removed = self
            .contacts
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(not_found(id));
        }

        self.invalidate_contacts().await;
        info!(contact_id = %id, "contact deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "address_book_service_tests.rs"]
mod tests;
