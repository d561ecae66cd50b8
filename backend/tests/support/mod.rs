//! Shared wiring for black-box HTTP tests over the in-process adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use addressbook::domain::ports::PasswordResetMailer;
use addressbook::domain::{AccountService, AddressBookService};
use addressbook::inbound::http::state::HttpState;
use addressbook::outbound::memory::{
    InMemoryContactRepository, InMemoryResponseCache, InMemoryUserAccountRepository,
};
use addressbook::outbound::queue::{LoggingBroker, QueuedNotificationPublisher};
use addressbook::outbound::security::{
    Argon2PasswordHasher, JwtSettings, JwtTokenService, SigningSecret,
};

/// Build HTTP state over fresh in-memory adapters.
///
/// Must be called inside a Tokio runtime; the notification worker is spawned
/// onto it.
pub fn in_memory_state(mailer: Arc<dyn PasswordResetMailer>) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (publisher, _worker) = QueuedNotificationPublisher::spawn(Arc::new(LoggingBroker), 16);
    let contacts = Arc::new(AddressBookService::new(
        Arc::new(InMemoryContactRepository::new()),
        Arc::new(InMemoryResponseCache::new(clock.clone())),
        Arc::new(publisher),
        clock.clone(),
    ));

    let secret = SigningSecret::from_bytes(&[7_u8; 32]).expect("valid test secret");
    let tokens = JwtTokenService::new(
        &secret,
        JwtSettings {
            issuer: "addressbook".to_owned(),
            audience: "addressbook-clients".to_owned(),
            access_ttl: chrono::Duration::minutes(60),
            reset_ttl: chrono::Duration::minutes(15),
        },
    );
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserAccountRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(tokens),
        mailer,
        clock,
    ));

    web::Data::new(HttpState::new(contacts.clone(), contacts, accounts))
}
