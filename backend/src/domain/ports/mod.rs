//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, cache, broker, hasher, tokens, mailer) expose
//! strongly typed errors so adapters map their failures into predictable
//! variants. Driving ports (`ContactsQuery`, `ContactsCommand`,
//! `AccountsCommand`) speak the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod cache_key;
mod contact_repository;
mod contacts_command;
mod contacts_query;
mod notification_publisher;
mod password_hasher;
mod password_reset_mailer;
mod response_cache;
mod token_service;
mod user_account_repository;

#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{AccessGrant, AccountsCommand};
pub use cache_key::{CacheKey, CacheKeyValidationError};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use contacts_command::MockContactsCommand;
pub use contacts_command::ContactsCommand;
#[cfg(test)]
pub use contacts_query::MockContactsQuery;
pub use contacts_query::{ContactPayload, ContactsQuery};
#[cfg(test)]
pub use notification_publisher::{MockNotificationBroker, MockNotificationPublisher};
pub use notification_publisher::{
    NotificationBroker, NotificationBrokerError, NotificationPublisher,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use password_reset_mailer::MockPasswordResetMailer;
pub use password_reset_mailer::{PasswordResetMailer, PasswordResetMailerError};
#[cfg(test)]
pub use response_cache::MockResponseCache;
pub use response_cache::{ResponseCache, ResponseCacheError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, ResetClaims, TokenService, TokenServiceError};
#[cfg(test)]
pub use user_account_repository::MockUserAccountRepository;
pub use user_account_repository::{UserAccountRepository, UserAccountRepositoryError};
