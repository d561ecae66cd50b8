//! Domain primitives, services and ports.
//!
//! Purpose: own the address book entities, their validation rules and the
//! business services that drive them. Adapters talk to the domain only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Contact, ContactDraft, ContactInput, ContactId: address book entries.
//! - UserAccount and friends: registered users and reset tickets.
//! - AddressBookService, AccountService: driving port implementations.

pub mod account_service;
pub mod accounts;
pub mod address_book_service;
pub mod auth;
pub mod contacts;
pub mod error;
pub mod notifications;
pub mod ports;
pub mod trace_id;

pub use self::account_service::AccountService;
pub use self::accounts::{
    AccountId, AccountValidationError, EmailAddress, NewUserAccount, PasswordHash,
    PasswordResetTicket, UserAccount,
};
pub use self::address_book_service::{
    AddressBookService, CONTACTS_CACHE_PREFIX, CONTACTS_LIST_KEY, DEFAULT_CACHE_TTL,
    contact_not_found, validation_failed,
};
pub use self::auth::{
    AuthValidationError, LoginCredentials, NewPassword, PASSWORD_MAX, PASSWORD_MIN,
    RegistrationRequest,
};
pub use self::contacts::{
    Contact, ContactDraft, ContactFieldError, ContactId, ContactInput, ContactValidationErrors,
    InvalidContactId,
};
pub use self::error::{Error, ErrorCode};
pub use self::notifications::NotificationMessage;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
