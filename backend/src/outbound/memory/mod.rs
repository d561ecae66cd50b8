//! In-process adapters used when no database or Redis URL is configured and
//! by black-box HTTP tests.
//!
//! State lives behind a single [`std::sync::Mutex`] per adapter. A poisoned
//! lock is reported as a query/backend error rather than a panic.

mod contact_repository;
mod response_cache;
mod user_account_repository;

pub use contact_repository::InMemoryContactRepository;
pub use response_cache::InMemoryResponseCache;
pub use user_account_repository::InMemoryUserAccountRepository;
