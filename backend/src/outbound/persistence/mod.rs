//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the contact and account repository ports,
//! backed by `diesel-async` over a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   internal to this module.
//! - Pool and Diesel errors map onto the ports' `Connection` and `Query`
//!   variants.
//!
//! # Example
//!
//! ```ignore
//! use addressbook::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/addressbook")).await?;
//! let repo = DieselContactRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_contact_repository;
mod diesel_user_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_account_repository::DieselUserAccountRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
