//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: in-process repositories and cache for development and tests
//! - **cache**: Redis response cache
//! - **queue**: notification queue and brokers
//! - **security**: Argon2 password hashing and JWT tokens
//! - **mail**: password reset link delivery
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod mail;
pub mod memory;
pub mod persistence;
pub mod queue;
pub mod redis;
pub mod security;
