//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{contacts, user_accounts};

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
}

/// Insertable and changeset struct for contact fields.
///
/// Every column is replaced on update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
pub(crate) struct ContactFieldsRow<'a> {
    pub name: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub address: &'a str,
}

/// Row struct for reading from the user_accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserAccountRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub reset_token_fingerprint: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
}

/// Insertable struct for registering accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_accounts)]
pub(crate) struct NewUserAccountRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset applied when saving an account.
///
/// `treat_none_as_null` clears a redeemed reset ticket.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_accounts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserAccountUpdate<'a> {
    pub password_hash: &'a str,
    pub reset_token_fingerprint: Option<&'a str>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
}
