//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Address book contacts.
    ///
    /// `id` is a `BIGSERIAL`, so identifiers only ever increase.
    contacts (id) {
        /// Primary key assigned by the database sequence.
        id -> Int8,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Ten digit phone number.
        phone_number -> Varchar,
        /// Contact e-mail.
        email -> Varchar,
        /// Postal address (max 250 characters).
        address -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered user accounts.
    user_accounts (id) {
        /// Primary key assigned by the database sequence.
        id -> Int8,
        /// Lowercase login e-mail, unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// SHA-256 hex fingerprint of the outstanding reset token.
        reset_token_fingerprint -> Nullable<Varchar>,
        /// Expiry of the outstanding reset token.
        reset_token_expires_at -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
