//! PostgreSQL-backed `UserAccountRepository` implementation using Diesel ORM.
//!
//! E-mail uniqueness is enforced by the `user_accounts_email_key` constraint;
//! a violation on insert surfaces as `DuplicateEmail`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserAccountRepository, UserAccountRepositoryError};
use crate::domain::{
    AccountId, EmailAddress, NewUserAccount, PasswordHash, PasswordResetTicket, UserAccount,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserAccountRow, UserAccountRow, UserAccountUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::user_accounts;

/// Diesel-backed implementation of the user account repository port.
#[derive(Clone)]
pub struct DieselUserAccountRepository {
    pool: DbPool,
}

impl DieselUserAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserAccountRepositoryError {
    map_basic_pool_error(error, UserAccountRepositoryError::connection)
}

fn map_diesel_error(error: &diesel::result::Error) -> UserAccountRepositoryError {
    map_basic_diesel_error(
        error,
        UserAccountRepositoryError::query,
        UserAccountRepositoryError::connection,
    )
}

fn corrupt(err: impl std::fmt::Display) -> UserAccountRepositoryError {
    UserAccountRepositoryError::query(format!("stored account is invalid: {err}"))
}

/// Convert a database row into a domain account.
fn row_to_account(row: UserAccountRow) -> Result<UserAccount, UserAccountRepositoryError> {
    let UserAccountRow {
        id,
        email,
        password_hash,
        reset_token_fingerprint,
        reset_token_expires_at,
    } = row;

    let reset_ticket = match (reset_token_fingerprint, reset_token_expires_at) {
        (Some(fingerprint), Some(expires_at)) => {
            Some(PasswordResetTicket::from_parts(fingerprint, expires_at))
        }
        (None, None) => None,
        _ => return Err(corrupt("partial reset ticket")),
    };

    Ok(UserAccount::new(
        AccountId::new(id).map_err(corrupt)?,
        EmailAddress::parse(&email).map_err(corrupt)?,
        PasswordHash::new(password_hash).map_err(corrupt)?,
        reset_ticket,
    ))
}

fn account_update(account: &UserAccount) -> UserAccountUpdate<'_> {
    let ticket = account.reset_ticket();
    UserAccountUpdate {
        password_hash: account.password_hash().as_str(),
        reset_token_fingerprint: ticket.map(PasswordResetTicket::token_fingerprint),
        reset_token_expires_at: ticket.map(PasswordResetTicket::expires_at),
    }
}

#[async_trait]
impl UserAccountRepository for DieselUserAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserAccountRow> = user_accounts::table
            .filter(user_accounts::email.eq(email.as_ref()))
            .select(UserAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_account).transpose()
    }

    async fn insert(
        &self,
        account: &NewUserAccount,
    ) -> Result<UserAccount, UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserAccountRow {
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_str(),
        };
        let row: UserAccountRow = diesel::insert_into(user_accounts::table)
            .values(&new_row)
            .returning(UserAccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserAccountRepositoryError::duplicate_email(account.email.as_ref())
                } else {
                    map_diesel_error(&err)
                }
            })?;

        row_to_account(row)
    }

    async fn save(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(user_accounts::table.find(account.id().get()))
            .set(&account_update(account))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        if updated == 0 {
            return Err(UserAccountRepositoryError::query(format!(
                "account {} does not exist",
                account.id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn row(
        reset_token_fingerprint: Option<String>,
        reset_token_expires_at: Option<chrono::DateTime<Utc>>,
    ) -> UserAccountRow {
        UserAccountRow {
            id: 11,
            email: "lin@example.com".to_owned(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
            reset_token_fingerprint,
            reset_token_expires_at,
        }
    }

    #[rstest]
    fn row_without_ticket_converts() {
        let account = row_to_account(row(None, None)).expect("valid row");

        assert_eq!(account.id().get(), 11);
        assert_eq!(account.email().as_ref(), "lin@example.com");
        assert!(account.reset_ticket().is_none());
    }

    #[rstest]
    fn row_with_ticket_round_trips_through_update() {
        let expires_at = Utc
            .with_ymd_and_hms(2026, 5, 1, 12, 15, 0)
            .single()
            .expect("valid timestamp");
        let fingerprint = PasswordResetTicket::fingerprint("reset-token");
        let account =
            row_to_account(row(Some(fingerprint.clone()), Some(expires_at))).expect("valid row");

        let update = account_update(&account);

        assert_eq!(update.reset_token_fingerprint, Some(fingerprint.as_str()));
        assert_eq!(update.reset_token_expires_at, Some(expires_at));
    }

    #[rstest]
    fn partial_ticket_is_rejected() {
        let error = row_to_account(row(Some("abc".to_owned()), None)).expect_err("corrupt row");

        assert!(matches!(error, UserAccountRepositoryError::Query { .. }));
    }
}
