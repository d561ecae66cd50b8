//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Identifiers come from the `contacts_id_seq` sequence, so concurrent
//! inserts never share or reuse an id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDraft, ContactId, ContactInput};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ContactFieldsRow, ContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the contact repository port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    map_basic_pool_error(error, ContactRepositoryError::connection)
}

fn map_diesel_error(error: &diesel::result::Error) -> ContactRepositoryError {
    map_basic_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

fn fields_row(draft: &ContactDraft) -> ContactFieldsRow<'_> {
    ContactFieldsRow {
        name: draft.name(),
        phone_number: draft.phone_number(),
        email: draft.email(),
        address: draft.address(),
    }
}

/// Convert a database row into a validated domain contact.
fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let ContactRow {
        id,
        name,
        phone_number,
        email,
        address,
    } = row;

    let id = ContactId::new(id).map_err(|err| ContactRepositoryError::query(err.to_string()))?;
    let draft = ContactDraft::validate(&ContactInput {
        name,
        phone_number,
        email,
        address,
    })
    .map_err(|errors| {
        ContactRepositoryError::query(format!("stored contact {id} is invalid: {errors}"))
    })?;
    Ok(Contact::new(id, draft))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .select(ContactRow::as_select())
            .order(contacts::id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(id.get())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_contact).transpose()
    }

    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&fields_row(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        row_to_contact(row)
    }

    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = diesel::update(contacts::table.find(id.get()))
            .set(&fields_row(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;

        row.map(row_to_contact).transpose()
    }

    async fn delete(&self, id: ContactId) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(contacts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;

        Ok(removed > 0)
    }
}
