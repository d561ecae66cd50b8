//! Mutex-guarded account store keyed by normalised e-mail.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserAccountRepository, UserAccountRepositoryError};
use crate::domain::{AccountId, EmailAddress, NewUserAccount, UserAccount};

#[derive(Debug, Default)]
struct AccountTable {
    last_id: i64,
    rows: HashMap<EmailAddress, UserAccount>,
}

/// Account repository holding records in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserAccountRepository {
    table: Mutex<AccountTable>,
}

impl InMemoryUserAccountRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, AccountTable>, UserAccountRepositoryError> {
        self.table
            .lock()
            .map_err(|_| UserAccountRepositoryError::query("account table lock poisoned"))
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        Ok(self.lock()?.rows.get(email).cloned())
    }

    async fn insert(
        &self,
        account: &NewUserAccount,
    ) -> Result<UserAccount, UserAccountRepositoryError> {
        let mut table = self.lock()?;
        if table.rows.contains_key(&account.email) {
            return Err(UserAccountRepositoryError::duplicate_email(
                account.email.as_ref(),
            ));
        }
        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserAccountRepositoryError::query("account id space exhausted"))?;
        let id =
            AccountId::new(next).map_err(|err| UserAccountRepositoryError::query(err.to_string()))?;
        let stored = UserAccount::new(
            id,
            account.email.clone(),
            account.password_hash.clone(),
            None,
        );
        table.last_id = next;
        table.rows.insert(account.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn save(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut table = self.lock()?;
        match table.rows.get_mut(account.email()) {
            Some(slot) if slot.id() == account.id() => {
                *slot = account.clone();
                Ok(())
            }
            _ => Err(UserAccountRepositoryError::query(format!(
                "account {} does not exist",
                account.id()
            ))),
        }
    }
}
