//! `UserRepository` backed by an in-process map.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Login, User, UserAccount, UserId};

/// Accounts keyed by login.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<Login, UserAccount>>,
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

impl InMemoryUserRepository {
    /// Create a store holding `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.user.login().clone(), account))
            .collect();
        Self {
            accounts: RwLock::new(map),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut guard = self.accounts.write().map_err(|_| poisoned())?;
        let login = account.user.login().clone();
        let stored = match guard.get(&login) {
            // An existing login keeps its id; only role and digest change.
            Some(existing) => UserAccount {
                user: User::new(existing.user.id().clone(), login.clone(), account.user.role()),
                password_digest: account.password_digest.clone(),
            },
            None => account.clone(),
        };
        guard.insert(login, stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let guard = self.accounts.read().map_err(|_| poisoned())?;
        Ok(guard
            .values()
            .find(|account| account.user.id() == id)
            .map(|account| account.user.clone()))
    }

    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let guard = self.accounts.read().map_err(|_| poisoned())?;
        Ok(guard.get(login).cloned())
    }
}
