//! Port abstraction for user account persistence and its errors.
use async_trait::async_trait;

use crate::domain::{Login, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert an account or replace the role and digest of an existing login.
    async fn upsert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account, with its credential digest, by login.
    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;
}
