//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Login, PasswordDigest, Role, User, UserAccount, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        DieselFailure::UniqueViolation(_) => UserPersistenceError::query("login already taken"),
    }
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let UserRow {
        id,
        login,
        role,
        password_digest,
    } = row;
    let invalid = |field: &str, err: &dyn std::fmt::Display| {
        warn!(user_id = %id, field, error = %err, "stored user row is invalid");
        UserPersistenceError::query(format!("stored user {field} is invalid"))
    };
    let login = Login::new(login).map_err(|err| invalid("login", &err))?;
    let role = role.parse::<Role>().map_err(|err| invalid("role", &err))?;
    let password_digest =
        PasswordDigest::from_phc(password_digest).map_err(|err| invalid("password_digest", &err))?;
    Ok(UserAccount {
        user: User::new(UserId::from_uuid(id), login, role),
        password_digest,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = NewUserRow {
            id: *account.user.id().as_uuid(),
            login: account.user.login().as_ref(),
            role: account.user.role().authority(),
            password_digest: account.password_digest.as_ref(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::login)
            .do_update()
            .set((
                users::role.eq(excluded(users::role)),
                users::password_digest.eq(excluded(users::password_digest)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account)
            .transpose()
            .map(|account| account.map(|account| account.user))
    }

    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::login.eq(login.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }
}
