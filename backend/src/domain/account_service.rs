//! Account-backed authentication services.
//!
//! [`AccountLoginService`] checks credentials against stored digests and
//! [`AccountCallerResolver`] turns a session's user id back into a
//! [`Caller`]. Both sit on top of a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CallerResolver, LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Caller, Error, Login, LoginCredentials, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// [`LoginService`] comparing password digests held by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountLoginService<U> {
    users: Arc<U>,
}

impl<U> AccountLoginService<U> {
    /// Create a login service over `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> LoginService for AccountLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        // Logins that cannot exist fail the same way as a wrong password.
        let Ok(login) = Login::new(credentials.login()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let account = self
            .users
            .find_by_login(&login)
            .await
            .map_err(map_user_error)?;
        match account {
            Some(account) if account.password_digest.matches(credentials.password()) => {
                Ok(account.user.id().clone())
            }
            _ => {
                debug!(login = %login, "credential check failed");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

/// [`CallerResolver`] reading users from a [`UserRepository`].
#[derive(Clone)]
pub struct AccountCallerResolver<U> {
    users: Arc<U>,
}

impl<U> AccountCallerResolver<U> {
    /// Create a resolver over `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> CallerResolver for AccountCallerResolver<U>
where
    U: UserRepository,
{
    async fn resolve(&self, user_id: &UserId) -> Result<Caller, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .map(Caller::from)
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, Role, User, UserAccount};
    use rstest::{fixture, rstest};

    #[fixture]
    fn tester() -> UserAccount {
        let user = User::new(
            UserId::random(),
            Login::new("aitest").expect("login"),
            Role::AiTester,
        );
        UserAccount::with_password(user, "aitest").expect("password hash")
    }

    fn credentials(login: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(login, password).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn matching_digest_authenticates(tester: UserAccount) {
        let expected = tester.user.id().clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_login()
            .withf(|login| login.as_ref() == "aitest")
            .return_once(move |_| Ok(Some(tester)));

        let id = AccountLoginService::new(Arc::new(users))
            .authenticate(&credentials("aitest", "aitest"))
            .await
            .expect("authenticated");
        assert_eq!(id, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_unauthorized(tester: UserAccount) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_login()
            .return_once(move |_| Ok(Some(tester)));

        let err = AccountLoginService::new(Arc::new(users))
            .authenticate(&credentials("aitest", "nope"))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[case("nobody")]
    #[case("Not A Login")]
    #[tokio::test]
    async fn unknown_logins_are_unauthorized(#[case] login: &str) {
        let mut users = MockUserRepository::new();
        users.expect_find_by_login().returning(|_| Ok(None));

        let err = AccountLoginService::new(Arc::new(users))
            .authenticate(&credentials(login, "secret"))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_outage_is_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_login()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));

        let err = AccountLoginService::new(Arc::new(users))
            .authenticate(&credentials("aitest", "aitest"))
            .await
            .expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn resolver_maps_users_to_callers(tester: UserAccount) {
        let user = tester.user.clone();
        let id = user.id().clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(user)));

        let caller = AccountCallerResolver::new(Arc::new(users))
            .resolve(&id)
            .await
            .expect("resolved");
        assert_eq!(caller.id(), &id);
        assert_eq!(caller.role(), Role::AiTester);
    }

    #[rstest]
    #[tokio::test]
    async fn resolver_rejects_deleted_users() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));

        let err = AccountCallerResolver::new(Arc::new(users))
            .resolve(&UserId::random())
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
