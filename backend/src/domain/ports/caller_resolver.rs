//! Driving port mapping a session's user id to the authenticated caller.

use async_trait::async_trait;

use crate::domain::fixtures::fixture_account_by_id;
use crate::domain::{Caller, Error, Login, UserId};

/// Resolve the caller's login and role for a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallerResolver: Send + Sync {
    /// Resolve `user_id`, failing with `Unauthorized` when it no longer exists.
    async fn resolve(&self, user_id: &UserId) -> Result<Caller, Error>;
}

/// Resolver backed by the seeded accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCallerResolver;

#[async_trait]
impl CallerResolver for FixtureCallerResolver {
    async fn resolve(&self, user_id: &UserId) -> Result<Caller, Error> {
        let account = fixture_account_by_id(user_id)
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;
        let login = Login::new(account.login)
            .map_err(|err| Error::internal(format!("invalid fixture login: {err}")))?;
        Ok(Caller::new(user_id.clone(), login, account.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::AI_CREATOR;
    use crate::domain::{ErrorCode, Role};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn resolves_seeded_users() {
        let caller = FixtureCallerResolver
            .resolve(&AI_CREATOR.user_id())
            .await
            .expect("seeded user");
        assert_eq!(caller.role(), Role::AiCreator);
        assert_eq!(caller.login().as_ref(), "aicreator");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_are_unauthorized() {
        let err = FixtureCallerResolver
            .resolve(&UserId::random())
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
