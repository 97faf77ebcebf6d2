//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without importing the
//! backing store, so handler tests can substitute a deterministic double.

use async_trait::async_trait;

use crate::domain::fixtures::fixture_account;
use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Authenticator accepting the seeded accounts without touching a store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        fixture_account(credentials.login())
            .filter(|account| account.accepts(credentials.password()))
            .map(|account| account.user_id())
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::fixtures::AI_TESTER;
    use rstest::rstest;

    #[rstest]
    #[case("aitest", "aitest", true)]
    #[case("admin", "admin", true)]
    #[case("aitest", "wrong", false)]
    #[case("other", "other", false)]
    #[tokio::test]
    async fn fixture_login_service_accepts_seeded_accounts(
        #[case] login: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(login, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (should_succeed, result) {
            (true, Ok(_)) => {}
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_login_returns_the_seeded_id() {
        let creds = LoginCredentials::try_from_parts("aitest", "aitest").expect("credentials");
        let id = FixtureLoginService
            .authenticate(&creds)
            .await
            .expect("seeded login");
        assert_eq!(id, AI_TESTER.user_id());
    }
}
