//! Seed accounts and projects used by development stores and tests.
//!
//! One account per role, each with a password equal to its login and owning a
//! single project keyed `{login}_project`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{
    Login, Project, ProjectDraft, ProjectId, ProjectOwner, ProjectValidationError, Role, User,
    PasswordHashingError, UserAccount, UserId, UserValidationError,
};

/// Static description of a seeded account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureAccount {
    pub login: &'static str,
    pub role: Role,
    user_uuid: u128,
    project_uuid: u128,
}

impl FixtureAccount {
    /// Stable identifier of the seeded user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(Uuid::from_u128(self.user_uuid))
    }

    /// Key of the project owned by this account.
    #[must_use]
    pub fn project_key(&self) -> String {
        format!("{}_project", self.login)
    }

    /// Name of the project owned by this account.
    #[must_use]
    pub fn project_name(&self) -> String {
        format!("{} project", self.login)
    }

    /// Whether `password` is this account's seeded password.
    #[must_use]
    pub fn accepts(&self, password: &str) -> bool {
        self.login == password
    }

    fn user(&self) -> Result<User, UserValidationError> {
        Ok(User::new(self.user_id(), Login::new(self.login)?, self.role))
    }
}

/// Seeded administrator.
pub const ADMIN: FixtureAccount = FixtureAccount {
    login: "admin",
    role: Role::Admin,
    user_uuid: 0x0000_0000_0000_4000_8000_0000_0000_0001,
    project_uuid: 0x0000_0000_0000_4000_8000_0000_0000_1001,
};

/// Seeded project creator.
pub const AI_CREATOR: FixtureAccount = FixtureAccount {
    login: "aicreator",
    role: Role::AiCreator,
    user_uuid: 0x0000_0000_0000_4000_8000_0000_0000_0002,
    project_uuid: 0x0000_0000_0000_4000_8000_0000_0000_1002,
};

/// Seeded tester.
pub const AI_TESTER: FixtureAccount = FixtureAccount {
    login: "aitest",
    role: Role::AiTester,
    user_uuid: 0x0000_0000_0000_4000_8000_0000_0000_0003,
    project_uuid: 0x0000_0000_0000_4000_8000_0000_0000_1003,
};

/// Every seeded account.
pub const FIXTURE_ACCOUNTS: [FixtureAccount; 3] = [ADMIN, AI_CREATOR, AI_TESTER];

/// Look up a seeded account by login.
#[must_use]
pub fn fixture_account(login: &str) -> Option<FixtureAccount> {
    FIXTURE_ACCOUNTS
        .into_iter()
        .find(|account| account.login == login)
}

/// Look up a seeded account by user id.
#[must_use]
pub fn fixture_account_by_id(id: &UserId) -> Option<FixtureAccount> {
    FIXTURE_ACCOUNTS
        .into_iter()
        .find(|account| Uuid::from_u128(account.user_uuid) == *id.as_uuid())
}

/// Raised when seed data fails domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixtureDataError {
    #[error("invalid fixture user: {0}")]
    User(#[from] UserValidationError),
    #[error("fixture password could not be hashed: {0}")]
    Password(#[from] PasswordHashingError),
    #[error("invalid fixture project: {0}")]
    Project(#[from] ProjectValidationError),
}

/// Materialised seed accounts and projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureData {
    pub accounts: Vec<UserAccount>,
    pub projects: Vec<Project>,
}

impl FixtureData {
    /// Build the seed data, stamping projects with `created_at`.
    pub fn build(created_at: DateTime<Utc>) -> Result<Self, FixtureDataError> {
        let mut accounts = Vec::with_capacity(FIXTURE_ACCOUNTS.len());
        let mut projects = Vec::with_capacity(FIXTURE_ACCOUNTS.len());
        for fixture in FIXTURE_ACCOUNTS {
            let user = fixture.user()?;
            let owner = ProjectOwner {
                id: user.id().clone(),
                login: user.login().clone(),
                role: user.role(),
            };
            let draft = ProjectDraft::try_from_parts(
                &fixture.project_name(),
                &fixture.project_key(),
                None,
            )?;
            projects.push(draft.into_project(
                ProjectId::from_uuid(Uuid::from_u128(fixture.project_uuid)),
                owner,
                created_at,
            ));
            accounts.push(UserAccount::with_password(user, fixture.login)?);
        }
        Ok(Self { accounts, projects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn seed_data_covers_every_role_once() {
        let data = FixtureData::build(Utc::now()).expect("fixture data is valid");
        for role in Role::ALL {
            assert_eq!(
                data.accounts
                    .iter()
                    .filter(|account| account.user.role() == role)
                    .count(),
                1
            );
        }
        assert_eq!(data.projects.len(), data.accounts.len());
    }

    #[rstest]
    #[case(ADMIN)]
    #[case(AI_CREATOR)]
    #[case(AI_TESTER)]
    fn each_account_owns_its_keyed_project(#[case] fixture: FixtureAccount) {
        let data = FixtureData::build(Utc::now()).expect("fixture data is valid");
        let project = data
            .projects
            .iter()
            .find(|project| project.key.as_ref() == fixture.project_key())
            .expect("project seeded");
        assert_eq!(project.owner.id, fixture.user_id());
        assert_eq!(project.owner.role, fixture.role);
        assert_eq!(project.name.as_ref(), fixture.project_name());
    }

    #[rstest]
    fn seeded_passwords_match_their_digests() {
        let data = FixtureData::build(Utc::now()).expect("fixture data is valid");
        for account in &data.accounts {
            let login = account.user.login().as_ref();
            assert!(account.password_digest.matches(login));
        }
    }

    #[rstest]
    fn lookups_by_login_and_id_agree() {
        let by_login = fixture_account("aitest").expect("tester fixture");
        let by_id = fixture_account_by_id(&by_login.user_id()).expect("tester fixture");
        assert_eq!(by_login, by_id);
        assert!(fixture_account("nobody").is_none());
    }
}
