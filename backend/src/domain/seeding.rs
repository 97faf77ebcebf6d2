//! Fixture seeding orchestration.
//!
//! Writes the seed accounts and their projects through the repository ports.
//! Re-running is safe: accounts are upserted and projects whose key already
//! exists are left untouched.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::fixtures::{FixtureData, FixtureDataError};
use crate::domain::ports::{
    ProjectRepository, ProjectRepositoryError, UserPersistenceError, UserRepository,
};

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Accounts written or refreshed.
    pub accounts: usize,
    /// Projects inserted by this run.
    pub projects_inserted: usize,
}

/// Errors raised while seeding fixture data.
#[derive(Debug, Error)]
pub enum FixtureSeedingError {
    #[error(transparent)]
    Fixture(#[from] FixtureDataError),
    #[error("seeding users failed: {0}")]
    Users(#[from] UserPersistenceError),
    #[error("seeding projects failed: {0}")]
    Projects(#[from] ProjectRepositoryError),
}

/// Service that writes fixture data through the repository ports.
#[derive(Clone)]
pub struct FixtureSeeder<U, P> {
    users: Arc<U>,
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<U, P> FixtureSeeder<U, P> {
    /// Create a seeder over the given repositories.
    pub fn new(users: Arc<U>, projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            projects,
            clock,
        }
    }
}

impl<U, P> FixtureSeeder<U, P>
where
    U: UserRepository,
    P: ProjectRepository,
{
    /// Upsert the seed accounts and insert any missing seed projects.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureSeedingError`] when the seed data is invalid or a
    /// repository write fails.
    pub async fn seed(&self) -> Result<SeedOutcome, FixtureSeedingError> {
        let data = FixtureData::build(self.clock.utc())?;
        for account in &data.accounts {
            self.users.upsert(account).await?;
        }

        let mut projects_inserted = 0;
        for project in &data.projects {
            if self.projects.find_by_key(&project.key).await?.is_some() {
                continue;
            }
            self.projects.insert(project).await?;
            projects_inserted += 1;
        }

        let outcome = SeedOutcome {
            accounts: data.accounts.len(),
            projects_inserted,
        };
        info!(
            accounts = outcome.accounts,
            projects_inserted = outcome.projects_inserted,
            "fixture data seeded"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockProjectRepository, MockUserRepository};
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn seeds_every_account_and_missing_project() {
        let mut users = MockUserRepository::new();
        users.expect_upsert().times(3).returning(|_| Ok(()));
        let mut projects = MockProjectRepository::new();
        projects.expect_find_by_key().times(3).returning(|key| {
            if key.as_ref() == "admin_project" {
                Ok(Some(admin_project()))
            } else {
                Ok(None)
            }
        });
        projects.expect_insert().times(2).returning(|_| Ok(()));

        let seeder = FixtureSeeder::new(
            Arc::new(users),
            Arc::new(projects),
            Arc::new(DefaultClock),
        );
        let outcome = seeder.seed().await.expect("seeding succeeds");
        assert_eq!(
            outcome,
            SeedOutcome {
                accounts: 3,
                projects_inserted: 2,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn user_failures_abort_before_projects() {
        let mut users = MockUserRepository::new();
        users
            .expect_upsert()
            .times(1)
            .returning(|_| Err(UserPersistenceError::connection("refused")));
        let mut projects = MockProjectRepository::new();
        projects.expect_insert().never();

        let seeder = FixtureSeeder::new(
            Arc::new(users),
            Arc::new(projects),
            Arc::new(DefaultClock),
        );
        let err = seeder.seed().await.expect_err("seeding fails");
        assert!(matches!(err, FixtureSeedingError::Users(_)));
    }

    fn admin_project() -> crate::domain::Project {
        FixtureData::build(chrono::Utc::now())
            .expect("fixture data")
            .projects
            .into_iter()
            .find(|project| project.key.as_ref() == "admin_project")
            .expect("admin project")
    }
}
