//! Builds the HTTP handler state from the configured storage backend.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use project_registry::domain::ports::{ProjectRepository, UserRepository};
use project_registry::domain::{
    AccountCallerResolver, AccountLoginService, FixtureSeeder, ProjectService,
};
use project_registry::inbound::http::state::HttpState;
use project_registry::outbound::memory::{InMemoryProjectRepository, InMemoryUserRepository};
use project_registry::outbound::persistence::{DieselProjectRepository, DieselUserRepository};

use super::ServerConfig;

/// Wire services over Diesel repositories when a pool is configured, over
/// in-memory stores otherwise, seeding fixtures first when requested.
///
/// # Errors
/// Returns [`std::io::Error`] when fixture seeding fails.
pub async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            info!(backend = "postgres", "building project store");
            wire(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselProjectRepository::new(pool.clone())),
                config.seed_fixtures,
            )
            .await
        }
        None => {
            info!(backend = "memory", "building project store");
            wire(
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryProjectRepository::default()),
                config.seed_fixtures,
            )
            .await
        }
    }
}

async fn wire<U, P>(users: Arc<U>, projects: Arc<P>, seed: bool) -> std::io::Result<HttpState>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    if seed {
        let outcome = FixtureSeeder::new(users.clone(), projects.clone(), clock.clone())
            .seed()
            .await
            .map_err(|err| std::io::Error::other(format!("fixture seeding failed: {err}")))?;
        info!(
            accounts = outcome.accounts,
            projects_inserted = outcome.projects_inserted,
            "fixture data seeded"
        );
    }

    let service = Arc::new(ProjectService::new(projects, clock));
    Ok(HttpState::new(
        Arc::new(AccountLoginService::new(users.clone())),
        Arc::new(AccountCallerResolver::new(users)),
        service.clone(),
        service,
    ))
}
