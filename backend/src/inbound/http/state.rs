//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CallerResolver, LoginService, ProjectsCommand, ProjectsQuery};

/// Port implementations consumed by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub callers: Arc<dyn CallerResolver>,
    pub projects_query: Arc<dyn ProjectsQuery>,
    pub projects_command: Arc<dyn ProjectsCommand>,
}

impl HttpState {
    /// Bundle the ports handlers depend on.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use chrono::Utc;
    /// use mockable::DefaultClock;
    /// use project_registry::domain::ports::{FixtureCallerResolver, FixtureLoginService};
    /// use project_registry::domain::ProjectService;
    /// use project_registry::domain::fixtures::FixtureData;
    /// use project_registry::inbound::http::state::HttpState;
    /// use project_registry::outbound::memory::InMemoryProjectRepository;
    ///
    /// let fixtures = FixtureData::build(Utc::now()).expect("fixture data");
    /// let repository = Arc::new(InMemoryProjectRepository::with_projects(fixtures.projects));
    /// let service = Arc::new(ProjectService::new(repository, Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureCallerResolver),
    ///     service.clone(),
    ///     service,
    /// );
    /// # let _ = state;
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        callers: Arc<dyn CallerResolver>,
        projects_query: Arc<dyn ProjectsQuery>,
        projects_command: Arc<dyn ProjectsCommand>,
    ) -> Self {
        Self {
            login,
            callers,
            projects_query,
            projects_command,
        }
    }
}
