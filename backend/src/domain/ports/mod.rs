//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod caller_resolver;
mod login_service;
mod project_repository;
mod projects_command;
mod projects_query;
mod user_repository;

#[cfg(test)]
pub use caller_resolver::MockCallerResolver;
pub use caller_resolver::{CallerResolver, FixtureCallerResolver};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use projects_command::MockProjectsCommand;
pub use projects_command::{CreateProjectRequest, ProjectsCommand};
#[cfg(test)]
pub use projects_query::MockProjectsQuery;
pub use projects_query::ProjectsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
