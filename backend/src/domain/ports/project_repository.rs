//! Driven port for project storage.
//!
//! Adapters return projects with their owner's login and role already joined
//! so the authorization gate can be evaluated without a second lookup.

use async_trait::async_trait;

use crate::domain::{Project, ProjectKey, ProjectName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { field: String } => "project {field} already exists",
    }
}

/// Storage of projects and their owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every stored project, in no particular order.
    async fn list(&self) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Fetch a project by its unique key.
    async fn find_by_key(&self, key: &ProjectKey)
    -> Result<Option<Project>, ProjectRepositoryError>;

    /// Fetch a project by its unique name.
    async fn find_by_name(
        &self,
        name: &ProjectName,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Persist a new project.
    ///
    /// Returns [`ProjectRepositoryError::Duplicate`] when the key or the name
    /// is already taken; nothing is written in that case.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;
}
