//! Driving port for project reads.
//!
//! Implementations apply the authorization gate: projects the caller may not
//! view are omitted from listings and reported as missing on lookup.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Project, ProjectKey};

/// Domain use-case port for reading projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// Projects visible to `caller`.
    async fn list_projects(&self, caller: &Caller) -> Result<Vec<Project>, Error>;

    /// The project stored under `key`, when `caller` may view it.
    async fn find_project(&self, caller: &Caller, key: &ProjectKey) -> Result<Project, Error>;
}
