//! Driving port for project creation.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Project};

/// Unvalidated creation payload.
///
/// Validation happens inside the command, after the caller has been
/// authorized, so a restricted caller is refused regardless of payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub name: String,
    pub key: String,
    pub description: Option<String>,
}

/// Domain use-case port for creating projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsCommand: Send + Sync {
    /// Create a project owned by `caller`.
    async fn create_project(
        &self,
        caller: &Caller,
        request: CreateProjectRequest,
    ) -> Result<Project, Error>;
}
