//! Project domain service.
//!
//! Implements the project driving ports on top of a [`ProjectRepository`].
//! Every operation consults [`authorize`](super::authorize) before touching
//! the repository's write path; listings are filtered project by project.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateProjectRequest, ProjectRepository, ProjectRepositoryError, ProjectsCommand,
    ProjectsQuery,
};
use crate::domain::{
    AccessRequest, AuthorizationDenied, Caller, Error, Operation, Project, ProjectDraft,
    ProjectId, ProjectKey, ProjectOwner, ProjectValidationError, can_view,
};

/// Project service implementing [`ProjectsQuery`] and [`ProjectsCommand`].
#[derive(Clone)]
pub struct ProjectService<P> {
    repository: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> ProjectService<P> {
    /// Create a new service over `repository`, stamping creations with `clock`.
    pub fn new(repository: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<P> ProjectService<P>
where
    P: ProjectRepository,
{
    fn map_repository_error(error: ProjectRepositoryError) -> Error {
        match error {
            ProjectRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("project repository unavailable: {message}"))
            }
            ProjectRepositoryError::Query { message } => {
                Error::internal(format!("project repository error: {message}"))
            }
            ProjectRepositoryError::Duplicate { field } => Self::conflict(&field),
        }
    }

    fn conflict(field: &str) -> Error {
        Error::conflict(format!("a project with this {field} already exists")).with_details(
            json!({
                "field": field,
                "code": "duplicate",
            }),
        )
    }

    fn invalid_draft(error: &ProjectValidationError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": error.field(),
            "code": error.code(),
        }))
    }

    fn authorize_creation(caller: &Caller) -> Result<(), Error> {
        let request = AccessRequest::collection(caller.role(), Operation::CreateProject);
        AuthorizationDenied::check(&request).map_err(|denied| {
            warn!(
                caller = %caller.id(),
                role = %denied.role,
                operation = %denied.operation,
                reason = %denied.reason,
                "project creation denied"
            );
            Error::from(denied)
        })
    }

    async fn ensure_unique(&self, draft: &ProjectDraft) -> Result<(), Error> {
        if self
            .repository
            .find_by_name(draft.name())
            .await
            .map_err(Self::map_repository_error)?
            .is_some()
        {
            return Err(Self::conflict("name"));
        }
        if self
            .repository
            .find_by_key(draft.key())
            .await
            .map_err(Self::map_repository_error)?
            .is_some()
        {
            return Err(Self::conflict("key"));
        }
        Ok(())
    }
}

#[async_trait]
impl<P> ProjectsQuery for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn list_projects(&self, caller: &Caller) -> Result<Vec<Project>, Error> {
        AuthorizationDenied::check(&AccessRequest::collection(
            caller.role(),
            Operation::ListProjects,
        ))?;
        let stored = self
            .repository
            .list()
            .await
            .map_err(Self::map_repository_error)?;
        let total = stored.len();
        let visible: Vec<Project> = stored
            .into_iter()
            .filter(|project| can_view(caller, project))
            .collect();
        debug!(
            caller = %caller.id(),
            role = %caller.role(),
            total,
            visible = visible.len(),
            "filtered project listing"
        );
        Ok(visible)
    }

    async fn find_project(&self, caller: &Caller, key: &ProjectKey) -> Result<Project, Error> {
        self.repository
            .find_by_key(key)
            .await
            .map_err(Self::map_repository_error)?
            .filter(|project| can_view(caller, project))
            .ok_or_else(|| Error::not_found(format!("project {key} not found")))
    }
}

#[async_trait]
impl<P> ProjectsCommand for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn create_project(
        &self,
        caller: &Caller,
        request: CreateProjectRequest,
    ) -> Result<Project, Error> {
        Self::authorize_creation(caller)?;

        let draft = ProjectDraft::try_from_parts(
            &request.name,
            &request.key,
            request.description.as_deref(),
        )
        .map_err(|err| Self::invalid_draft(&err))?;
        self.ensure_unique(&draft).await?;

        let owner = ProjectOwner {
            id: caller.id().clone(),
            login: caller.login().clone(),
            role: caller.role(),
        };
        let project = draft.into_project(ProjectId::random(), owner, self.clock.utc());
        self.repository
            .insert(&project)
            .await
            .map_err(Self::map_repository_error)?;
        info!(
            caller = %caller.id(),
            project = %project.id,
            key = %project.key,
            "project created"
        );
        Ok(project)
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
