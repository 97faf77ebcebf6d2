//! Project collection handlers.
//!
//! ```text
//! GET  /api/v2/project-collection
//! POST /api/v2/project-collection {"name":"createdProject","key":"keyProject"}
//! GET  /api/v2/project-collection/{key}
//! ```
//!
//! Every handler resolves the session to a caller first; the project ports
//! decide what that caller may see or create.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateProjectRequest;
use crate::domain::{ApiResult, Error, Project, ProjectKey, ProjectOwner, Role};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Creation payload for `POST /api/v2/project-collection`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    #[schema(example = "createdProject")]
    pub name: String,
    #[schema(example = "keyProject")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<CreateProjectBody> for CreateProjectRequest {
    fn from(body: CreateProjectBody) -> Self {
        Self {
            name: body.name,
            key: body.key,
            description: body.description,
        }
    }
}

/// Owner summary embedded in [`ProjectResponse`].
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOwnerResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "aitest")]
    pub login: String,
    pub role: Role,
}

impl From<ProjectOwner> for ProjectOwnerResponse {
    fn from(owner: ProjectOwner) -> Self {
        Self {
            id: owner.id.to_string(),
            login: owner.login.to_string(),
            role: owner.role,
        }
    }
}

/// Project representation returned by the collection endpoints.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    #[schema(example = "aitest_project")]
    pub key: String,
    #[schema(example = "aitest project")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: ProjectOwnerResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.to_string(),
            key: project.key.to_string(),
            name: project.name.to_string(),
            description: project.description,
            owner: project.owner.into(),
            created_at: project.created_at,
        }
    }
}

/// Projects visible to the caller, ordered by key.
#[utoipa::path(
    get,
    path = "/api/v2/project-collection",
    responses(
        (status = 200, description = "Visible projects", body = [ProjectResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Project store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/project-collection")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let caller = session.require_caller(state.callers.as_ref()).await?;
    let mut projects = state.projects_query.list_projects(&caller).await?;
    projects.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(web::Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Create a project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v2/project-collection",
    request_body = CreateProjectBody,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid project", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller may not create projects", body = Error),
        (status = 409, description = "Name or key already taken", body = Error),
        (status = 503, description = "Project store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/project-collection")]
pub async fn create_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_caller(state.callers.as_ref()).await?;
    let project = state
        .projects_command
        .create_project(&caller, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// A single project by key. Projects hidden from the caller are reported as
/// missing.
#[utoipa::path(
    get,
    path = "/api/v2/project-collection/{key}",
    params(("key" = String, Path, description = "Project key")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/project-collection/{key}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let caller = session.require_caller(state.callers.as_ref()).await?;
    let raw = path.into_inner();
    // A malformed key cannot name a stored project.
    let key = ProjectKey::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("project {raw} not found")))?;
    let project = state.projects_query.find_project(&caller, &key).await?;
    Ok(web::Json(project.into()))
}
