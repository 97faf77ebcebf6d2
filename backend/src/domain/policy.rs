//! Authorization gate for project access.
//!
//! [`authorize`] is a pure function of the caller's role, the requested
//! operation and, for per-project operations, the owner's role. It knows
//! nothing about HTTP or storage so adapters and services consult it the same
//! way, and it can be tested exhaustively without a server.
//!
//! ```text
//! caller role ─┐
//! operation ───┼──► authorize ──► Allow | Deny(reason)
//! owner role ──┘
//! ```
//!
//! Rules:
//! - listing the collection is open to every role; each project in it is then
//!   checked with [`Operation::ViewProject`];
//! - the owner of a project may always view it;
//! - a tester may view projects owned by other testers only;
//! - a tester may never create a project.

use std::fmt;

use super::{Caller, Error, Project, Role};

/// Action a caller wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Access the project listing endpoint.
    ListProjects,
    /// See one specific project, in a listing or by key.
    ViewProject,
    /// Persist a new project.
    CreateProject,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListProjects => "list_projects",
            Self::ViewProject => "view_project",
            Self::CreateProject => "create_project",
        })
    }
}

/// Input to [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRequest {
    pub caller_role: Role,
    pub operation: Operation,
    /// Role of the owner of the target project, for per-project operations.
    pub target_owner_role: Option<Role>,
    /// Whether the caller owns the target project.
    pub caller_is_owner: bool,
}

impl AccessRequest {
    /// Request for an operation without a target project.
    #[must_use]
    pub const fn collection(caller_role: Role, operation: Operation) -> Self {
        Self {
            caller_role,
            operation,
            target_owner_role: None,
            caller_is_owner: false,
        }
    }

    /// Request to view `project` on behalf of `caller`.
    #[must_use]
    pub fn view(caller: &Caller, project: &Project) -> Self {
        Self {
            caller_role: caller.role(),
            operation: Operation::ViewProject,
            target_owner_role: Some(project.owner.role),
            caller_is_owner: project.owner.id == *caller.id(),
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The caller's role may not create projects.
    CreationNotPermitted,
    /// The project owner holds a more privileged role than the caller.
    OwnerMorePrivileged,
    /// A per-project operation arrived without a target.
    MissingTarget,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreationNotPermitted => "project creation is not permitted for this role",
            Self::OwnerMorePrivileged => "project belongs to a more privileged role",
            Self::MissingTarget => "no target project supplied",
        })
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenialReason),
}

impl Decision {
    /// Whether the request is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether a request is allowed.
///
/// # Examples
/// ```
/// use project_registry::domain::{authorize, AccessRequest, Decision, DenialReason, Operation, Role};
///
/// let create = AccessRequest::collection(Role::AiTester, Operation::CreateProject);
/// assert_eq!(authorize(&create), Decision::Deny(DenialReason::CreationNotPermitted));
///
/// let list = AccessRequest::collection(Role::AiTester, Operation::ListProjects);
/// assert!(authorize(&list).is_allowed());
/// ```
#[must_use]
pub fn authorize(request: &AccessRequest) -> Decision {
    match request.operation {
        Operation::ListProjects => Decision::Allow,
        Operation::CreateProject if request.caller_role.is_tester() => {
            Decision::Deny(DenialReason::CreationNotPermitted)
        }
        Operation::CreateProject => Decision::Allow,
        Operation::ViewProject => view_decision(request),
    }
}

fn view_decision(request: &AccessRequest) -> Decision {
    let Some(owner_role) = request.target_owner_role else {
        return Decision::Deny(DenialReason::MissingTarget);
    };
    if request.caller_is_owner || !request.caller_role.is_tester() || owner_role.is_tester() {
        Decision::Allow
    } else {
        Decision::Deny(DenialReason::OwnerMorePrivileged)
    }
}

/// Whether `caller` may see `project`.
#[must_use]
pub fn can_view(caller: &Caller, project: &Project) -> bool {
    authorize(&AccessRequest::view(caller, project)).is_allowed()
}

/// A denied operation, surfaced to clients as `403 Forbidden`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct AuthorizationDenied {
    pub operation: Operation,
    pub role: Role,
    pub reason: DenialReason,
}

impl AuthorizationDenied {
    /// Check `request`, returning the denial when it is not allowed.
    pub fn check(request: &AccessRequest) -> Result<(), Self> {
        match authorize(request) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(Self {
                operation: request.operation,
                role: request.caller_role,
                reason,
            }),
        }
    }
}

impl From<AuthorizationDenied> for Error {
    fn from(denied: AuthorizationDenied) -> Self {
        Error::forbidden(denied.reason.to_string())
    }
}
