//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, the authorization gate deciding what a caller may see or
//! create, and the services implementing the driving ports. Types are
//! immutable once validated and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Role, User, Login, UserId: identity model.
//! - Project, ProjectKey, ProjectName, ProjectDraft: project aggregate.
//! - authorize / AccessRequest / Decision: the authorization gate.
//! - ProjectService, AccountLoginService, AccountCallerResolver: port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod fixtures;
pub mod policy;
pub mod ports;
pub mod project;
pub mod project_service;
pub mod role;
pub mod seeding;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountCallerResolver, AccountLoginService};
pub use self::auth::{
    Caller, InvalidPasswordDigest, LoginCredentials, LoginValidationError, PasswordDigest,
    PasswordHashingError, UserAccount,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::policy::{
    AccessRequest, AuthorizationDenied, Decision, DenialReason, Operation, authorize, can_view,
};
pub use self::project::{
    PROJECT_DESCRIPTION_MAX, PROJECT_KEY_MAX, PROJECT_NAME_MAX, Project, ProjectDraft, ProjectId,
    ProjectKey, ProjectName, ProjectOwner, ProjectValidationError,
};
pub use self::project_service::ProjectService;
pub use self::role::{Role, UnknownAuthority};
pub use self::seeding::{FixtureSeeder, FixtureSeedingError, SeedOutcome};
pub use self::trace_id::TraceId;
pub use self::user::{LOGIN_MAX, LOGIN_MIN, Login, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use project_registry::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
