//! Project registry backend library.
//!
//! Session-authenticated HTTP API for listing and creating projects. An
//! authorization gate in [`domain::policy`] keeps tester accounts away from
//! projects owned by more privileged users and stops them creating projects.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
