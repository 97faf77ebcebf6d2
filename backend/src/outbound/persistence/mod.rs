//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories implement the domain ports over a shared `bb8` pool of
//! `diesel-async` connections.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Authorization and validation live in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures are mapped to the port error
//!   enums; unique violations on projects become `Duplicate`.
//!
//! # Example
//!
//! ```ignore
//! use project_registry::outbound::persistence::{DbPool, DieselProjectRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/projects")).await?;
//! let projects = DieselProjectRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_project_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
