//! In-process adapters used when no database is configured.
//!
//! State lives behind `std::sync::RwLock`s and is lost on restart. A poisoned
//! lock is reported as a `Query` error rather than a panic.

mod project_repository;
mod user_repository;

pub use project_repository::InMemoryProjectRepository;
pub use user_repository::InMemoryUserRepository;
