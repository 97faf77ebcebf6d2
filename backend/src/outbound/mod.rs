//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process repositories, seeded with fixture data, used when
//!   no database URL is configured.
//! - **persistence**: PostgreSQL repositories using Diesel.
//!
//! Adapters translate between domain types and storage representations. They
//! hold no authorization or validation rules.

pub mod memory;
pub mod persistence;
