//! Persistence layer for the MIB platform backend.
//!
//! This crate contains:
//! - Database connection management and the [`db::Database`] client
//! - Statements with positional bound parameters
//! - Entity definitions (database row mappings)
//! - Repository implementations for users, devices, settings and API keys
//!
//! Schema migrations live in `src/migrations` and are applied by the API
//! binary at startup, never by the repositories.

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;
pub mod statement;

pub use db::{Database, DatabaseConfig};
pub use error::PersistenceError;
pub use statement::{SqlParam, Statement};
