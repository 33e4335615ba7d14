//! keel-core - Core library for Keel
//!
//! This crate provides the migration unit types, the directory loader that
//! turns a folder of `.sql` files into an ordered [`MigrationSet`], and the
//! `keel.yml` configuration shared by all Keel components.

pub mod config;
pub mod error;
pub mod migration;
pub mod migration_id;
pub mod source;

pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult, FormatIssue};
pub use migration::{Migration, DOWN_MARKER, UP_MARKER};
pub use migration_id::MigrationId;
pub use source::MigrationSet;
