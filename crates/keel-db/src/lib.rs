//! keel-db - Database abstraction layer for Keel
//!
//! This crate provides the `Database` trait the migration engine executes
//! against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
