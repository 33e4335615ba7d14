//! keel-engine - Migration engine for Keel
//!
//! [`MigrationStore`] records which migration IDs are applied in the
//! `migrations` tracking table. [`MigrationRunner`] walks a
//! [`keel_core::MigrationSet`] forwards or backwards, executing each unit's
//! SQL against a caller-owned [`keel_db::Database`].

pub mod error;
pub mod report;
pub mod runner;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{EngineError, EngineResult, Phase};
pub use report::{Direction, MigrationState, MigrationStatus, RunReport, StatusReport};
pub use runner::MigrationRunner;
pub use store::{MigrationStore, TRACKING_TABLE};
