//! Error types for the migration engine

use keel_db::DbError;
use std::fmt;
use thiserror::Error;

/// Step of a migration transition that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Querying whether the unit is applied
    Check,
    /// Executing the Up body
    Up,
    /// Executing the Down body
    Down,
    /// Inserting the tracking row
    Mark,
    /// Deleting the tracking row
    Unmark,
    /// Opening the wrapping transaction
    Begin,
    /// Committing the wrapping transaction
    Commit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Check => write!(f, "checking applied state"),
            Phase::Up => write!(f, "executing up"),
            Phase::Down => write!(f, "executing down"),
            Phase::Mark => write!(f, "recording as applied"),
            Phase::Unmark => write!(f, "removing applied record"),
            Phase::Begin => write!(f, "starting transaction"),
            Phase::Commit => write!(f, "committing transaction"),
        }
    }
}

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Tracking table operation not tied to one migration (M001).
    #[error("[M001] Tracking table operation failed: {0}")]
    Tracking(#[source] DbError),

    /// Database failure while transitioning a migration (M002).
    #[error("[M002] Migration '{id}' failed while {phase}: {source}")]
    Migration {
        id: String,
        phase: Phase,
        source: DbError,
    },

    /// Tracking row already present for a migration (M003).
    #[error("[M003] Migration '{id}' is already recorded as applied")]
    AlreadyApplied { id: String },

    /// Count exceeds the number of loaded migrations (M004).
    #[error("[M004] Requested {requested} migrations but only {available} are available")]
    OutOfRange { requested: usize, available: usize },
}

/// Result type alias for [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn migration(id: &str, phase: Phase, source: DbError) -> Self {
        EngineError::Migration {
            id: id.to_string(),
            phase,
            source,
        }
    }

    /// ID of the migration the failure is attached to, if any
    pub fn migration_id(&self) -> Option<&str> {
        match self {
            EngineError::Migration { id, .. } | EngineError::AlreadyApplied { id } => Some(id),
            EngineError::Tracking(_) | EngineError::OutOfRange { .. } => None,
        }
    }
}
