//! Results returned by runner operations

use keel_core::MigrationId;
use serde::Serialize;
use std::fmt;

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Units that changed state during one apply or rollback run, in the order
/// they were transitioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub direction: Direction,
    pub transitioned: Vec<MigrationId>,
}

impl RunReport {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            direction,
            transitioned: Vec::new(),
        }
    }

    /// True when nothing changed (already at the latest / earliest state)
    pub fn is_noop(&self) -> bool {
        self.transitioned.is_empty()
    }

    pub fn count(&self) -> usize {
        self.transitioned.len()
    }
}

/// Per-unit state as recorded in the tracking table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationState {
    Pending,
    Applied,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationState::Pending => write!(f, "pending"),
            MigrationState::Applied => write!(f, "applied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub id: MigrationId,
    pub state: MigrationState,
}

/// Snapshot of every loaded unit's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Loaded units in sequence order
    pub migrations: Vec<MigrationStatus>,

    /// Row count of the tracking table (same as `current_version`)
    pub version: usize,

    /// Length of the applied prefix of the sequence.
    ///
    /// Differs from `version` once units were applied or rolled back out of
    /// sequence order.
    pub contiguous: usize,

    /// Tracked IDs with no matching file in the loaded set
    pub unknown_applied: Vec<String>,
}

impl StatusReport {
    pub fn pending(&self) -> impl Iterator<Item = &MigrationStatus> {
        self.migrations
            .iter()
            .filter(|m| m.state == MigrationState::Pending)
    }
}
