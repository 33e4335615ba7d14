//! Persistent record of applied migrations.
//!
//! One row per applied migration ID in the `migrations` table. Rows are
//! inserted on successful apply and deleted on successful rollback.

use crate::error::{EngineError, EngineResult, Phase};
use keel_db::{Database, DbError};

/// Name of the tracking table.
pub const TRACKING_TABLE: &str = "migrations";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS migrations (id VARCHAR(255) PRIMARY KEY)";
const IS_APPLIED_SQL: &str = "SELECT COUNT(*) FROM migrations WHERE id = ?";
const MARK_SQL: &str = "INSERT INTO migrations (id) VALUES (?)";
const UNMARK_SQL: &str = "DELETE FROM migrations WHERE id = ?";
const COUNT_SQL: &str = "SELECT COUNT(*) FROM migrations";
const LIST_SQL: &str = "SELECT id FROM migrations ORDER BY id";

/// Tracking-table operations over a borrowed connection.
pub struct MigrationStore<'a, D: Database + ?Sized> {
    db: &'a D,
}

impl<'a, D: Database + ?Sized> MigrationStore<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Create the tracking table if it does not exist yet.
    pub fn ensure_table_exists(&self) -> EngineResult<()> {
        self.db
            .execute_batch(CREATE_TABLE_SQL)
            .map_err(EngineError::Tracking)
    }

    pub fn is_applied(&self, id: &str) -> EngineResult<bool> {
        let count = self
            .db
            .query_i64(IS_APPLIED_SQL, &[id])
            .map_err(|e| EngineError::migration(id, Phase::Check, e))?;
        Ok(count > 0)
    }

    /// Record `id` as applied.
    ///
    /// Fails with [`EngineError::AlreadyApplied`] if the row exists.
    pub fn mark_applied(&self, id: &str) -> EngineResult<()> {
        match self.db.execute(MARK_SQL, &[id]) {
            Ok(_) => Ok(()),
            Err(DbError::ConstraintViolation(_)) => Err(EngineError::AlreadyApplied {
                id: id.to_string(),
            }),
            Err(e) => Err(EngineError::migration(id, Phase::Mark, e)),
        }
    }

    /// Remove the record for `id`. Absent rows are not an error.
    pub fn unmark_applied(&self, id: &str) -> EngineResult<()> {
        self.db
            .execute(UNMARK_SQL, &[id])
            .map_err(|e| EngineError::migration(id, Phase::Unmark, e))?;
        Ok(())
    }

    /// Number of applied migrations.
    pub fn current_version(&self) -> EngineResult<usize> {
        let count = self
            .db
            .query_i64(COUNT_SQL, &[])
            .map_err(EngineError::Tracking)?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Every applied ID, sorted.
    pub fn applied_ids(&self) -> EngineResult<Vec<String>> {
        self.db
            .query_strings(LIST_SQL)
            .map_err(EngineError::Tracking)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
