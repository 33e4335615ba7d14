//! Apply and roll back migrations in sequence order.
//!
//! Each unit is either Pending or Applied, decided only by the tracking
//! table. Runs abort on the first failure; units transitioned before the
//! failure stay transitioned.

use crate::error::{EngineError, EngineResult, Phase};
use crate::report::{Direction, MigrationState, MigrationStatus, RunReport, StatusReport};
use crate::store::MigrationStore;
use keel_core::{Migration, MigrationSet};
use keel_db::Database;
use std::collections::BTreeSet;

/// Runs a borrowed [`MigrationSet`] against a borrowed connection.
///
/// The caller creates the tracking table (see
/// [`MigrationStore::ensure_table_exists`]) before invoking any operation.
pub struct MigrationRunner<'a, D: Database + ?Sized> {
    db: &'a D,
    migrations: &'a MigrationSet,
    transactional: bool,
}

impl<'a, D: Database + ?Sized> MigrationRunner<'a, D> {
    /// Create a runner. Transactions are enabled when the backend supports
    /// transactional DDL.
    pub fn new(db: &'a D, migrations: &'a MigrationSet) -> Self {
        Self {
            db,
            migrations,
            transactional: db.supports_transactional_ddl(),
        }
    }

    /// Enable or disable wrapping each transition in a transaction.
    ///
    /// Without a transaction, a failure between executing a body and
    /// updating the tracking table leaves the two out of sync.
    pub fn with_transactions(mut self, enabled: bool) -> Self {
        if enabled && !self.db.supports_transactional_ddl() {
            log::warn!(
                "{} does not support transactional DDL, running migrations without transactions",
                self.db.db_type()
            );
        }
        self.transactional = enabled && self.db.supports_transactional_ddl();
        self
    }

    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    /// Tracking store over the same connection
    pub fn store(&self) -> MigrationStore<'a, D> {
        MigrationStore::new(self.db)
    }

    /// Apply every pending unit in sequence order.
    pub fn apply_all(&self) -> EngineResult<RunReport> {
        self.apply(self.migrations.as_slice())
    }

    /// Apply pending units among the first `count` positions.
    pub fn apply_n(&self, count: usize) -> EngineResult<RunReport> {
        self.check_count(count)?;
        self.apply(&self.migrations.as_slice()[..count])
    }

    /// Roll back every applied unit in reverse sequence order.
    pub fn rollback_all(&self) -> EngineResult<RunReport> {
        self.rollback(self.migrations.as_slice())
    }

    /// Roll back applied units among the last `count` positions, newest first.
    pub fn rollback_n(&self, count: usize) -> EngineResult<RunReport> {
        self.check_count(count)?;
        let all = self.migrations.as_slice();
        self.rollback(&all[all.len() - count..])
    }

    /// Number of rows in the tracking table.
    pub fn current_version(&self) -> EngineResult<usize> {
        self.store().current_version()
    }

    /// State of every loaded unit plus tracked IDs that are no longer loaded.
    pub fn status(&self) -> EngineResult<StatusReport> {
        let applied: BTreeSet<String> = self.store().applied_ids()?.into_iter().collect();

        let migrations: Vec<MigrationStatus> = self
            .migrations
            .iter()
            .map(|m| MigrationStatus {
                id: m.id.clone(),
                state: if applied.contains(m.id.as_str()) {
                    MigrationState::Applied
                } else {
                    MigrationState::Pending
                },
            })
            .collect();

        let contiguous = migrations
            .iter()
            .take_while(|m| m.state == MigrationState::Applied)
            .count();

        let unknown_applied = applied
            .iter()
            .filter(|id| self.migrations.position(id).is_none())
            .cloned()
            .collect();

        Ok(StatusReport {
            version: applied.len(),
            contiguous,
            migrations,
            unknown_applied,
        })
    }

    fn check_count(&self, count: usize) -> EngineResult<()> {
        if count > self.migrations.len() {
            return Err(EngineError::OutOfRange {
                requested: count,
                available: self.migrations.len(),
            });
        }
        Ok(())
    }

    fn apply(&self, units: &[Migration]) -> EngineResult<RunReport> {
        let store = self.store();
        let mut report = RunReport::new(Direction::Up);

        for migration in units {
            if store.is_applied(&migration.id)? {
                log::debug!("Migration {} already applied, skipping", migration.id);
                continue;
            }
            self.transition(&store, migration, Direction::Up)?;
            log::info!("Applied migration {}", migration.id);
            report.transitioned.push(migration.id.clone());
        }
        Ok(report)
    }

    fn rollback(&self, units: &[Migration]) -> EngineResult<RunReport> {
        let store = self.store();
        let mut report = RunReport::new(Direction::Down);

        for migration in units.iter().rev() {
            if !store.is_applied(&migration.id)? {
                log::debug!("Migration {} not applied, skipping", migration.id);
                continue;
            }
            self.transition(&store, migration, Direction::Down)?;
            log::info!("Rolled back migration {}", migration.id);
            report.transitioned.push(migration.id.clone());
        }
        Ok(report)
    }

    /// Execute one body and update tracking, inside a transaction when
    /// enabled. The transaction is rolled back on any failure.
    fn transition(
        &self,
        store: &MigrationStore<'a, D>,
        migration: &Migration,
        direction: Direction,
    ) -> EngineResult<()> {
        if !self.transactional {
            return self.execute_and_track(store, migration, direction);
        }

        let id = migration.id.as_str();
        self.db
            .begin()
            .map_err(|e| EngineError::migration(id, Phase::Begin, e))?;

        let result = self.execute_and_track(store, migration, direction);

        match &result {
            Ok(()) => {
                if let Err(commit_err) = self.db.commit() {
                    self.rollback_transaction(id);
                    return Err(EngineError::migration(id, Phase::Commit, commit_err));
                }
            }
            Err(_) => self.rollback_transaction(id),
        }
        result
    }

    fn execute_and_track(
        &self,
        store: &MigrationStore<'a, D>,
        migration: &Migration,
        direction: Direction,
    ) -> EngineResult<()> {
        let id = migration.id.as_str();
        let (sql, phase) = match direction {
            Direction::Up => (migration.up.as_str(), Phase::Up),
            Direction::Down => (migration.down.as_str(), Phase::Down),
        };

        log::debug!("Executing {direction} for migration {id}");
        self.db
            .execute_batch(sql)
            .map_err(|e| EngineError::migration(id, phase, e))?;

        let tracked = match direction {
            Direction::Up => store.mark_applied(id),
            Direction::Down => store.unmark_applied(id),
        };
        if let Err(e) = &tracked {
            if !self.transactional {
                log::error!(
                    "Migration {id} {direction} executed but the tracking table was not updated; \
                     schema and tracking state are now inconsistent: {e}"
                );
            }
        }
        tracked
    }

    fn rollback_transaction(&self, id: &str) {
        if let Err(e) = self.db.rollback() {
            log::warn!("Failed to roll back transaction for migration {id}: {e}");
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
