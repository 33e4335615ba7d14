//! Shared helpers for engine unit tests.

use keel_core::{Migration, MigrationId, MigrationSet};
use keel_db::{Database, DbResult, DuckDbBackend};
use std::cell::RefCell;

/// In-memory DuckDB that records every `execute_batch` body.
///
/// Transaction control is delegated without being recorded, so `batches()`
/// holds only migration bodies and DDL issued by the store.
pub(crate) struct RecordingDb {
    inner: DuckDbBackend,
    batches: RefCell<Vec<String>>,
    transactional_ddl: bool,
}

impl RecordingDb {
    pub(crate) fn new() -> Self {
        Self {
            inner: DuckDbBackend::in_memory().unwrap(),
            batches: RefCell::new(Vec::new()),
            transactional_ddl: true,
        }
    }

    /// Backend that reports no transactional DDL support
    pub(crate) fn without_transactions() -> Self {
        Self {
            transactional_ddl: false,
            ..Self::new()
        }
    }

    pub(crate) fn batches(&self) -> Vec<String> {
        self.batches.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.batches.borrow_mut().clear();
    }

    pub(crate) fn count(&self, sql: &str) -> i64 {
        self.inner.query_i64(sql, &[]).unwrap()
    }

    pub(crate) fn table_exists(&self, name: &str) -> bool {
        self.inner
            .query_i64(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?",
                &[name],
            )
            .unwrap()
            > 0
    }
}

impl Database for RecordingDb {
    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.batches.borrow_mut().push(sql.to_string());
        self.inner.execute_batch(sql)
    }

    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        self.inner.execute(sql, params)
    }

    fn query_i64(&self, sql: &str, params: &[&str]) -> DbResult<i64> {
        self.inner.query_i64(sql, params)
    }

    fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        self.inner.query_strings(sql)
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }

    fn supports_transactional_ddl(&self) -> bool {
        self.transactional_ddl
    }

    fn begin(&self) -> DbResult<()> {
        self.inner.begin()
    }

    fn commit(&self) -> DbResult<()> {
        self.inner.commit()
    }

    fn rollback(&self) -> DbResult<()> {
        self.inner.rollback()
    }
}

/// `count` units `001_t1`, `002_t2`, ... each creating and dropping a table.
pub(crate) fn table_migrations(count: usize) -> MigrationSet {
    let migrations = (1..=count)
        .map(|i| {
            Migration::new(
                MigrationId::new(format!("{i:03}_t{i}")),
                format!("CREATE TABLE t{i} (id INTEGER)"),
                format!("DROP TABLE t{i}"),
            )
        })
        .collect();
    MigrationSet::from_migrations(migrations).unwrap()
}
