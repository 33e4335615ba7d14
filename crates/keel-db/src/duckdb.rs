//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use duckdb::Connection;
use std::path::Path;

/// DuckDB database backend
///
/// Single-threaded; migrations run one statement at a time, so the
/// connection is held directly rather than behind a `Mutex`.
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Wrap a connection opened by the caller
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Database for DuckDbBackend {
    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        log::trace!("execute_batch: {sql}");
        self.conn.execute_batch(sql).map_err(DbError::from)
    }

    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        log::trace!("execute: {sql} {params:?}");
        self.conn
            .execute(sql, duckdb::params_from_iter(params.iter()))
            .map_err(DbError::from)
    }

    fn query_i64(&self, sql: &str, params: &[&str]) -> DbResult<i64> {
        self.conn
            .query_row(sql, duckdb::params_from_iter(params.iter()), |row| {
                row.get::<_, i64>(0)
            })
            .map_err(DbError::from)
    }

    fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let values = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    fn supports_transactional_ddl(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
