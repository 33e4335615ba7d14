//! Database trait definition

use crate::error::{DbError, DbResult};

/// Connection the migration engine executes against.
///
/// Calls are synchronous. The engine only borrows the implementation and
/// never closes it.
pub trait Database {
    /// Execute one or more SQL statements without parameters
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a single parameterized statement, returns affected rows
    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Run a query whose first column of the first row is an integer
    fn query_i64(&self, sql: &str, params: &[&str]) -> DbResult<i64>;

    /// Run a query and collect its first column as strings
    fn query_strings(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Whether DDL statements take part in transactions on this backend
    fn supports_transactional_ddl(&self) -> bool {
        false
    }

    /// Start a transaction
    fn begin(&self) -> DbResult<()> {
        self.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))
    }

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()> {
        self.execute_batch("COMMIT")
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()> {
        self.execute_batch("ROLLBACK")
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}
