use super::*;

#[test]
fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
    assert!(db.supports_transactional_ddl());
}

#[test]
fn test_new_handles_memory_path() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    assert_eq!(db.query_i64("SELECT 42", &[]).unwrap(), 42);
}

#[test]
fn test_from_path_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.duckdb");
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE t (id INT)").unwrap();
    }
    assert!(path.exists());

    let db = DuckDbBackend::from_path(&path).unwrap();
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 't'", &[])
            .unwrap(),
        1
    );
}

#[test]
fn test_execute_batch_multiple_statements() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .unwrap();

    assert_eq!(db.query_i64("SELECT COUNT(*) FROM t1", &[]).unwrap(), 1);
    assert_eq!(db.query_i64("SELECT COUNT(*) FROM t2", &[]).unwrap(), 0);
}

#[test]
fn test_execute_with_params() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE names (name VARCHAR)").unwrap();

    let inserted = db
        .execute("INSERT INTO names (name) VALUES (?)", &["alice"])
        .unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM names WHERE name = ?", &["alice"])
            .unwrap(),
        1
    );
}

#[test]
fn test_query_strings() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE ids (id VARCHAR); INSERT INTO ids VALUES ('b'), ('a');")
        .unwrap();

    let ids = db.query_strings("SELECT id FROM ids ORDER BY id").unwrap();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_primary_key_violation_is_classified() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE pk (id VARCHAR PRIMARY KEY)").unwrap();
    db.execute("INSERT INTO pk (id) VALUES (?)", &["x"]).unwrap();

    let err = db
        .execute("INSERT INTO pk (id) VALUES (?)", &["x"])
        .unwrap_err();
    assert!(
        matches!(err, DbError::ConstraintViolation(_)),
        "expected constraint violation, got {err:?}"
    );
}

#[test]
fn test_syntax_error_is_execution_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute_batch("CREATE TABLEE nope").unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
}

#[test]
fn test_rollback_discards_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute_batch("CREATE TABLE temp_t (id INT)").unwrap();
    db.rollback().unwrap();

    assert!(db.execute_batch("SELECT * FROM temp_t").is_err());
}

#[test]
fn test_commit_keeps_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute_batch("CREATE TABLE kept (id INT)").unwrap();
    db.commit().unwrap();

    assert_eq!(db.query_i64("SELECT COUNT(*) FROM kept", &[]).unwrap(), 0);
}

#[test]
fn test_commit_without_transaction_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.commit().unwrap_err();
    assert!(matches!(err, DbError::TransactionError(_)));
}
