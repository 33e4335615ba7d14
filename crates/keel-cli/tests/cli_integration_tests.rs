//! End-to-end tests for the keel binary

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn keel_bin() -> String {
    env!("CARGO_BIN_EXE_keel").to_string()
}

/// Run keel in `project` and return (stdout, stderr, success).
fn run_keel(project: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(keel_bin())
        .args(args)
        .arg("--project-dir")
        .arg(project)
        .env_remove("KEEL_DATABASE")
        .env_remove("KEEL_MIGRATIONS")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute keel with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Project with `count` migrations `001_t1.sql`, `002_t2.sql`, ...
fn project_with_migrations(count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    let migrations = dir.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    for i in 1..=count {
        fs::write(
            migrations.join(format!("{i:03}_t{i}.sql")),
            format!("-- Migration Up\nCREATE TABLE t{i} (id INTEGER);\n-- Migration Down\nDROP TABLE t{i};\n"),
        )
        .unwrap();
    }
    dir
}

#[test]
fn test_migrate_up_then_already_latest() {
    let project = project_with_migrations(2);

    let (stdout, stderr, ok) = run_keel(project.path(), &["migrate-up"]);
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("Successfully applied migration: 001_t1"));
    assert!(stdout.contains("Successfully applied migration: 002_t2"));

    let (stdout, _, ok) = run_keel(project.path(), &["migrate-up"]);
    assert!(ok);
    assert!(stdout.contains("already at the latest version"));
}

#[test]
fn test_by_number_and_current_version() {
    let project = project_with_migrations(5);

    let (_, stderr, ok) = run_keel(project.path(), &["migrate-up-by-number", "-n", "3"]);
    assert!(ok, "stderr: {stderr}");
    let (stdout, _, _) = run_keel(project.path(), &["current-version"]);
    assert_eq!(stdout.trim(), "Current version: 3");

    let (stdout, _, ok) = run_keel(project.path(), &["migrate-down-by-number"]);
    assert!(ok);
    assert!(stdout.contains("Successfully rolled back migration: 003_t3"));
    let (stdout, _, _) = run_keel(project.path(), &["current-version"]);
    assert_eq!(stdout.trim(), "Current version: 2");
}

#[test]
fn test_count_out_of_range_fails() {
    let project = project_with_migrations(5);

    let (_, stderr, ok) = run_keel(project.path(), &["migrate-up-by-number", "--number", "6"]);
    assert!(!ok);
    assert!(stderr.contains("only 5 are available"), "stderr: {stderr}");

    let (stdout, _, _) = run_keel(project.path(), &["current-version"]);
    assert_eq!(stdout.trim(), "Current version: 0");
}

#[test]
fn test_migrate_down_rolls_back_everything() {
    let project = project_with_migrations(3);
    run_keel(project.path(), &["migrate-up"]);

    let (stdout, _, ok) = run_keel(project.path(), &["migrate-down"]);
    assert!(ok);
    let order: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.strip_prefix("Successfully rolled back migration: "))
        .collect();
    assert_eq!(order, vec!["003_t3", "002_t2", "001_t1"]);

    let (stdout, _, _) = run_keel(project.path(), &["migrate-down"]);
    assert!(stdout.contains("No applied migrations to roll back."));
}

#[test]
fn test_status_json() {
    let project = project_with_migrations(2);
    run_keel(project.path(), &["migrate-up-by-number"]);

    let (stdout, stderr, ok) = run_keel(project.path(), &["status", "--output", "json"]);
    assert!(ok, "stderr: {stderr}");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["migrations"][0]["state"], "applied");
    assert_eq!(json["migrations"][1]["state"], "pending");
}

#[test]
fn test_config_file_sets_paths() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("db/changes")).unwrap();
    fs::write(
        dir.path().join("db/changes/001_init.sql"),
        "CREATE TABLE init (id INTEGER);\n-- Migration Down\nDROP TABLE init;\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("keel.yml"),
        "migrations_path: db/changes\ndatabase:\n  path: state.duckdb\n",
    )
    .unwrap();

    let (_, stderr, ok) = run_keel(dir.path(), &["migrate-up"]);
    assert!(ok, "stderr: {stderr}");
    assert!(dir.path().join("state.duckdb").exists());
}

#[test]
fn test_malformed_migration_reports_file() {
    let project = project_with_migrations(1);
    fs::write(
        project.path().join("migrations/002_broken.sql"),
        "CREATE TABLE broken (id INTEGER);\n",
    )
    .unwrap();

    let (_, stderr, ok) = run_keel(project.path(), &["migrate-up"]);
    assert!(!ok);
    assert!(stderr.contains("002_broken"), "stderr: {stderr}");
    assert!(!project.path().join("keel.duckdb").exists());
}
