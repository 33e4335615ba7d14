//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use keel_core::{Config, MigrationSet};
use keel_db::DuckDbBackend;
use keel_engine::{MigrationRunner, MigrationStore};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Settings after merging CLI flags, environment, config file, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) migrations_dir: PathBuf,
    pub(crate) database_path: String,
    pub(crate) transactional: bool,
}

impl Settings {
    /// Resolve settings for a command invocation.
    ///
    /// Relative paths from the config file are resolved against the project
    /// directory; paths given on the command line are used as-is.
    pub(crate) fn resolve(global: &GlobalArgs) -> Result<Self> {
        let root = Path::new(&global.project_dir);
        let config = match &global.config {
            Some(path) => Config::load(Path::new(path))
                .with_context(|| format!("could not load config file {path}"))?,
            None => Config::load_from_dir(root).context("could not load config")?,
        };

        let migrations_dir = match &global.migrations {
            Some(dir) => PathBuf::from(dir),
            None => config.migrations_path_absolute(root),
        };
        let database_path = match &global.database {
            Some(path) => path.clone(),
            None => config.database_path_absolute(root),
        };

        Ok(Self {
            migrations_dir,
            database_path,
            transactional: config.transactional && !global.no_transaction,
        })
    }
}

/// Load migrations, open the database, ensure the tracking table exists, and
/// hand a runner to `body`.
///
/// The connection lives for the duration of `body` and is closed when this
/// returns.
pub(crate) fn with_runner<T>(
    global: &GlobalArgs,
    body: impl FnOnce(&MigrationRunner<'_, DuckDbBackend>) -> Result<T>,
) -> Result<T> {
    let settings = Settings::resolve(global)?;
    if global.verbose {
        eprintln!("Migrations directory: {}", settings.migrations_dir.display());
        eprintln!("Database: {}", settings.database_path);
    }

    let migrations = MigrationSet::load_from_dir(&settings.migrations_dir)
        .context("could not load migrations")?;
    log::debug!("Loaded {} migrations", migrations.len());

    let db = DuckDbBackend::new(&settings.database_path).context("could not open database")?;
    MigrationStore::new(&db)
        .ensure_table_exists()
        .context("could not create migrations table")?;

    let runner =
        MigrationRunner::new(&db, &migrations).with_transactions(settings.transactional);
    body(&runner)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
