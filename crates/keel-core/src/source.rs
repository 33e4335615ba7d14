//! Loading a directory of migration files into an ordered set

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::migration_id::MigrationId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Ordered, immutable sequence of migration units.
///
/// Units are sorted by ID and IDs are pairwise unique. The set is a plain
/// value owned by whoever loaded it; runners borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSet {
    migrations: Vec<Migration>,
}

impl MigrationSet {
    /// Load every `.sql` file under `dir` (recursively).
    ///
    /// Any unreadable entry, malformed file, or duplicate ID rejects the
    /// whole load.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let mut files = Vec::new();
        discover_sql_recursive(dir, &mut files)?;
        // Walk order is filesystem dependent
        files.sort();

        let mut seen: HashMap<MigrationId, PathBuf> = HashMap::with_capacity(files.len());
        let mut migrations = Vec::with_capacity(files.len());

        for path in files {
            let id = migration_id_for(&path)?;
            if let Some(first) = seen.get(&id) {
                return Err(CoreError::DuplicateId {
                    id: id.into_inner(),
                    first: first.display().to_string(),
                    second: path.display().to_string(),
                });
            }

            let content = std::fs::read_to_string(&path).map_err(|e| CoreError::Load {
                path: path.display().to_string(),
                source: e,
            })?;
            let migration =
                Migration::parse(id.clone(), &content).map_err(|issue| CoreError::Format {
                    id: id.to_string(),
                    path: path.display().to_string(),
                    issue,
                })?;

            log::debug!("Loaded migration {} from {}", id, path.display());
            seen.insert(id, path);
            migrations.push(migration);
        }

        migrations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(Self { migrations })
    }

    /// Build a set from in-memory units, applying the same ordering and
    /// uniqueness rules as [`load_from_dir`](Self::load_from_dir).
    pub fn from_migrations(mut migrations: Vec<Migration>) -> CoreResult<Self> {
        migrations.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(pair) = migrations.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(CoreError::DuplicateId {
                id: pair[0].id.to_string(),
                first: "<memory>".to_string(),
                second: "<memory>".to_string(),
            });
        }
        Ok(Self { migrations })
    }

    /// Number of units in the set
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Whether the set has no units
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Iterate units in application order
    pub fn iter(&self) -> std::slice::Iter<'_, Migration> {
        self.migrations.iter()
    }

    /// Unit at a sequence position
    pub fn get(&self, index: usize) -> Option<&Migration> {
        self.migrations.get(index)
    }

    pub fn as_slice(&self) -> &[Migration] {
        &self.migrations
    }

    /// Sequence position of a unit, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.migrations
            .binary_search_by(|m| m.id.as_str().cmp(id))
            .ok()
    }

    /// IDs in application order
    pub fn ids(&self) -> impl Iterator<Item = &MigrationId> {
        self.migrations.iter().map(|m| &m.id)
    }
}

impl<'a> IntoIterator for &'a MigrationSet {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.migrations.iter()
    }
}

/// Recursively collect `.sql` file paths under `dir`.
fn discover_sql_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> CoreResult<()> {
    let load_err = |e| CoreError::Load {
        path: dir.display().to_string(),
        source: e,
    };

    for entry in std::fs::read_dir(dir).map_err(load_err)? {
        let path = entry.map_err(load_err)?.path();
        if path.is_dir() {
            discover_sql_recursive(&path, files)?;
            continue;
        }
        if !path.extension().is_some_and(|e| e == "sql") {
            log::debug!("Skipping non-migration file {}", path.display());
            continue;
        }
        files.push(path);
    }
    Ok(())
}

/// File name without its `.sql` extension, verbatim.
fn migration_id_for(path: &Path) -> CoreResult<MigrationId> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| MigrationId::try_new(s))
        .ok_or_else(|| CoreError::InvalidFileName {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
