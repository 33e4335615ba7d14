//! Migration unit and the `.sql` file format

use crate::error::FormatIssue;
use crate::migration_id::MigrationId;

/// Marker conventionally opening the forward section of a migration file.
pub const UP_MARKER: &str = "-- Migration Up";

/// Marker line separating the forward section from the reverse section.
pub const DOWN_MARKER: &str = "-- Migration Down";

/// A named pair of forward and reverse SQL bodies.
///
/// Both bodies are non-empty. Units are built once at load time and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Unique ID derived from the file name
    pub id: MigrationId,

    /// SQL executed when applying the migration
    pub up: String,

    /// SQL executed when rolling the migration back
    pub down: String,
}

impl Migration {
    /// Build a migration from already-split bodies.
    pub fn new(id: MigrationId, up: impl Into<String>, down: impl Into<String>) -> Self {
        Self {
            id,
            up: up.into(),
            down: down.into(),
        }
    }

    /// Parse the content of a migration file.
    ///
    /// The content must contain exactly one line whose trimmed text is
    /// [`DOWN_MARKER`]. Everything before it (minus a leading [`UP_MARKER`])
    /// is the Up body, everything after it is the Down body. Both are trimmed
    /// and must be non-empty.
    pub fn parse(id: MigrationId, content: &str) -> Result<Self, FormatIssue> {
        let mut markers = Vec::new();
        let mut offset = 0;
        for line in content.split_inclusive('\n') {
            if line.trim() == DOWN_MARKER {
                markers.push((offset, offset + line.len()));
            }
            offset += line.len();
        }

        let (start, end) = match markers.as_slice() {
            [] => return Err(FormatIssue::MissingDownMarker),
            [marker] => *marker,
            many => return Err(FormatIssue::MultipleDownMarkers(many.len())),
        };

        let up = strip_up_marker(&content[..start]);
        let down = content[end..].trim();

        if up.is_empty() {
            return Err(FormatIssue::EmptyUp);
        }
        if down.is_empty() {
            return Err(FormatIssue::EmptyDown);
        }

        Ok(Self::new(id, up, down))
    }
}

/// Trim a section and drop a leading [`UP_MARKER`] if it stands on its own.
fn strip_up_marker(section: &str) -> &str {
    let section = section.trim();
    match section.strip_prefix(UP_MARKER) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => section,
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
