use std::fs;
use std::path::Path;

use serde::Deserialize;

/// One row from a contact-provider snapshot. Either field may be null or
/// absent in the source data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRow {
    pub name: Option<String>,
    pub number: Option<String>,
}

/// Read a provider snapshot (a JSON array of rows).
///
/// An unreadable or malformed snapshot degrades to an empty row list so the
/// caller always has a renderable contact list, the same way a denied
/// contacts permission leaves the list empty.
pub fn read_snapshot(path: &Path) -> Vec<RawRow> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!(
                "warning: unable to read contact snapshot {}: {err}",
                path.display()
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!(
                "warning: unable to parse contact snapshot {}: {err}",
                path.display()
            );
            Vec::new()
        }
    }
}
