use std::collections::HashSet;

use crate::provider::RawRow;

/// Display name used when a provider row has none.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A single exportable contact. Identity is the normalized (name, number)
/// pair; `number` is never empty once a Contact exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    pub name: String,
    pub number: String,
}

/// Missing names become the `Unknown` placeholder; present names keep their
/// interior whitespace and lose only the leading/trailing runs.
fn normalize_name(raw: Option<&str>) -> String {
    match raw {
        Some(name) => name.trim().to_string(),
        None => UNKNOWN_NAME.to_string(),
    }
}

/// Numbers lose every whitespace character, wherever it appears.
fn normalize_number(raw: Option<&str>) -> String {
    match raw {
        Some(number) => number.chars().filter(|c| !c.is_whitespace()).collect(),
        None => String::new(),
    }
}

/// Collapse raw provider rows into the deduplicated contact list.
///
/// Rows whose normalized number is empty are dropped before a Contact is
/// ever built. Duplicate (name, number) pairs keep the first occurrence, so
/// the output order is the encounter order of the surviving rows and is
/// deterministic for a deterministic input.
pub fn dedup_contacts(rows: impl IntoIterator<Item = RawRow>) -> Vec<Contact> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut contacts = Vec::new();

    for row in rows {
        let name = normalize_name(row.name.as_deref());
        let number = normalize_number(row.number.as_deref());
        if number.is_empty() {
            continue;
        }
        if seen.insert((name.clone(), number.clone())) {
            contacts.push(Contact { name, number });
        }
    }

    contacts
}
