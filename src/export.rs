use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::batch;
use crate::contact::Contact;
use crate::vcard;

/// File name used by the single-file export.
pub const SINGLE_FILE_NAME: &str = "contacts.vcf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("batch size must be a positive integer")]
    InvalidBatchSize,

    #[error("failed to create export directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File name for batch `index` (1-indexed).
pub fn batch_file_name(index: usize) -> String {
    format!("contacts{index}.vcf")
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: PathBuf, text: &str) -> Result<PathBuf, ExportError> {
    match fs::write(&path, text) {
        Ok(()) => Ok(path),
        Err(source) => Err(ExportError::Write { path, source }),
    }
}

/// Encode every given contact into a single `contacts.vcf` in `dir`,
/// overwriting any previous export of that name.
pub fn write_single(dir: &Path, contacts: &[Contact]) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    write_file(dir.join(SINGLE_FILE_NAME), &vcard::encode_all(contacts))
}

/// Partition the contacts and write batch `i` to `contacts<i>.vcf` in
/// `dir`, overwriting. Paths are returned in batch order.
///
/// Each file's write is independent: a failure aborts that file and is
/// surfaced, but files already written by the same call are kept.
pub fn write_batches(
    dir: &Path,
    contacts: &[Contact],
    batch_size: usize,
) -> Result<Vec<PathBuf>, ExportError> {
    let groups = batch::partition(contacts, batch_size)?;
    ensure_dir(dir)?;

    let mut files = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let path = dir.join(batch_file_name(index + 1));
        files.push(write_file(path, &vcard::encode_all(group))?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn contacts(count: usize) -> Vec<Contact> {
        (0..count)
            .map(|i| Contact {
                name: format!("Contact {i}"),
                number: format!("{i:010}"),
            })
            .collect()
    }

    fn record_count(path: &Path) -> usize {
        let text = fs::read_to_string(path).unwrap();
        text.lines().filter(|l| *l == "BEGIN:VCARD").count()
    }

    #[test]
    fn test_write_single_creates_contacts_vcf() {
        let dir = TempDir::new().unwrap();
        let file = write_single(dir.path(), &contacts(3)).unwrap();

        assert_eq!(file, dir.path().join("contacts.vcf"));
        assert_eq!(record_count(&file), 3);
    }

    #[test]
    fn test_write_single_overwrites_previous_export() {
        let dir = TempDir::new().unwrap();
        write_single(dir.path(), &contacts(5)).unwrap();
        let file = write_single(dir.path(), &contacts(2)).unwrap();

        assert_eq!(record_count(&file), 2);
    }

    #[test]
    fn test_write_single_empty_selection_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let file = write_single(dir.path(), &[]).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "");
    }

    #[test]
    fn test_write_batches_names_and_sizes() {
        let dir = TempDir::new().unwrap();
        let files = write_batches(dir.path(), &contacts(250), 100).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["contacts1.vcf", "contacts2.vcf", "contacts3.vcf"]);

        assert_eq!(record_count(&files[0]), 100);
        assert_eq!(record_count(&files[1]), 100);
        assert_eq!(record_count(&files[2]), 50);
    }

    #[test]
    fn test_write_batches_creates_missing_export_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports");
        let files = write_batches(&nested, &contacts(1), 100).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].exists());
    }

    #[test]
    fn test_write_batches_rejects_zero_batch_size() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            write_batches(dir.path(), &contacts(5), 0),
            Err(ExportError::InvalidBatchSize)
        ));
    }

    #[test]
    fn test_write_batches_empty_list_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let files = write_batches(dir.path(), &[], 100).unwrap();

        assert!(files.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_is_surfaced() {
        // A file standing where the export directory should be makes the
        // write fail without touching siblings.
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("exports");
        fs::write(&blocked, "not a directory").unwrap();

        let err = write_single(&blocked, &contacts(1)).unwrap_err();
        assert!(matches!(
            err,
            ExportError::CreateDir { .. } | ExportError::Write { .. }
        ));
    }
}
