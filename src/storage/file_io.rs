//! JSON file helpers
//!
//! Reads go through serde straight from a buffered file. Writes land in a
//! sibling temp file first and are renamed into place, so a reader never
//! sees a half-written document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinanceError, FinanceResult};

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> FinanceError {
    FinanceError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> FinanceResult<T> {
    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Parse `path`, or fall back to `T::default()` when it does not exist
pub fn read_json<T, P>(path: P) -> FinanceResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        parse_file(path)
    } else {
        Ok(T::default())
    }
}

/// Parse `path`; a missing file is an error
pub fn read_json_required<T, P>(path: P) -> FinanceResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(FinanceError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

/// Pretty-print `data` to `path` via a temp file and rename
///
/// Missing parent directories are created.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> FinanceResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Money};
    use tempfile::TempDir;

    fn accounts() -> Vec<Account> {
        vec![Account::new("acc1", "Kaspi", Money::from_minor(1500), "KZT")]
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Vec<Account> = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_missing_file_is_required() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_required::<Vec<Account>, _>(temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("accounts.json");

        write_json_atomic(&path, &accounts()).unwrap();

        let loaded: Vec<Account> = read_json_required(&path).unwrap();
        assert_eq!(loaded, accounts());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_names_the_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Vec<Account>, _>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
