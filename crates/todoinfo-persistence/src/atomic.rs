//! Crash-safe JSON file helpers.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PersistenceError, Result};

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Serializes `value` as pretty JSON and writes it to `path` atomically.
///
/// The bytes go to a temporary file in the target directory which is then
/// renamed over `path`, so readers never observe a half-written snapshot.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    let dir = path.parent().unwrap_or(Path::new("."));
    ensure_dir(dir)?;

    let write_err = |source| PersistenceError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp_file.write_all(&json).map_err(write_err)?;
    temp_file.flush().map_err(write_err)?;
    temp_file.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Reads and decodes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read(path).map_err(|source| PersistenceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        list: String,
        age: u64,
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data/nested/sample.json");

        let sample = Sample {
            list: "🏠Home".into(),
            age: 24,
        };
        write_json_atomic(&path, &sample).unwrap();

        assert!(path.exists());
        assert_eq!(read_json::<Sample>(&path).unwrap(), sample);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.json");

        write_json_atomic(&path, &Sample { list: "a".into(), age: 1 }).unwrap();
        write_json_atomic(&path, &Sample { list: "b".into(), age: 2 }).unwrap();

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded.list, "b");
        // Only the target file remains, no stray temp files.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_json_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_json::<Sample>(&missing),
            Err(PersistenceError::ReadError { .. })
        ));

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(
            read_json::<Sample>(&corrupt),
            Err(PersistenceError::SerializeError(_))
        ));
    }
}
