//! Atomic full-state writer for the backing file
//!
//! Every commit rewrites the complete document:
//! 1. Serialize state
//! 2. Write to `<file>.tmp`
//! 3. fsync temp file
//! 4. Rename temp over the backing file (atomic on POSIX)
//! 5. fsync the parent directory so the rename survives a crash
//!
//! A crash before step 4 leaves the previous committed version in place.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::state::DbState;
use crate::crash_point::{maybe_crash, points};
use crate::observability::{log_event_with_fields, Event};

/// Owns the backing file path and its temp sibling.
#[derive(Debug)]
pub struct SnapshotWriter {
    path: PathBuf,
    temp_path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: &Path) -> Self {
        let mut temp_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("database.json"));
        temp_name.push(".tmp");

        Self {
            path: path.to_path_buf(),
            temp_path: path.with_file_name(temp_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Reads the committed state.
    ///
    /// Returns `Ok(None)` when the file is absent or empty. Unreadable or
    /// malformed contents are `StorageUnavailable`.
    pub fn load(&self) -> StoreResult<Option<DbState>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::unavailable(
                    &self.path,
                    format!("failed to read backing file: {}", e),
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let state: DbState = serde_json::from_str(&content).map_err(|e| {
            StoreError::unavailable(&self.path, format!("malformed backing file: {}", e))
        })?;

        state.validate().map_err(|reason| {
            StoreError::unavailable(&self.path, format!("inconsistent backing file: {}", reason))
        })?;

        Ok(Some(state))
    }

    /// Durably replaces the backing file with `state`.
    ///
    /// Errors carry the failing step; callers decide which error kind the
    /// failure maps to.
    pub fn write_atomic(&self, state: &DbState) -> Result<(), String> {
        let content = serde_json::to_vec_pretty(state)
            .map_err(|e| format!("failed to serialize state: {}", e))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(|e| {
                format!(
                    "failed to create temp file {}: {}",
                    self.temp_path.display(),
                    e
                )
            })?;

        file.write_all(&content)
            .map_err(|e| format!("failed to write temp file: {}", e))?;

        file.sync_all()
            .map_err(|e| format!("failed to fsync temp file: {}", e))?;

        maybe_crash(points::STORE_BEFORE_RENAME);

        fs::rename(&self.temp_path, &self.path)
            .map_err(|e| format!("failed to commit backing file: {}", e))?;

        // The new content is already in place; a failed directory sync
        // cannot be rolled back, only reported.
        if let Err(e) = sync_parent_dir(&self.path) {
            log_event_with_fields(
                Event::StoreDirSyncFailed,
                &[
                    ("path", &self.path.display().to_string()),
                    ("reason", &e.to_string()),
                ],
            );
        }

        maybe_crash(points::STORE_AFTER_RENAME);

        Ok(())
    }

    /// Removes the backing file and any leftover temp file.
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        if self.temp_path.exists() {
            let _ = fs::remove_file(&self.temp_path);
        }
        Ok(())
    }
}

/// fsyncs the directory holding `path` so a rename into it is durable.
fn sync_parent_dir(path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(dir)?.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_is_sibling() {
        let writer = SnapshotWriter::new(Path::new("/data/database.json"));
        assert_eq!(writer.temp_path(), Path::new("/data/database.json.tmp"));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(&tmp.path().join("database.json"));

        assert!(writer.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("database.json");
        fs::write(&path, "  \n").unwrap();

        let writer = SnapshotWriter::new(&path);
        assert!(writer.load().unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let tmp = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(&tmp.path().join("database.json"));

        let mut state = DbState::default();
        state.insert_chirp("persisted");
        writer.write_atomic(&state).unwrap();

        let loaded = writer.load().unwrap().unwrap();
        assert_eq!(loaded, state);
        assert!(!writer.temp_path().exists());
    }

    #[test]
    fn test_malformed_file_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("database.json");
        fs::write(&path, "{\"chirps\": ").unwrap();

        let err = SnapshotWriter::new(&path).load().unwrap_err();
        assert_eq!(err.code(), "CHIRPY_STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_stale_temp_file_does_not_affect_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("database.json");
        let writer = SnapshotWriter::new(&path);

        let mut state = DbState::default();
        state.insert_chirp("committed");
        writer.write_atomic(&state).unwrap();

        // Half-written temp from an interrupted commit
        fs::write(writer.temp_path(), "{\"chirps\": {\"2\"").unwrap();

        assert_eq!(writer.load().unwrap().unwrap(), state);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(&tmp.path().join("database.json"));

        writer.write_atomic(&DbState::default()).unwrap();
        writer.remove().unwrap();
        writer.remove().unwrap();

        assert!(!writer.path().exists());
    }

    #[test]
    fn test_sync_parent_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(sync_parent_dir(&tmp.path().join("database.json")).is_ok());
        assert!(sync_parent_dir(&tmp.path().join("missing").join("database.json")).is_err());
    }
}
