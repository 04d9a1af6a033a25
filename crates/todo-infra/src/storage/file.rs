//! File-backed token storage - the CLI's equivalent of browser local storage.
//!
//! The whole key/value map lives in one small JSON file that is re-read on
//! every access, so separate processes observe each other's logins and
//! logouts.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use todo_core::ports::{StorageError, TokenStorage};

type Entries = BTreeMap<String, String>;

/// JSON-file storage.
///
/// A missing file reads as empty. Writes create the parent directory and
/// replace the file atomically.
pub struct FileTokenStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    // Written to a sibling temp file (0600 on unix) and renamed over the
    // session file, so readers see either the old map or the new one.
    fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
                parent
            }
            None => Path::new("."),
        };
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut staged =
            NamedTempFile::new_in(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        staged
            .write_all(raw.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| StorageError::Io(e.to_string()))?;
        staged
            .persist(&self.path)
            .map_err(|e| StorageError::Io(e.error.to_string()))?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let mut entries = self.load()?;
        apply(&mut entries);
        self.save(&entries)
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable session file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
