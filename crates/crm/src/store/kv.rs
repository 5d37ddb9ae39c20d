//! File-backed key-value store.
//!
//! One JSON document per key, stored as `<key>.json` under the data
//! directory. Reads are infallible by contract: a missing, unreadable, or
//! malformed document yields `None` (with a warn-level log for anything other
//! than a missing file) so a damaged store degrades to empty collections
//! instead of blocking the caller.
//!
//! Writes go through a temp file in the same directory, fsync, then rename,
//! so a crash mid-write never leaves a half-written document behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors from store writes. Reads never surface errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters outside `[a-z0-9_]`.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized to JSON.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A directory of JSON documents, one per key.
#[derive(Debug)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Read and deserialize the document stored under `key`.
    ///
    /// Returns `None` for a missing document, and also for an unreadable or
    /// malformed one - corruption is logged and absorbed, never surfaced.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = match self.path_for(key) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(key, %err, "rejected store read");
                return None;
            }
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(key, %err, "unreadable store document, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, %err, "malformed store document, treating as absent");
                None
            }
        }
    }

    /// Whether a document exists under `key`, regardless of whether it parses.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).is_ok_and(|path| path.exists())
    }

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the write fails. A
    /// failed write leaves the previous document intact.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let staged = self.stage(value)?;
        persist(staged, &path)?;
        Ok(())
    }

    /// Remove the document stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key is invalid or the removal fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace several documents together.
    ///
    /// Every document is staged and fsynced before the first rename, so a
    /// serialization or I/O failure while staging leaves every key untouched.
    /// The rename sequence itself is the only remaining non-atomic window.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any key is invalid or any stage/rename
    /// fails.
    pub fn write_batch(&self, entries: &[(&str, serde_json::Value)]) -> Result<(), StorageError> {
        let mut staged = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let path = self.path_for(key)?;
            staged.push((self.stage(value)?, path));
        }
        for (file, path) in staged {
            persist(file, &path)?;
        }
        Ok(())
    }

    /// Serialize `value` into a synced temp file in the store directory.
    fn stage<T: Serialize>(&self, value: &T) -> Result<NamedTempFile, StorageError> {
        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer(&mut file, value)?;
        file.flush()?;
        file.as_file().sync_all()?;
        Ok(file)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn persist(file: NamedTempFile, path: &Path) -> Result<(), StorageError> {
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (_dir, store) = store();
        assert_eq!(store.get::<Vec<String>>("crm_clients_v1"), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let (_dir, store) = store();
        let value = vec!["a".to_owned(), "b".to_owned()];
        store.set("crm_clients_v1", &value).unwrap();
        assert_eq!(store.get::<Vec<String>>("crm_clients_v1"), Some(value));
    }

    #[test]
    fn test_malformed_document_reads_as_absent() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("crm_clients_v1.json"), "{not json").unwrap();
        assert_eq!(store.get::<Vec<String>>("crm_clients_v1"), None);
        assert!(store.contains("crm_clients_v1"));
    }

    #[test]
    fn test_mistyped_document_reads_as_absent() {
        let (_dir, store) = store();
        store.set("crm_clients_v1", &42_u32).unwrap();
        assert_eq!(store.get::<Vec<String>>("crm_clients_v1"), None);
    }

    #[test]
    fn test_set_overwrites_corruption() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("crm_clients_v1.json"), "garbage").unwrap();
        store.set("crm_clients_v1", &vec!["x".to_owned()]).unwrap();
        assert_eq!(
            store.get::<Vec<String>>("crm_clients_v1"),
            Some(vec!["x".to_owned()])
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = store();
        store.set("crm_auth_user_v1", &"x").unwrap();
        store.remove("crm_auth_user_v1").unwrap();
        store.remove("crm_auth_user_v1").unwrap();
        assert!(!store.contains("crm_auth_user_v1"));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.set("../escape", &1),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            store.set("UpperCase", &1),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.set("", &1), Err(StorageError::InvalidKey(_))));
        assert_eq!(store.get::<u32>("has space"), None);
    }

    #[test]
    fn test_write_batch_replaces_every_key() {
        let (_dir, store) = store();
        store
            .write_batch(&[
                ("crm_clients_v1", serde_json::json!(["a"])),
                ("crm_client_passwords_v1", serde_json::json!({"a": "h"})),
            ])
            .unwrap();
        assert_eq!(
            store.get::<Vec<String>>("crm_clients_v1"),
            Some(vec!["a".to_owned()])
        );
        assert!(store.contains("crm_client_passwords_v1"));
    }

    #[test]
    fn test_write_batch_invalid_key_leaves_store_untouched() {
        let (_dir, store) = store();
        store.set("crm_clients_v1", &vec!["keep".to_owned()]).unwrap();
        let result = store.write_batch(&[
            ("crm_clients_v1", serde_json::json!(["clobbered"])),
            ("BAD KEY", serde_json::json!(null)),
        ]);
        assert!(result.is_err());
        assert_eq!(
            store.get::<Vec<String>>("crm_clients_v1"),
            Some(vec!["keep".to_owned()])
        );
    }
}
