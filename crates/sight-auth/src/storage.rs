//! Durable string-keyed storage behind the credential store.
//!
//! Three backends: process memory (tests, throwaway sessions), a JSON file
//! under the home directory, and the OS keychain.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

/// Synchronous get/set/delete by key.
///
/// A successful `set` or `remove` must be visible to the next `get`, including
/// one made from a freshly started process when the backend is durable.
pub trait KeyValueStorage: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// In-process map. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// JSON object file, rewritten in full on every change.
///
/// Writes go to a sibling temp file that is renamed over the original, so a
/// reader never sees a half-written file. The parent directory is created
/// `0700` and the file `0600` on Unix.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File contents, or `None` when the file is missing or blank.
    fn read_content(&self) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, AuthError> {
        let Some(content) = self.read_content()? else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&content).map_err(|e| {
            AuthError::TokenStoreError(format!("parse {}: {e}", self.path.display()))
        })
    }

    /// Entries to start a write from. A file that no longer parses is
    /// discarded so the write replaces it; the flag reports that.
    fn entries_for_write(&self) -> Result<(BTreeMap<String, String>, bool), AuthError> {
        let Some(content) = self.read_content()? else {
            return Ok((BTreeMap::new(), false));
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Ok((entries, false)),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "credentials file is corrupt; replacing it"
                );
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    AuthError::TokenStoreError(format!(
                        "failed to delete {}: {e}",
                        self.path.display()
                    ))
                })?;
            }
            return Ok(());
        }

        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| {
            AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }

        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| AuthError::TokenStoreError(format!("encode credentials: {e}")))?;

        // NamedTempFile is created 0600 on Unix; the mode carries over on rename.
        let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
            AuthError::TokenStoreError(format!("stage in {}: {e}", parent.display()))
        })?;
        staged
            .write_all(body.as_bytes())
            .map_err(|e| AuthError::TokenStoreError(format!("write staged credentials: {e}")))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| AuthError::TokenStoreError(format!("sync staged credentials: {e}")))?;
        staged.persist(&self.path).map_err(|e| {
            AuthError::TokenStoreError(format!("replace {}: {}", self.path.display(), e.error))
        })?;

        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut entries, _) = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut entries, discarded) = self.entries_for_write()?;
        if entries.remove(key).is_none() && !discarded {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}


/// OS keychain, one entry per key under a shared service name.
#[derive(Debug, Clone)]
pub struct KeyringStorage {
    service: String,
}

impl KeyringStorage {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, AuthError> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| AuthError::KeyringError(format!("{}/{key}: {e}", self.service)))
    }
}

impl KeyValueStorage for KeyringStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AuthError::KeyringError(format!("read {key}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| AuthError::KeyringError(format!("write {key}: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::KeyringError(format!("delete {key}: {e}"))),
        }
    }
}
