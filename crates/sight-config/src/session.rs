//! Session persistence and redirect-flow settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the access credential is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file under the user's home directory.
    #[default]
    File,
    /// OS keychain.
    Keyring,
    /// Process memory only; nothing survives a restart.
    Memory,
}

fn default_keyring_service() -> String {
    "sight-cli".to_string()
}

fn default_root_route() -> String {
    "/".to_string()
}

fn default_callback_route() -> String {
    "/auth/callback".to_string()
}

fn default_callback_bind() -> String {
    "127.0.0.1:5173".to_string()
}

const fn default_callback_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub storage: StorageBackend,

    /// Credentials file for the `file` backend. Empty means `~/.sight/credentials.json`.
    #[serde(default)]
    pub credentials_path: String,

    /// Keychain service name for the `keyring` backend.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Application route reloaded after the backend rejects the credential.
    #[serde(default = "default_root_route")]
    pub root_route: String,

    /// Route the identity provider redirects back to with `?code=`.
    #[serde(default = "default_callback_route")]
    pub callback_route: String,

    /// Loopback address the callback listener binds while a login is pending.
    #[serde(default = "default_callback_bind")]
    pub callback_bind: String,

    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            credentials_path: String::new(),
            keyring_service: default_keyring_service(),
            root_route: default_root_route(),
            callback_route: default_callback_route(),
            callback_bind: default_callback_bind(),
            callback_timeout_secs: default_callback_timeout_secs(),
        }
    }
}

impl SessionConfig {
    /// Resolve the credentials file path for the `file` backend.
    ///
    /// Returns `None` only when no override is set and the home directory
    /// cannot be determined.
    #[must_use]
    pub fn credentials_file(&self) -> Option<PathBuf> {
        if !self.credentials_path.is_empty() {
            return Some(PathBuf::from(&self.credentials_path));
        }
        dirs::home_dir().map(|home| home.join(".sight").join("credentials.json"))
    }
}
