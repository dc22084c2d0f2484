use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::storage::KeyValueStorage;

/// Storage key holding the raw access token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key holding the absolute expiry as decimal epoch milliseconds.
pub const TOKEN_EXPIRY_KEY: &str = "auth_token_expiry";

/// Persisted access credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub access_token: String,
    pub expires_at_epoch_millis: i64,
}

impl CredentialRecord {
    /// Expiry as a timestamp. `None` if the millisecond value is out of range.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expires_at_epoch_millis)
    }

    /// `now >= expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at_epoch_millis
    }
}

/// Token + expiry pair over a [`KeyValueStorage`].
///
/// Either both keys are present and parse, or the credential is absent.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist a token and its absolute expiry.
    ///
    /// The expiry is written first so an interrupted save leaves no token
    /// without an expiry behind.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` / `KeyringError` if either write fails.
    pub fn save(&self, token: &str, expires_at_epoch_millis: i64) -> Result<(), AuthError> {
        self.storage
            .set(TOKEN_EXPIRY_KEY, &expires_at_epoch_millis.to_string())?;
        self.storage.set(TOKEN_KEY, token)
    }

    /// Load the stored credential.
    ///
    /// Missing keys, an empty token, an unparsable expiry, and unreadable
    /// storage all load as `None`.
    #[must_use]
    pub fn load(&self) -> Option<CredentialRecord> {
        let token = self.read(TOKEN_KEY)?;
        let expiry = self.read(TOKEN_EXPIRY_KEY);

        let Some(expiry) = expiry else {
            tracing::warn!("stored token has no expiry; treating credential as absent");
            return None;
        };

        match expiry.trim().parse::<i64>() {
            Ok(expires_at_epoch_millis) => Some(CredentialRecord {
                access_token: token,
                expires_at_epoch_millis,
            }),
            Err(error) => {
                tracing::warn!(%error, "stored token expiry is not an integer; treating credential as absent");
                None
            }
        }
    }

    /// Remove both keys. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the storage error of the first key that could not be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        let token = self.storage.remove(TOKEN_KEY);
        let expiry = self.storage.remove(TOKEN_EXPIRY_KEY);
        token.and(expiry)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(error) => {
                tracing::warn!(%error, key, "credential storage read failed");
                None
            }
        }
    }
}
