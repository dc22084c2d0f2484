use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("backend rejected the credential (401); run `sight auth login`")]
    Unauthorized,

    #[error("identity backend error: {0}")]
    Backend(String),

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("login callback failed: {0}")]
    CallbackFailed(String),
}
