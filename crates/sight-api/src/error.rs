use sight_auth::AuthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the backend. The session has already been reset.
    #[error("backend rejected the credential (401)")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::Unauthorized,
            other => Self::Backend(other.to_string()),
        }
    }
}
