//! Backend API connection settings.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root every request path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for any single backend request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// `base_url` without a trailing slash, ready for `format!("{root}{path}")`.
    #[must_use]
    pub fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
