use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user as returned by `GET /auth/me`.
///
/// Passed through untouched: the session layer stores it but never interprets
/// any field. Timestamps stay in the backend's string form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    /// Subject identifier at the external identity provider.
    #[serde(rename = "keycloak_id")]
    pub external_identity_id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of exchanging an authorization code at `POST /auth/callback`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of `access_token` in seconds, counted from receipt.
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// `{ "url": ... }` body of `/auth/login-url` and `/auth/logout-url`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RedirectUrl {
    pub url: String,
}
