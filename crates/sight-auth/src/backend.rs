use std::future::Future;

use sight_core::{TokenGrant, UserProfile};

use crate::error::AuthError;

/// The backend's `/auth` endpoints, as seen by the session controller.
///
/// Implementations route `current_user` through the request authorizer and
/// response gatekeeper like any other API call; the identity provider itself
/// stays behind the two URLs returned here.
pub trait IdentityBackend: Send + Sync {
    /// `GET /auth/login-url`.
    fn login_url(&self) -> impl Future<Output = Result<String, AuthError>> + Send;

    /// `POST /auth/callback?code=...`.
    fn exchange_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<TokenGrant, AuthError>> + Send;

    /// `GET /auth/logout-url`.
    fn logout_url(&self) -> impl Future<Output = Result<String, AuthError>> + Send;

    /// `GET /auth/me` with the current bearer credential.
    fn current_user(&self) -> impl Future<Output = Result<UserProfile, AuthError>> + Send;
}
