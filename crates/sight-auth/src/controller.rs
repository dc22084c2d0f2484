//! Session lifecycle: login, callback completion, logout and startup
//! rehydration.
//!
//! The controller is the only component that talks to the identity backend
//! and writes the credential store. Expiry is checked lazily (at startup and
//! per request); there is no refresh and no background timer.

use std::sync::Arc;

use chrono::TimeDelta;
use sight_core::UserProfile;

use crate::backend::IdentityBackend;
use crate::error::AuthError;
use crate::session::SessionContext;

pub struct SessionController<B> {
    backend: B,
    session: Arc<SessionContext>,
}

impl<B> std::fmt::Debug for SessionController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<B: IdentityBackend> SessionController<B> {
    pub fn new(backend: B, session: Arc<SessionContext>) -> Self {
        Self { backend, session }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch the login URL and navigate to it.
    ///
    /// No local state changes; control leaves the application once the
    /// navigation starts.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the URL cannot be fetched, or
    /// `AuthError::Navigation` if navigation fails.
    pub async fn login(&self) -> Result<(), AuthError> {
        let url = self.backend.login_url().await?;
        tracing::info!("redirecting to identity provider for login");
        self.session.navigator().assign(&url)
    }

    /// Complete a login redirect: exchange `code`, persist the credential,
    /// then load the user profile.
    ///
    /// Returns the profile, or `None` if the profile fetch failed and the
    /// session was logged out.
    ///
    /// # Errors
    ///
    /// Propagates exchange and storage failures; the session stays
    /// unauthenticated in that case.
    pub async fn handle_callback(&self, code: &str) -> Result<Option<UserProfile>, AuthError> {
        if code.trim().is_empty() {
            return Err(AuthError::CallbackFailed(
                "missing authorization code".into(),
            ));
        }

        let grant = self.backend.exchange_code(code).await.inspect_err(|error| {
            tracing::error!(%error, "auth callback failed");
        })?;

        let now = self.session.now();
        let expires_at = grant
            .expires_in
            .checked_mul(1000)
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::Backend(format!("token lifetime out of range: {}s", grant.expires_in))
            })?;

        self.session
            .store()
            .save(&grant.access_token, expires_at.timestamp_millis())?;
        self.session.set_credential(grant.access_token, expires_at);
        tracing::info!(expires_at = %expires_at, "login completed");

        self.fetch_current_user().await
    }

    /// Load the profile for the current credential.
    ///
    /// Any failure is fatal to the session and runs [`Self::logout`];
    /// `Ok(None)` reports that outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the logout that follows a failed fetch fails.
    pub async fn fetch_current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        match self.backend.current_user().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "current user loaded");
                self.session.set_user(user.clone());
                Ok(Some(user))
            }
            Err(error) => {
                tracing::error!(%error, "failed to fetch current user; logging out");
                self.logout().await?;
                Ok(None)
            }
        }
    }

    /// Fetch the logout URL, clear the credential, then navigate to the URL.
    ///
    /// Nothing is cleared until the URL has arrived; an unreachable backend
    /// leaves the stored credential in place.
    ///
    /// # Errors
    ///
    /// Returns the URL fetch, storage or navigation error.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let url = self.backend.logout_url().await?;
        self.session.reset_session()?;
        tracing::info!("credential cleared; redirecting to identity provider for logout");
        self.session.navigator().assign(&url)
    }

    /// Rehydrate the session from the credential store. Run once at startup.
    ///
    /// Absent credential: stays unauthenticated. Expired credential: cleared,
    /// stays unauthenticated. Valid credential: state is populated, then the
    /// profile is fetched.
    ///
    /// # Errors
    ///
    /// Returns storage errors from clearing an expired credential, and
    /// errors from [`Self::fetch_current_user`].
    pub async fn initialize(&self) -> Result<Option<UserProfile>, AuthError> {
        let Some(record) = self.session.store().load() else {
            tracing::debug!("no stored credential");
            return Ok(None);
        };

        let now = self.session.now();
        let expires_at = match record.expires_at() {
            Some(expires_at) if !record.is_expired_at(now) => expires_at,
            _ => {
                tracing::info!("stored credential expired; clearing");
                self.session.store().clear()?;
                return Ok(None);
            }
        };

        self.session.set_credential(record.access_token, expires_at);
        self.fetch_current_user().await
    }
}
