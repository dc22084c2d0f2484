//! In-memory session state and the shared context that owns it.
//!
//! A single [`SessionContext`] is built by the composition root and shared
//! (`Arc`) by the controller, the request authorizer and the response
//! gatekeeper. Nothing here is global.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sight_core::UserProfile;

use crate::clock::Clock;
use crate::credential_store::CredentialStore;
use crate::error::AuthError;
use crate::navigator::Navigator;

/// Current user, token and expiry. Derived from the credential store plus a
/// profile fetch; never persisted directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// True iff a token and expiry are present and `now < expires_at`.
    #[must_use]
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expires_at) {
            (Some(_), Some(expires_at)) => now < expires_at,
            _ => false,
        }
    }

    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        match (&self.token, self.expires_at) {
            (Some(_), Some(expires_at)) if now < expires_at => SessionStatus::Authenticated,
            (Some(_), Some(_)) => SessionStatus::Expired,
            _ => SessionStatus::Unauthenticated,
        }
    }
}

/// Locally observable session states.
///
/// The redirect to the identity provider (`Authenticating`) happens outside
/// this process and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
    /// Token present but past its expiry; cleared at next startup or rejection.
    Expired,
}

/// Application routes the session layer navigates between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    /// Reloaded after the backend rejects the credential.
    pub root: String,
    /// Where the identity provider lands the browser with `?code=`.
    pub callback: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            root: "/".to_string(),
            callback: "/auth/callback".to_string(),
        }
    }
}

/// Shared session context: credential store, in-memory state, clock,
/// navigator and routes.
pub struct SessionContext {
    store: CredentialStore,
    state: RwLock<SessionState>,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    routes: Routes,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Build an empty (unauthenticated) context. Call
    /// [`crate::SessionController::initialize`] to rehydrate from storage.
    pub fn new(
        store: CredentialStore,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
        routes: Routes,
    ) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
            clock,
            navigator,
            routes,
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Evaluated against the clock on every call.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let now = self.now();
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated_at(now)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let now = self.now();
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .status_at(now)
    }

    /// The token to present right now, or `None` if the session is not
    /// authenticated at this instant.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        let now = self.now();
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.is_authenticated_at(now) {
            state.token.clone()
        } else {
            None
        }
    }

    /// Clear the persisted credential and the in-memory state.
    ///
    /// In-flight and later requests observe the cleared credential as soon as
    /// this returns. The in-memory state is cleared even if storage fails.
    ///
    /// # Errors
    ///
    /// Returns the credential store error, if any.
    pub fn reset_session(&self) -> Result<(), AuthError> {
        let cleared = self.store.clear();
        self.clear_state();
        cleared
    }

    pub(crate) fn set_credential(&self, token: String, expires_at: DateTime<Utc>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.token = Some(token);
        state.expires_at = Some(expires_at);
    }

    pub(crate) fn set_user(&self, user: UserProfile) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.user = Some(user);
    }

    pub(crate) fn clear_state(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = SessionState::default();
    }
}
