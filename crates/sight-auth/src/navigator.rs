//! Navigation seam: leaving the application for an external URL, reloading
//! an application route, and knowing which route is current.

use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

pub trait Navigator: Send + Sync {
    /// Full navigation to an external URL (identity provider login/logout).
    /// Control leaves the application once this succeeds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Navigation` if the navigation cannot be started.
    fn assign(&self, url: &str) -> Result<(), AuthError>;

    /// Force a fresh start of the application at `route`, discarding
    /// in-memory state.
    fn reload(&self, route: &str);

    /// Route the application is currently on.
    fn current_route(&self) -> String;
}

/// Desktop navigator: opens external URLs in the system browser and tracks
/// the application route the CLI is acting on.
#[derive(Debug)]
pub struct BrowserNavigator {
    current: Mutex<String>,
    reload_target: Mutex<Option<String>>,
}

impl BrowserNavigator {
    #[must_use]
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial_route.into()),
            reload_target: Mutex::new(None),
        }
    }

    /// Mark `route` as the current route (e.g. while the callback listener
    /// is waiting on the landing route).
    pub fn enter(&self, route: impl Into<String>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = route.into();
    }

    /// Route a reload was requested for, if any.
    #[must_use]
    pub fn pending_reload(&self) -> Option<String> {
        self.reload_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for BrowserNavigator {
    fn assign(&self, url: &str) -> Result<(), AuthError> {
        if url.trim().is_empty() {
            return Err(AuthError::Navigation("empty navigation target".into()));
        }
        eprintln!("Opening browser to: {url}");
        if let Err(error) = open::that(url) {
            eprintln!("Failed to open browser: {error}");
            eprintln!("Open the URL above manually.");
        }
        Ok(())
    }

    fn reload(&self, route: &str) {
        tracing::warn!(route, "session reset; application restart required");
        *self
            .reload_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(route.to_string());
        self.enter(route);
    }

    fn current_route(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_moves_to_route_and_is_remembered() {
        let navigator = BrowserNavigator::new("/auth/callback");
        assert_eq!(navigator.pending_reload(), None);

        navigator.reload("/");

        assert_eq!(navigator.current_route(), "/");
        assert_eq!(navigator.pending_reload().as_deref(), Some("/"));
    }

    #[test]
    fn assign_rejects_empty_url() {
        let navigator = BrowserNavigator::new("/");
        assert!(navigator.assign("  ").is_err());
    }
}
