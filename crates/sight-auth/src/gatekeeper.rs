use std::sync::Arc;

use reqwest::StatusCode;

use crate::session::SessionContext;

/// Watches inbound statuses for authorization rejection.
///
/// On a 401 the session is reset (credential store and in-memory state), and
/// unless the application is on the callback landing route the root route is
/// reloaded. The caller still receives the failing response as an error.
#[derive(Debug, Clone)]
pub struct ResponseGatekeeper {
    session: Arc<SessionContext>,
}

impl ResponseGatekeeper {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// Inspect a response status. Returns `true` if it was a rejection.
    pub fn inspect(&self, status: StatusCode) -> bool {
        if status != StatusCode::UNAUTHORIZED {
            return false;
        }

        tracing::warn!("backend rejected the credential; resetting session");
        if let Err(error) = self.session.reset_session() {
            tracing::error!(%error, "failed to clear stored credential after rejection");
        }

        let routes = self.session.routes();
        let navigator = self.session.navigator();
        if navigator.current_route() == routes.callback {
            tracing::debug!("rejection on callback route; skipping reload");
        } else {
            navigator.reload(&routes.root);
        }
        true
    }
}
