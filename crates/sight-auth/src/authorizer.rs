use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::session::SessionContext;

/// Attaches the session's bearer token to outbound requests.
///
/// Validity is re-evaluated for every request; nothing is cached between
/// calls. An unauthenticated session leaves the request untouched and never
/// fails.
#[derive(Debug, Clone)]
pub struct RequestAuthorizer {
    session: Arc<SessionContext>,
}

impl RequestAuthorizer {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// Set `Authorization: Bearer <token>` when the session is authenticated
    /// at this instant.
    #[must_use]
    pub fn authorize(&self, mut request: reqwest::Request) -> reqwest::Request {
        let Some(token) = self.session.bearer_token() else {
            return request;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(error) => {
                tracing::warn!(%error, "access token is not a valid header value; sending request unauthenticated");
            }
        }
        request
    }
}
