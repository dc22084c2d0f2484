//! Loopback landing page for the identity provider's redirect.
//!
//! The identity provider sends the browser back to the application's
//! callback route with `?code=...`. On the desktop that route is served by a
//! short-lived `tiny_http` listener; the code it receives is handed to
//! [`crate::SessionController::handle_callback`].

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::error::AuthError;

/// What a single inbound request to the listener turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackRequest {
    /// Some other path (favicon, preflight); ignored.
    Unrelated,
    /// Landing route with an authorization code.
    Code(String),
    /// Landing route carrying the provider's `error` parameter.
    ProviderError(String),
    /// Landing route with neither; likely an intermediate redirect.
    Empty,
}

/// Classify a request target (`/path?query`) against the callback route.
///
/// # Errors
///
/// Returns `AuthError::CallbackFailed` if a parameter cannot be
/// percent-decoded.
pub fn classify(target: &str, callback_route: &str) -> Result<CallbackRequest, AuthError> {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path.trim_end_matches('/') != callback_route.trim_end_matches('/') {
        return Ok(CallbackRequest::Unrelated);
    }

    let mut code = None;
    let mut error = None;
    let mut description = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let decoded = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::CallbackFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" => code = Some(decoded),
            "error" => error = Some(decoded),
            "error_description" => description = Some(decoded),
            _ => {}
        }
    }

    Ok(match (code, error) {
        (_, Some(error)) => CallbackRequest::ProviderError(match description {
            Some(description) => format!("{error}: {description}"),
            None => error,
        }),
        (Some(code), None) if !code.is_empty() => CallbackRequest::Code(code),
        _ => CallbackRequest::Empty,
    })
}

/// Listener bound to the callback address.
///
/// Bind before starting the login navigation so the redirect cannot arrive
/// ahead of the listener.
pub struct CallbackListener {
    server: tiny_http::Server,
}

impl std::fmt::Debug for CallbackListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackListener")
            .field("addr", &self.local_addr())
            .finish()
    }
}

impl CallbackListener {
    /// # Errors
    ///
    /// Returns `AuthError::CallbackFailed` if the address cannot be bound.
    pub fn bind(addr: &str) -> Result<Self, AuthError> {
        let server = tiny_http::Server::http(addr)
            .map_err(|e| AuthError::CallbackFailed(format!("failed to bind {addr}: {e}")))?;
        Ok(Self { server })
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Wait for the provider to land on `callback_route` and return the code.
    ///
    /// `tiny_http::recv` blocks, so the loop runs in `spawn_blocking`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CallbackFailed` on timeout, on a provider error,
    /// or if the listener fails.
    pub async fn wait_for_code(
        self,
        callback_route: &str,
        timeout: Duration,
    ) -> Result<String, AuthError> {
        let route = callback_route.to_string();
        tokio::task::spawn_blocking(move || wait_for_callback(&self.server, &route, timeout))
            .await
            .map_err(|e| AuthError::CallbackFailed(format!("spawn_blocking join: {e}")))?
    }
}

fn wait_for_callback(
    server: &tiny_http::Server,
    callback_route: &str,
    timeout: Duration,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out(timeout));
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(request)) => request,
            Ok(None) => return Err(timed_out(timeout)),
            Err(e) => return Err(AuthError::CallbackFailed(format!("recv error: {e}"))),
        };

        let target = request.url().to_string();
        match classify(&target, callback_route) {
            Ok(CallbackRequest::Unrelated) => {
                let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            }
            Ok(CallbackRequest::Empty) => {
                respond_html(
                    request,
                    200,
                    "<h1>Waiting for sign-in</h1><p>Still redirecting, please wait.</p>",
                );
            }
            Ok(CallbackRequest::Code(code)) => {
                respond_html(
                    request,
                    200,
                    "<h1>Signed in</h1><p>You can close this tab and return to the terminal.</p>",
                );
                return Ok(code);
            }
            Ok(CallbackRequest::ProviderError(message)) => {
                respond_html(
                    request,
                    400,
                    "<h1>Sign-in failed</h1><p>Check the terminal for details.</p>",
                );
                return Err(AuthError::CallbackFailed(format!(
                    "identity provider returned an error: {message}"
                )));
            }
            Err(error) => {
                respond_html(
                    request,
                    400,
                    "<h1>Sign-in failed</h1><p>Malformed callback. Check the terminal.</p>",
                );
                return Err(error);
            }
        }
    }
}

fn timed_out(timeout: Duration) -> AuthError {
    AuthError::CallbackFailed(format!(
        "login callback timed out after {}s",
        timeout.as_secs()
    ))
}

fn respond_html(request: tiny_http::Request, status: u16, body: &str) {
    let mut response =
        tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"))
            .with_status_code(status);
    if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        response = response.with_header(header);
    }
    let _ = request.respond(response);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/favicon.ico", CallbackRequest::Unrelated)]
    #[case("/", CallbackRequest::Unrelated)]
    #[case("/auth/callback", CallbackRequest::Empty)]
    #[case("/auth/callback?state=abc", CallbackRequest::Empty)]
    #[case("/auth/callback?code=", CallbackRequest::Empty)]
    #[case(
        "/auth/callback?state=abc&session_state=s1&code=c0de%2B1",
        CallbackRequest::Code("c0de+1".into())
    )]
    #[case("/auth/callback/?code=abc", CallbackRequest::Code("abc".into()))]
    #[case(
        "/auth/callback?error=access_denied&error_description=User+cancelled",
        CallbackRequest::ProviderError("access_denied: User cancelled".into())
    )]
    #[case(
        "/auth/callback?error=login_required",
        CallbackRequest::ProviderError("login_required".into())
    )]
    fn classifies_request_targets(#[case] target: &str, #[case] expected: CallbackRequest) {
        assert_eq!(
            classify(target, "/auth/callback").expect("classify"),
            expected
        );
    }

    #[test]
    fn malformed_percent_encoding_is_an_error() {
        assert!(classify("/auth/callback?code=%FF%FE", "/auth/callback").is_err());
    }

    #[tokio::test]
    async fn listener_returns_code_and_skips_unrelated_requests() {
        let listener = CallbackListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let waiting = tokio::spawn(listener.wait_for_code("/auth/callback", Duration::from_secs(10)));

        let client = reqwest::Client::new();
        let favicon = client
            .get(format!("http://{addr}/favicon.ico"))
            .send()
            .await
            .expect("favicon request");
        assert_eq!(favicon.status().as_u16(), 204);

        let landing = client
            .get(format!("http://{addr}/auth/callback?state=s&code=code123"))
            .send()
            .await
            .expect("callback request");
        assert!(landing.status().is_success());

        let code = waiting.await.expect("join").expect("code");
        assert_eq!(code, "code123");
    }

    #[tokio::test]
    async fn listener_times_out() {
        let listener = CallbackListener::bind("127.0.0.1:0").expect("bind");
        let error = listener
            .wait_for_code("/auth/callback", Duration::from_millis(50))
            .await
            .expect_err("no request arrives");
        assert!(error.to_string().contains("timed out"));
    }
}
