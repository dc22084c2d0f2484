use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sight_auth::{RequestAuthorizer, ResponseGatekeeper, SessionContext};
use sight_config::ApiConfig;

use crate::error::ApiError;

/// HTTP client for the backend API root.
///
/// Every request passes through the [`RequestAuthorizer`] on the way out and
/// the [`ResponseGatekeeper`] on the way back.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: String,
    authorizer: RequestAuthorizer,
    gatekeeper: ResponseGatekeeper,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("build client: {e}")))?;

        Ok(Self {
            http,
            root: config.root().to_string(),
            authorizer: RequestAuthorizer::new(session.clone()),
            gatekeeper: ResponseGatekeeper::new(session),
        })
    }

    /// Absolute URL for a path (and optional query) under the API root.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the result does not parse.
    pub fn url(&self, path_and_query: &str) -> Result<Url, ApiError> {
        let joined = format!("{}{path_and_query}", self.root);
        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`]; also `ApiError::Decode` for an unexpected body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.http.get(self.url(path)?);
        decode(self.execute(builder).await?).await
    }

    /// Send a JSON body (or none) with `method` and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`]; also `ApiError::Decode` for an unexpected body.
    pub async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.http.request(method, self.url(path)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        decode(self.execute(builder).await?).await
    }

    /// `DELETE`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.http.delete(self.url(path)?);
        self.execute(builder).await.map(|_| ())
    }

    /// Authorize, send, and gate a request.
    ///
    /// # Errors
    ///
    /// - `ApiError::Unauthorized` on 401, after the session was reset
    /// - `ApiError::Status` on any other non-success status
    /// - `ApiError::Transport` if the request could not be completed
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("build request: {e}")))?;
        let request = self.authorizer.authorize(request);
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(%method, path, %error, "request failed");
                return Err(ApiError::Transport(error.to_string()));
            }
        };

        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "response received");
        if self.gatekeeper.inspect(status) {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
