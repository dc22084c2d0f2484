//! `/auth` endpoints over [`ApiClient`].

use reqwest::Method;
use sight_auth::{AuthError, IdentityBackend};
use sight_core::{RedirectUrl, TokenGrant, UserProfile};

use crate::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpIdentityBackend {
    client: ApiClient,
}

impl HttpIdentityBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl IdentityBackend for HttpIdentityBackend {
    async fn login_url(&self) -> Result<String, AuthError> {
        let body: RedirectUrl = self.client.get("/auth/login-url").await?;
        Ok(body.url)
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AuthError> {
        let path = format!("/auth/callback?code={}", urlencoding::encode(code));
        let grant = self
            .client
            .send::<(), TokenGrant>(Method::POST, &path, None)
            .await?;
        Ok(grant)
    }

    async fn logout_url(&self) -> Result<String, AuthError> {
        let body: RedirectUrl = self.client.get("/auth/logout-url").await?;
        Ok(body.url)
    }

    async fn current_user(&self) -> Result<UserProfile, AuthError> {
        Ok(self.client.get("/auth/me").await?)
    }
}
