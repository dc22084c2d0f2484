//! Fakes shared by the unit tests in this crate.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Request, StatusCode, Url};
use sight_core::{TokenGrant, UserProfile};

use crate::authorizer::RequestAuthorizer;
use crate::backend::IdentityBackend;
use crate::clock::Clock;
use crate::credential_store::CredentialStore;
use crate::error::AuthError;
use crate::gatekeeper::ResponseGatekeeper;
use crate::navigator::Navigator;
use crate::session::{Routes, SessionContext};
use crate::storage::{KeyValueStorage, MemoryStorage};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Manually advanced clock.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }

    pub fn advance(&self, by: TimeDelta) {
        *lock(&self.now) += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Self::now(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Set(String, String),
    Remove(String),
}

/// Memory storage that logs every write.
#[derive(Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    ops: Mutex<Vec<StorageOp>>,
}

impl RecordingStorage {
    pub fn ops(&self) -> Vec<StorageOp> {
        lock(&self.ops).clone()
    }

    pub fn reset_log(&self) {
        lock(&self.ops).clear();
    }
}

impl KeyValueStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        lock(&self.ops).push(StorageOp::Set(key.into(), value.into()));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        lock(&self.ops).push(StorageOp::Remove(key.into()));
        self.inner.remove(key)
    }
}

/// Navigator that records instead of navigating.
pub struct RecordingNavigator {
    route: Mutex<String>,
    assigned: Mutex<Vec<String>>,
    reloads: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(route: &str) -> Self {
        Self {
            route: Mutex::new(route.to_string()),
            assigned: Mutex::new(Vec::new()),
            reloads: Mutex::new(Vec::new()),
        }
    }

    pub fn assigned(&self) -> Vec<String> {
        lock(&self.assigned).clone()
    }

    pub fn reloads(&self) -> Vec<String> {
        lock(&self.reloads).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn assign(&self, url: &str) -> Result<(), AuthError> {
        lock(&self.assigned).push(url.to_string());
        Ok(())
    }

    fn reload(&self, route: &str) {
        lock(&self.reloads).push(route.to_string());
        *lock(&self.route) = route.to_string();
    }

    fn current_route(&self) -> String {
        lock(&self.route).clone()
    }
}

/// Session context wired to recording fakes.
pub struct Harness {
    pub clock: Arc<FixedClock>,
    pub storage: Arc<RecordingStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: Arc<SessionContext>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_route("/")
    }

    pub fn with_route(route: &str) -> Self {
        let clock = Arc::new(FixedClock::new(
            DateTime::from_timestamp_millis(1_750_000_000_000).unwrap_or_default(),
        ));
        let storage = Arc::new(RecordingStorage::default());
        let navigator = Arc::new(RecordingNavigator::new(route));
        let session = Arc::new(SessionContext::new(
            CredentialStore::new(storage.clone()),
            clock.clone(),
            navigator.clone(),
            Routes::default(),
        ));
        Self {
            clock,
            storage,
            navigator,
            session,
        }
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: "4f0c8a52-0d7e-4a36-9a5e-6f8f2b1d9c11".into(),
        external_identity_id: "kc-sub-123".into(),
        email: "ada@example.org".into(),
        name: "ada".into(),
        created_at: "2025-03-01T10:00:00+00:00".into(),
        updated_at: "2025-03-01T10:00:00+00:00".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    LoginUrl,
    ExchangeCode(String),
    LogoutUrl,
    /// `Authorization` header the profile request went out with.
    CurrentUser { bearer: Option<String> },
}

pub enum ProfileBehavior {
    Ok,
    Fail(String),
    /// Backend answers 401; routed through the gatekeeper.
    Unauthorized,
}

/// Scripted identity backend. `current_user` runs a real request through the
/// authorizer (and the gatekeeper on 401) so header handling is observable.
pub struct FakeBackend {
    authorizer: RequestAuthorizer,
    gatekeeper: ResponseGatekeeper,
    login_url: Result<String, String>,
    grant: Result<TokenGrant, String>,
    logout_url: Result<String, String>,
    profile: ProfileBehavior,
    calls: Mutex<Vec<BackendCall>>,
}

impl FakeBackend {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self {
            authorizer: RequestAuthorizer::new(session.clone()),
            gatekeeper: ResponseGatekeeper::new(session),
            login_url: Ok("https://idp.example.org/auth?client_id=sight".into()),
            grant: Ok(TokenGrant {
                access_token: "token".into(),
                token_type: "bearer".into(),
                expires_in: 3600,
            }),
            logout_url: Ok("https://idp.example.org/logout".into()),
            profile: ProfileBehavior::Ok,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn grant(mut self, token: &str, expires_in: i64) -> Self {
        self.grant = Ok(TokenGrant {
            access_token: token.into(),
            token_type: "bearer".into(),
            expires_in,
        });
        self
    }

    pub fn login_url_fails(mut self, message: &str) -> Self {
        self.login_url = Err(message.into());
        self
    }

    pub fn exchange_fails(mut self, message: &str) -> Self {
        self.grant = Err(message.into());
        self
    }

    pub fn logout_url_fails(mut self, message: &str) -> Self {
        self.logout_url = Err(message.into());
        self
    }

    pub fn profile(mut self, behavior: ProfileBehavior) -> Self {
        self.profile = behavior;
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: BackendCall) {
        lock(&self.calls).push(call);
    }
}

impl IdentityBackend for FakeBackend {
    async fn login_url(&self) -> Result<String, AuthError> {
        self.record(BackendCall::LoginUrl);
        self.login_url.clone().map_err(AuthError::Backend)
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AuthError> {
        self.record(BackendCall::ExchangeCode(code.to_string()));
        self.grant.clone().map_err(AuthError::Backend)
    }

    async fn logout_url(&self) -> Result<String, AuthError> {
        self.record(BackendCall::LogoutUrl);
        self.logout_url.clone().map_err(AuthError::Backend)
    }

    async fn current_user(&self) -> Result<UserProfile, AuthError> {
        let url = Url::parse("http://localhost:8000/api/v1/auth/me")
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        let request = self.authorizer.authorize(Request::new(Method::GET, url));
        let bearer = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.record(BackendCall::CurrentUser { bearer });

        match &self.profile {
            ProfileBehavior::Ok => Ok(profile()),
            ProfileBehavior::Fail(message) => Err(AuthError::Backend(message.clone())),
            ProfileBehavior::Unauthorized => {
                self.gatekeeper.inspect(StatusCode::UNAUTHORIZED);
                Err(AuthError::Unauthorized)
            }
        }
    }
}
