//! Composition root: builds the session, API client and controller from
//! configuration.

use std::sync::Arc;

use anyhow::Context;
use sight_api::{ApiClient, HttpIdentityBackend};
use sight_auth::{
    BrowserNavigator, CredentialStore, FileStorage, KeyValueStorage, KeyringStorage,
    MemoryStorage, Routes, SessionContext, SessionController, SystemClock,
};
use sight_config::{SessionConfig, SightConfig, StorageBackend};

pub struct AppContext {
    pub config: SightConfig,
    pub navigator: Arc<BrowserNavigator>,
    pub session: Arc<SessionContext>,
    pub controller: SessionController<HttpIdentityBackend>,
}

impl AppContext {
    pub fn init(config: SightConfig) -> anyhow::Result<Self> {
        let storage = build_storage(&config.session)?;
        let routes = Routes {
            root: config.session.root_route.clone(),
            callback: config.session.callback_route.clone(),
        };
        let navigator = Arc::new(BrowserNavigator::new(routes.root.clone()));
        let session = Arc::new(SessionContext::new(
            CredentialStore::new(storage),
            Arc::new(SystemClock),
            navigator.clone(),
            routes,
        ));
        let client = ApiClient::new(&config.api, session.clone())
            .context("failed to build API client")?;
        let controller = SessionController::new(HttpIdentityBackend::new(client), session.clone());

        Ok(Self {
            config,
            navigator,
            session,
            controller,
        })
    }

    pub fn api(&self) -> &ApiClient {
        self.controller.backend().client()
    }
}

/// Pick the key-value backend for the credential store.
pub fn build_storage(config: &SessionConfig) -> anyhow::Result<Arc<dyn KeyValueStorage>> {
    Ok(match config.storage {
        StorageBackend::File => {
            let path = config
                .credentials_file()
                .context("cannot determine home directory; set session.credentials_path")?;
            tracing::debug!(path = %path.display(), "using file credential storage");
            Arc::new(FileStorage::new(path))
        }
        StorageBackend::Keyring => {
            tracing::debug!(service = %config.keyring_service, "using keyring credential storage");
            Arc::new(KeyringStorage::new(config.keyring_service.clone()))
        }
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_storage_persists_across_contexts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SessionConfig {
            credentials_path: dir.path().join("credentials.json").display().to_string(),
            ..Default::default()
        };

        build_storage(&config)
            .expect("storage")
            .set("auth_token", "abc")
            .expect("set");

        let reopened = build_storage(&config).expect("storage");
        assert_eq!(reopened.get("auth_token").expect("get"), Some("abc".into()));
    }

    #[test]
    fn memory_storage_starts_empty() {
        let config = SessionConfig {
            storage: StorageBackend::Memory,
            ..Default::default()
        };
        let storage = build_storage(&config).expect("storage");
        assert_eq!(storage.get("auth_token").expect("get"), None);
    }

    #[test]
    fn context_uses_configured_routes() {
        let mut config = SightConfig::default();
        config.session.storage = StorageBackend::Memory;
        config.session.root_route = "/home".into();

        let ctx = AppContext::init(config).expect("context");
        assert_eq!(ctx.session.routes().root, "/home");
        assert_eq!(ctx.session.routes().callback, "/auth/callback");
        assert!(!ctx.session.is_authenticated());
    }
}
