//! # sight-config
//!
//! Layered configuration loading for Sight using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIGHT_*` prefix, `__` as separator)
//! 2. Project-level `.sight/config.toml`
//! 3. User-level `~/.config/sight/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIGHT_API__BASE_URL` -> `api.base_url`,
//! `SIGHT_SESSION__STORAGE` -> `session.storage`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sight_config::SightConfig;
//!
//! let config = SightConfig::load_with_dotenv().expect("config");
//! println!("API root: {}", config.api.root());
//! ```

mod api;
mod error;
mod general;
mod session;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::{SessionConfig, StorageBackend};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SightConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SightConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".sight/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SIGHT_").split("__"))
    }

    /// Reject values the session layer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty"));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(invalid("api.base_url", "must be an http(s) URL"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than zero"));
        }
        if self.session.callback_timeout_secs == 0 {
            return Err(invalid(
                "session.callback_timeout_secs",
                "must be greater than zero",
            ));
        }
        for (field, route) in [
            ("session.root_route", &self.session.root_route),
            ("session.callback_route", &self.session.callback_route),
        ] {
            if !route.starts_with('/') {
                return Err(invalid(field, "must start with '/'"));
            }
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sight").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SightConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.storage, StorageBackend::File);
        assert_eq!(config.general.default_limit, 20);
    }

    #[rstest]
    #[case::empty_url(|c: &mut SightConfig| c.api.base_url = String::new(), "api.base_url")]
    #[case::not_http(|c: &mut SightConfig| c.api.base_url = "ftp://x".into(), "api.base_url")]
    #[case::zero_timeout(|c: &mut SightConfig| c.api.timeout_secs = 0, "api.timeout_secs")]
    #[case::zero_callback_timeout(
        |c: &mut SightConfig| c.session.callback_timeout_secs = 0,
        "session.callback_timeout_secs"
    )]
    #[case::relative_root(|c: &mut SightConfig| c.session.root_route = "home".into(), "session.root_route")]
    #[case::relative_callback(
        |c: &mut SightConfig| c.session.callback_route = "auth/callback".into(),
        "session.callback_route"
    )]
    fn validate_rejects(#[case] mutate: fn(&mut SightConfig), #[case] expected_field: &str) {
        let mut config = SightConfig::default();
        mutate(&mut config);
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidValue for {expected_field}, got {other:?}"),
        }
    }
}
