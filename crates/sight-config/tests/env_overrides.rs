use figment::Jail;
use pretty_assertions::assert_eq;
use sight_config::{SightConfig, StorageBackend};

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("SIGHT_API__BASE_URL", "https://api.example.org/v1");
        jail.set_env("SIGHT_API__TIMEOUT_SECS", "12");
        jail.set_env("SIGHT_SESSION__STORAGE", "memory");

        let config = SightConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://api.example.org/v1");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.session.storage, StorageBackend::Memory);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sight")?;
        jail.create_file(
            ".sight/config.toml",
            r#"
[session]
keyring_service = "from-toml"
"#,
        )?;
        jail.set_env("SIGHT_SESSION__KEYRING_SERVICE", "from-env");

        let config = SightConfig::load().expect("config loads");
        assert_eq!(config.session.keyring_service, "from-env");
        Ok(())
    });
}

#[test]
fn unknown_storage_backend_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SIGHT_SESSION__STORAGE", "cookie-jar");
        assert!(SightConfig::load().is_err());
        Ok(())
    });
}
