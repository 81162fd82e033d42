use std::{io::Write, time::Duration};

use podline_config::{
    ConfigLoadError, ConfigLoader, models::sources::EnvConfig,
};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn loads_toml_file_from_explicit_path() {
    let file = write_config(
        r#"
        dev_mode = true

        [server]
        host = "127.0.0.1"
        port = 4000

        [fetch]
        timeout = "2s"
        user_agent = "podline-test/1.0"
        max_page_bytes = 1024

        [gradient]
        skip_near_white = true

        [cors]
        allowed_origins = ["https://cards.example.com"]
        "#,
    );

    let load = ConfigLoader::new()
        .with_config_path(file.path())
        .load_from_env(EnvConfig::default())
        .unwrap();
    let config = load.config;

    assert_eq!(config.bind_address(), "127.0.0.1:4000");
    assert_eq!(config.fetch.timeout, Duration::from_secs(2));
    assert_eq!(config.fetch.user_agent, "podline-test/1.0");
    assert_eq!(config.fetch.max_page_bytes, 1024);
    assert_eq!(
        config.fetch.max_image_bytes,
        podline_core::infra::http::DEFAULT_MAX_IMAGE_BYTES
    );
    assert!(config.sampler_options().skip_near_white);
    assert!(config.dev_mode);
    assert_eq!(config.cors.allowed_origins, vec!["https://cards.example.com"]);
    assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
}

#[test]
fn env_path_is_used_when_no_explicit_path() {
    let file = write_config("[server]\nport = 5050\n");
    let env = EnvConfig {
        config_path: Some(file.path().to_path_buf()),
        ..EnvConfig::default()
    };

    let load = ConfigLoader::new().load_from_env(env).unwrap();
    assert_eq!(load.config.server.port, 5050);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = ConfigLoader::new()
        .with_config_path(&missing)
        .load_from_env(EnvConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { path } if path == missing));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_config("[server\nport = ");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load_from_env(EnvConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn unknown_sections_are_rejected() {
    let file = write_config("[database]\nurl = \"postgres://\"\n");

    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .load_from_env(EnvConfig::default())
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn wildcard_cors_outside_dev_mode_warns() {
    let file = write_config("[cors]\nallowed_origins = [\"*\"]\n");

    let load = ConfigLoader::new()
        .with_config_path(file.path())
        .load_from_env(EnvConfig::default())
        .unwrap();
    assert!(load.config.cors.is_wildcard_included());
    assert!(
        load.warnings
            .items
            .iter()
            .any(|warning| warning.message.contains("'*'"))
    );
}
