//! Integration tests for config file loading
//!
//! Covers explicit config files on disk (present, missing, malformed).

use dnr_common::config::ConfigLayers;
use dnr_common::Error;
use std::io::Write;

fn no_env() -> ConfigLayers {
    ConfigLayers::new(|_| None)
}

#[test]
fn test_explicit_config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "business_address = \"leads@example.com\"\nport = 8080"
    )
    .unwrap();

    let layers = no_env().with_file(file.path()).unwrap();

    assert_eq!(layers.file_path(), Some(file.path()));
    assert_eq!(
        layers.resolve(None, "DNR_BUSINESS_ADDRESS", "business_address").as_deref(),
        Some("leads@example.com")
    );
    assert_eq!(layers.resolve(None, "DNR_RELAY_PORT", "port").as_deref(), Some("8080"));
}

#[test]
fn test_missing_explicit_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let result = no_env().with_file(&missing);

    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_config_file_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is not toml").unwrap();

    let result = no_env().with_file(file.path());

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("Invalid TOML")),
        Err(other) => panic!("expected config error, got {:?}", other),
        Ok(_) => panic!("expected config error, got Ok"),
    }
}

#[test]
fn test_nested_tables_are_ignored() {
    let layers = no_env().with_toml_str("[relay]\nport = 1").unwrap();
    assert_eq!(layers.resolve(None, "DNR_RELAY_PORT", "relay"), None);
}
