//! Integration tests for Settings loading from a local config file.
//!
//! These tests only write into temp directories. A global config on the
//! machine running them sits below the local layer and is overridden here.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use advisor::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config = r#"
catalog_path = "data/catalog.txt"
delimiter = ";"

[lookup]
uppercase = false
"#;
    fs::write(local_config_path(dir.path()), config).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.catalog_path, PathBuf::from("data/catalog.txt"));
    assert_eq!(settings.delimiter, ';');
    assert!(!settings.lookup.uppercase);
}

#[test]
fn given_local_config_with_tilde_when_load_then_path_expanded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "catalog_path = \"~/courses.csv\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert!(!settings.catalog_path.to_string_lossy().contains('~'));
    assert!(settings.catalog_path.ends_with("courses.csv"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "delimiter = [unclosed").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().starts_with("config error:"), "{err}");
}

#[test]
fn given_local_path_when_resolved_then_hidden_toml_in_dir() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        local_config_path(dir.path()),
        dir.path().join(".advisor.toml")
    );
}
