//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/advisor/advisor.toml`
//! 3. Local config: `<dir>/.advisor.toml` (usually the working directory)
//! 4. Environment variables: `ADVISOR_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_DELIMITER;

/// Default course file, resolved relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "courses.csv";

/// Course lookup behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LookupConfig {
    /// Upper-case user input before searching (course numbers are stored upper-case)
    pub uppercase: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { uppercase: true }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_path: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub lookup: RawLookupConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLookupConfig {
    pub uppercase: Option<bool>,
}

/// Unified configuration for advisor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Course file loaded when no path is given
    pub catalog_path: PathBuf,
    /// Field delimiter of the course file
    pub delimiter: char,
    /// Lookup settings
    pub lookup: LookupConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            delimiter: DEFAULT_DELIMITER,
            lookup: LookupConfig::default(),
        }
    }
}

/// Get the XDG config directory for advisor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "advisor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("advisor.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".advisor.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand shell variables and tilde in a path string.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the catalog path.
    fn expand_paths(&mut self) {
        let expanded = expand_path(self.catalog_path.to_string_lossy().as_ref());
        self.catalog_path = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_path: overlay
                .catalog_path
                .clone()
                .unwrap_or_else(|| self.catalog_path.clone()),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            lookup: LookupConfig {
                uppercase: overlay.lookup.uppercase.unwrap_or(self.lookup.uppercase),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.advisor.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/advisor/advisor.toml`
    /// 3. Local config: `<local_dir>/.advisor.toml`
    /// 4. Environment variables: `ADVISOR_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ADVISOR_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ADVISOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_path") {
            settings.catalog_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = parse_delimiter(&val)?;
        }
        if let Ok(val) = config.get_bool("lookup.uppercase") {
            settings.lookup.uppercase = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# advisor configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/advisor/advisor.toml
#   Local:  ./.advisor.toml
#   Env:    ADVISOR_* environment variables (e.g. ADVISOR_CATALOG_PATH,
#           ADVISOR_LOOKUP__UPPERCASE)

# Course file loaded when no --file is given
# catalog_path = "courses.csv"

# Field delimiter (single character)
# delimiter = ","

[lookup]
# Upper-case course numbers typed by the user before searching
# uppercase = true
"#
        .to_string()
    }
}

fn parse_delimiter(val: &str) -> Result<char, ApplicationError> {
    let mut chars = val.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {val:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_uses_comma_and_uppercase() {
        let settings = Settings::default();
        assert_eq!(settings.catalog_path, PathBuf::from("courses.csv"));
        assert_eq!(settings.delimiter, ',');
        assert!(settings.lookup.uppercase);
    }

    #[test]
    fn given_tilde_in_catalog_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            catalog_path: PathBuf::from("~/courses.csv"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.catalog_path.to_string_lossy();
        assert!(path.starts_with(&home), "should start with home: {}", path);
        assert!(!path.contains('~'));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            catalog_path: None,
            delimiter: Some(';'),
            lookup: RawLookupConfig {
                uppercase: Some(false),
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.catalog_path, PathBuf::from("courses.csv"));
        assert_eq!(result.delimiter, ';');
        assert!(!result.lookup.uppercase);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings::default();
        let toml = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&toml).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.catalog_path.is_none());
    }
}
