//! Portal settings loaded from `config.toml`.
//!
//! Every field has a default, so an empty or missing file yields the stock
//! plant, category and inspection-method lists.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "IMQAP_CONFIG";

/// Config file used when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Settings for the portal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Where per-client sessions are persisted
    pub session_file: PathBuf,
    /// Plants offered on request and library forms, in report order
    pub plants: Vec<String>,
    /// Item categories, in report order
    pub categories: Vec<String>,
    /// Inspection methods offered on the library form
    pub inspection_methods: Vec<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            session_file: PathBuf::from("data/sessions.toml"),
            plants: to_strings(&["Plant 1", "Plant 2", "Plant 3", "SPD", "KMC", "Corporate"]),
            categories: to_strings(&[
                "Marketing",
                "Fabrication",
                "Packaging",
                "Hardware",
                "General Consumables",
                "Machinery",
                "Tools",
            ]),
            inspection_methods: to_strings(&["Visual", "Measurement", "Lab"]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PortalConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the file named by `IMQAP_CONFIG` (default `config.toml`), or the
/// defaults when that file does not exist.
pub fn load_default_config() -> Result<PortalConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        warn!("No config file at {path}, using built-in defaults");
        Ok(PortalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            session_file = "/tmp/imqap.toml"
            plants = ["Plant 1", "SPD"]
        "#;

        let config: PortalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session_file, PathBuf::from("/tmp/imqap.toml"));
        assert_eq!(config.plants, vec!["Plant 1", "SPD"]);
        // Unspecified lists keep their defaults
        assert_eq!(config.categories.len(), 7);
        assert_eq!(config.inspection_methods, vec!["Visual", "Measurement", "Lab"]);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.plants.len(), 6);
    }

    #[test]
    fn test_load_config_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "plants = [").unwrap();

        assert!(matches!(load_config(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(matches!(
            load_config("/definitely/not/here.toml"),
            Err(Error::Config { .. })
        ));
    }
}
