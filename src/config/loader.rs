//! Configuration file loading and parsing.

use crate::errors::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML file. Absent keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub recommendation_threshold: Option<f64>,

    #[serde(default)]
    pub half_life_days: Option<f64>,

    #[serde(default)]
    pub prune_threshold: Option<f64>,
}

/// Location of the user config file.
pub fn config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    config_dir.join("newsbrief").join("config.toml")
}

/// Load configuration from the user config file, if present.
pub fn load_from_file() -> Result<Option<ConfigFile>, Error> {
    load_from_path(&config_path())
}

/// Load configuration from a specific TOML file, if present.
pub fn load_from_path(path: &Path) -> Result<Option<ConfigFile>, Error> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_malformed_toml() {
        let content = r#"
This is not valid TOML
 [[unclosed bracket
 "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_file() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert!(config.database_path.is_none());
        assert!(config.recommendation_threshold.is_none());
        assert!(config.half_life_days.is_none());
        assert!(config.prune_threshold.is_none());
    }

    #[test]
    fn test_config_file_partial_toml() {
        let content = r#"
            database_path = "/test/brief.db"
            half_life_days = 10.5
        "#;

        let config: ConfigFile = toml::from_str(content).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/test/brief.db")));
        assert_eq!(config.half_life_days, Some(10.5));
        assert!(config.recommendation_threshold.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str("embedding_model = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = TempDir::new().unwrap();
        let result = load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_path_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "recommendation_threshold = \"high\"").unwrap();

        assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "recommendation_threshold = 6.0").unwrap();

        let config = load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.recommendation_threshold, Some(6.0));
    }
}
