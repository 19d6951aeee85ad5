//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::{Path, PathBuf};

use super::paths;

pub const DATABASE_PATH_VAR: &str = "NEWSBRIEF_DATABASE_PATH";
pub const RECOMMENDATION_THRESHOLD_VAR: &str = "NEWSBRIEF_RECOMMENDATION_THRESHOLD";
pub const HALF_LIFE_DAYS_VAR: &str = "NEWSBRIEF_HALF_LIFE_DAYS";
pub const PRUNE_THRESHOLD_VAR: &str = "NEWSBRIEF_PRUNE_THRESHOLD";

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde(Path::new(value.trim())))
}

/// Parse environment variable as a f64. Range checks happen in validation.
fn parse_env_float(name: &str, value: &str) -> Result<f64, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Apply a path-valued override if the variable is set.
pub fn apply_path_override(name: &str, target: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *target = parse_env_path(name, &val)?;
    }
    Ok(())
}

/// Apply a float-valued override if the variable is set.
pub fn apply_float_override(name: &str, target: &mut f64) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *target = parse_env_float(name, &val)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_path_empty() {
        let result = parse_env_path("TEST_VAR", "");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_env_path_whitespace() {
        let result = parse_env_path("TEST_VAR", "   ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_env_path_valid() {
        let result = parse_env_path("TEST_VAR", "/var/lib/brief.db");
        assert_eq!(result.unwrap(), PathBuf::from("/var/lib/brief.db"));
    }

    #[test]
    fn test_parse_env_float_invalid() {
        let result = parse_env_float("TEST_FLOAT", "invalid");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_env_float_valid() {
        let result = parse_env_float("TEST_FLOAT", " 4.5 ");
        assert_eq!(result.unwrap(), 4.5);
    }
}
