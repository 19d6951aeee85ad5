//! Layered configuration: defaults < config file < environment.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;

use crate::errors::Error;
use crate::interest::DecayConfig;
use crate::interest::decay::{DEFAULT_HALF_LIFE_DAYS, DEFAULT_PRUNE_THRESHOLD};
use crate::ranking::{DEFAULT_RECOMMENDATION_THRESHOLD, RankingConfig};
use std::path::PathBuf;

pub use loader::ConfigFile;

/// Runtime configuration for newsbrief.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the SQLite database.
    pub database_path: PathBuf,

    /// Items scoring above this are recommended.
    pub recommendation_threshold: f64,

    /// Days after which an untouched interest score halves.
    pub half_life_days: f64,

    /// Decayed scores at or below this are hidden.
    pub prune_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });

        Self {
            database_path: home.join(".newsbrief").join("newsbrief.db"),
            recommendation_threshold: DEFAULT_RECOMMENDATION_THRESHOLD,
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration with defaults, file values, and environment overrides.
    pub fn load() -> Result<Self, Error> {
        let mut config = Config::default();

        if let Some(file) = loader::load_from_file()? {
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Merge values present in a config file.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if let Some(path) = file.database_path {
            self.database_path = paths::expand_tilde(&path);
        }
        if let Some(threshold) = file.recommendation_threshold {
            self.recommendation_threshold = threshold;
        }
        if let Some(days) = file.half_life_days {
            self.half_life_days = days;
        }
        if let Some(threshold) = file.prune_threshold {
            self.prune_threshold = threshold;
        }
    }

    fn validate(&self) -> Result<(), Error> {
        validation::ConfigValidator { config: self }.validate()
    }

    /// Decay parameters for the interest store.
    pub fn decay(&self) -> Result<DecayConfig, Error> {
        DecayConfig::new(self.half_life_days, self.prune_threshold).map_err(Error::Config)
    }

    /// Ranking parameters for recommendation and feed views.
    pub fn ranking(&self) -> RankingConfig {
        RankingConfig {
            threshold: self.recommendation_threshold,
        }
    }

    /// Ensure the database's parent directory exists.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        Ok(())
    }
}
