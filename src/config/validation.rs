//! Configuration validation logic.

use crate::errors::Error;

use super::Config;

/// Validates configuration values.
pub struct ConfigValidator<'a> {
    pub config: &'a Config,
}

impl ConfigValidator<'_> {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Recommendation threshold is finite and non-negative
    /// - Half-life is finite and positive
    /// - Prune threshold is finite and non-negative
    /// - Database path is not empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        check_non_negative(
            "recommendation threshold",
            self.config.recommendation_threshold,
        )?;
        // Half-life and prune rules are owned by the decay model
        self.config.decay()?;
        self.validate_database_path()?;

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if self.config.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn check_non_negative(label: &str, value: f64) -> Result<(), Error> {
    if !value.is_finite() {
        return Err(Error::Config(format!(
            "Invalid {label}: NaN and infinity are not allowed"
        )));
    }
    if value < 0.0 {
        return Err(Error::Config(format!(
            "Invalid {label}: {value} (must be >= 0)"
        )));
    }
    Ok(())
}
