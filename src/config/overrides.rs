//! Environment variable overrides for configuration.

use crate::errors::Error;

use super::Config;
use super::env_parser::{
    DATABASE_PATH_VAR, HALF_LIFE_DAYS_VAR, PRUNE_THRESHOLD_VAR, RECOMMENDATION_THRESHOLD_VAR,
    apply_float_override, apply_path_override,
};

/// Apply every `NEWSBRIEF_*` environment override to `config`.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Error> {
    apply_path_override(DATABASE_PATH_VAR, &mut config.database_path)?;
    apply_float_override(
        RECOMMENDATION_THRESHOLD_VAR,
        &mut config.recommendation_threshold,
    )?;
    apply_float_override(HALF_LIFE_DAYS_VAR, &mut config.half_life_days)?;
    apply_float_override(PRUNE_THRESHOLD_VAR, &mut config.prune_threshold)?;
    Ok(())
}
