//! Shared test utilities for config module tests.

use std::sync::Mutex;

/// Mutex to serialize environment variable tests and prevent race conditions.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Every environment variable newsbrief reads.
pub const ENV_VARS: &[&str] = &[
    "NEWSBRIEF_DATABASE_PATH",
    "NEWSBRIEF_RECOMMENDATION_THRESHOLD",
    "NEWSBRIEF_HALF_LIFE_DAYS",
    "NEWSBRIEF_PRUNE_THRESHOLD",
];

/// Clean up environment variables used by newsbrief config.
pub fn cleanup_env_vars(vars: &[&str]) {
    for var in vars {
        unsafe {
            std::env::remove_var(var);
        }
    }
}
