//! Exponential half-life decay of interest scores.

use chrono::{DateTime, Utc};

/// Score halves after this many days without interaction.
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 14.0;
/// Decayed scores at or below this value are hidden from reads.
pub const DEFAULT_PRUNE_THRESHOLD: f64 = 0.1;

const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Configuration for interest decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayConfig {
    /// Half-life in days.
    pub half_life_days: f64,
    /// Read-time pruning threshold (inclusive).
    pub prune_threshold: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            half_life_days: DEFAULT_HALF_LIFE_DAYS,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }
}

impl DecayConfig {
    /// Build a validated configuration.
    pub fn new(half_life_days: f64, prune_threshold: f64) -> Result<Self, String> {
        let config = Self {
            half_life_days,
            prune_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if !self.half_life_days.is_finite() || self.half_life_days <= 0.0 {
            return Err(format!(
                "Invalid half-life: {} days (must be positive)",
                self.half_life_days
            ));
        }
        if !self.prune_threshold.is_finite() || self.prune_threshold < 0.0 {
            return Err(format!(
                "Invalid prune threshold: {} (must be >= 0)",
                self.prune_threshold
            ));
        }
        Ok(())
    }

    /// Decay rate λ per millisecond: ln(2) / half-life.
    pub fn lambda_per_ms(&self) -> f64 {
        std::f64::consts::LN_2 / (self.half_life_days * MS_PER_DAY)
    }

    /// Multiplier in (0, 1] for a record last touched at `last_interaction`.
    ///
    /// Timestamps in the future count as zero elapsed time, so decay never
    /// raises a score.
    pub fn decay_factor(&self, last_interaction: &DateTime<Utc>, now: &DateTime<Utc>) -> f64 {
        let elapsed_ms = now
            .signed_duration_since(*last_interaction)
            .num_milliseconds()
            .max(0) as f64;

        let exponent = -self.lambda_per_ms() * elapsed_ms;
        // exp() underflows to subnormals well before this
        if exponent < -700.0 {
            return 0.0;
        }
        exponent.exp()
    }

    /// Decayed score, or `None` if it falls at or below the prune threshold.
    pub fn decayed_score(
        &self,
        score: f64,
        last_interaction: &DateTime<Utc>,
        now: &DateTime<Utc>,
    ) -> Option<f64> {
        let decayed = score * self.decay_factor(last_interaction, now);
        (decayed > self.prune_threshold).then_some(decayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_decay_brand_new() {
        let config = DecayConfig::default();
        let now = Utc::now();
        let factor = config.decay_factor(&now, &now);
        assert!((factor - 1.0).abs() < 1e-12, "No elapsed time should not decay");
    }

    #[test]
    fn test_decay_one_half_life() {
        let config = DecayConfig::default();
        let now = Utc::now();
        let factor = config.decay_factor(&(now - Duration::days(14)), &now);
        assert!(
            (factor - 0.5).abs() < 1e-9,
            "14 days should halve the score, got {}",
            factor
        );
    }

    #[test]
    fn test_decay_two_half_lives() {
        let config = DecayConfig::default();
        let now = Utc::now();
        let factor = config.decay_factor(&(now - Duration::days(28)), &now);
        assert!((factor - 0.25).abs() < 1e-9, "got {}", factor);
    }

    #[test]
    fn test_decay_future_timestamp_clamped() {
        let config = DecayConfig::default();
        let now = Utc::now();
        let factor = config.decay_factor(&(now + Duration::days(3)), &now);
        assert!((factor - 1.0).abs() < 1e-12, "Future timestamps must not boost");
    }

    #[test]
    fn test_decay_very_old_is_zero() {
        let config = DecayConfig::default();
        let now = Utc::now();
        let factor = config.decay_factor(&(now - Duration::days(365 * 100)), &now);
        assert_eq!(factor, 0.0);
    }

    #[test]
    fn test_decayed_score_pruned_at_threshold() {
        let config = DecayConfig {
            half_life_days: 14.0,
            prune_threshold: 0.1,
        };
        let now = Utc::now();
        assert_eq!(config.decayed_score(0.1, &now, &now), None);
        assert_eq!(config.decayed_score(0.0, &now, &now), None);
        assert!(config.decayed_score(0.11, &now, &now).is_some());
    }

    #[test]
    fn test_decayed_score_pruned_after_long_inactivity() {
        let config = DecayConfig::default();
        let now = Utc::now();
        // 5 * 2^-6 ≈ 0.078
        let last = now - Duration::days(14 * 6);
        assert_eq!(config.decayed_score(5.0, &last, &now), None);
    }

    #[test]
    fn test_new_rejects_non_positive_half_life() {
        let result = DecayConfig::new(0.0, 0.1);
        assert!(result.unwrap_err().contains("must be positive"));
        assert!(DecayConfig::new(-3.0, 0.1).is_err());
        assert!(DecayConfig::new(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_new_rejects_negative_prune_threshold() {
        let result = DecayConfig::new(14.0, -0.5);
        assert!(result.unwrap_err().contains("must be >= 0"));
    }

    #[test]
    fn test_new_valid() {
        let config = DecayConfig::new(7.0, 0.0).unwrap();
        assert_eq!(config.half_life_days, 7.0);
    }
}
