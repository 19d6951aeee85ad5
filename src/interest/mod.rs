//! Per-tag user interest tracking with exponential decay.
//!
//! Scores grow on interaction, move by a fixed step on manual adjustment,
//! and are read back through a half-life decay projection.

pub mod decay;
pub(crate) mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use decay::DecayConfig;
pub use store::InterestStore;

/// Score added on every interaction with a tag.
pub const RECENCY_BOOST: f64 = 5.0;
/// Score added or removed by one manual adjustment.
pub const MANUAL_ADJUSTMENT: f64 = 2.0;

/// Stored interest for a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    /// Raw, undecayed score. Never negative.
    pub score: f64,
    /// Time of the last interaction or adjustment, stored as epoch millis.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_interaction: DateTime<Utc>,
}

/// Snapshot of decayed scores by tag, pruned of negligible entries.
pub type DecayedInterests = BTreeMap<String, f64>;

/// Direction of a manual interest adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

/// Result of a store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// State changed and was persisted (or persisting was attempted).
    Applied,
    /// Nothing to do: unknown key or rejected input.
    Unchanged,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}
