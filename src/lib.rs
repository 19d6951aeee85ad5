//! newsbrief - Interest-ranked AI news briefs.
//!
//! Tracks per-tag user interest with half-life decay, ranks generated news
//! summaries against it, and shows how a story's narrative changes between
//! successive summaries with a word-level diff. Everything runs
//! synchronously on the caller's thread.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//! use newsbrief::{Brief, Config, Database, SystemClock};
//!
//! let config = Config::load().expect("Failed to load config");
//! let db = Database::open(&config.database_path).expect("Failed to open database");
//! let mut brief = Brief::open(
//!     Rc::new(db),
//!     Rc::new(SystemClock),
//!     config.decay().expect("Invalid decay config"),
//!     config.ranking(),
//! );
//!
//! // The user read a story tagged "Technology"
//! brief.interact(&["Technology".to_string()]);
//!
//! let latest = brief.latest();
//! for scored in brief.for_you(&latest) {
//!     println!("{:.2}: {}", scored.score, scored.item.title);
//! }
//! ```

pub mod brief;
pub mod clock;
pub mod config;
pub mod diff;
pub mod errors;
pub mod interest;
pub mod narrative;
pub mod ranking;
pub mod sources;
pub mod sqlite;
pub mod storage;
pub mod summary;

// Re-export public API
pub use brief::Brief;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use diff::{DiffSegment, SegmentKind, generate_diff};
pub use errors::Error;
pub use interest::{DecayedInterests, Direction, InterestStore, Outcome};
pub use ranking::{RankingConfig, Tagged};
pub use sqlite::Database;
pub use storage::{KeyValueStore, MemoryStorage};
pub use summary::{GeneratedSummary, Summary, SummaryHistory};
