//! Interest store combining in-memory records with injected persistence.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::clock::Clock;
use crate::storage::{self, INTERESTS_KEY, KeyValueStore};

use super::{
    DecayConfig, DecayedInterests, Direction, Interest, MANUAL_ADJUSTMENT, Outcome, RECENCY_BOOST,
};

/// Owns every interest record for the session.
///
/// The in-memory map is authoritative. Each mutation writes the full map to
/// storage; write failures are logged and otherwise ignored.
pub struct InterestStore {
    interests: BTreeMap<String, Interest>,
    storage: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    decay: DecayConfig,
}

impl InterestStore {
    /// Load stored interests, starting empty if none are stored or the
    /// stored document is malformed.
    pub fn load(storage: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>, decay: DecayConfig) -> Self {
        let loaded: BTreeMap<String, Interest> =
            storage::load_or_default(storage.as_ref(), INTERESTS_KEY, BTreeMap::new);

        let interests = loaded
            .into_iter()
            .filter(|(tag, interest)| !tag.trim().is_empty() && interest.score.is_finite())
            .map(|(tag, mut interest)| {
                interest.score = interest.score.max(0.0);
                (tag, interest)
            })
            .collect::<BTreeMap<_, _>>();

        tracing::debug!(count = interests.len(), "loaded interests");

        Self {
            interests,
            storage,
            clock,
            decay,
        }
    }

    /// Write the current map to storage. Returns false if the write failed.
    pub fn save(&self) -> bool {
        storage::save_logged(self.storage.as_ref(), INTERESTS_KEY, &self.interests)
    }

    /// Boost a tag after the user engaged with content carrying it.
    ///
    /// The boost is added to the raw stored score; existing decay is not
    /// applied first. Blank tags are ignored.
    pub fn record_interaction(&mut self, tag: &str) -> Outcome {
        if tag.trim().is_empty() {
            return Outcome::Unchanged;
        }

        let now = self.clock.now();
        let score = self.interests.get(tag).map_or(0.0, |i| i.score) + RECENCY_BOOST;
        self.interests.insert(
            tag.to_string(),
            Interest {
                score,
                last_interaction: now,
            },
        );
        tracing::debug!(tag, score, "recorded interaction");

        self.save();
        Outcome::Applied
    }

    /// Record an interaction for every tag of one content item.
    ///
    /// Returns how many tags were applied.
    pub fn handle_interaction<S: AsRef<str>>(&mut self, tags: &[S]) -> usize {
        tags.iter()
            .filter(|tag| self.record_interaction(tag.as_ref()).is_applied())
            .count()
    }

    /// Nudge an existing tag's score up or down, flooring at zero.
    ///
    /// Unknown tags are left alone.
    pub fn adjust_interest(&mut self, tag: &str, direction: Direction) -> Outcome {
        let now = self.clock.now();
        let Some(interest) = self.interests.get_mut(tag) else {
            return Outcome::Unchanged;
        };

        interest.score = (interest.score + direction.sign() * MANUAL_ADJUSTMENT).max(0.0);
        interest.last_interaction = now;
        tracing::debug!(tag, score = interest.score, "adjusted interest");

        self.save();
        Outcome::Applied
    }

    /// Delete a tag's record. Removing an unknown tag is a no-op.
    pub fn remove_interest(&mut self, tag: &str) -> Outcome {
        if self.interests.remove(tag).is_none() {
            return Outcome::Unchanged;
        }
        tracing::debug!(tag, "removed interest");

        self.save();
        Outcome::Applied
    }

    /// Decayed score for every tag above the prune threshold.
    ///
    /// Pruning only affects the returned snapshot; stored records stay.
    pub fn decayed_interests(&self) -> DecayedInterests {
        let now = self.clock.now();
        self.interests
            .iter()
            .filter_map(|(tag, interest)| {
                self.decay
                    .decayed_score(interest.score, &interest.last_interaction, &now)
                    .map(|score| (tag.clone(), score))
            })
            .collect()
    }

    /// Raw stored record for a tag.
    pub fn get(&self, tag: &str) -> Option<&Interest> {
        self.interests.get(tag)
    }

    /// All raw stored records.
    pub fn raw_interests(&self) -> &BTreeMap<String, Interest> {
        &self.interests
    }

    pub fn len(&self) -> usize {
        self.interests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty()
    }
}
