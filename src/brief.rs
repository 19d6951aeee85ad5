//! Session facade wiring interests, history, and sources to one storage.

use std::rc::Rc;

use crate::clock::Clock;
use crate::interest::{DecayConfig, InterestStore};
use crate::narrative::{self, NarrativeEntry};
use crate::ranking::{self, FeedEntry, RankingConfig, ScoredItem};
use crate::sources::SourceList;
use crate::storage::KeyValueStore;
use crate::summary::{GeneratedSummary, Summary, SummaryHistory};

/// Everything a user session reads and mutates.
pub struct Brief {
    pub interests: InterestStore,
    pub history: SummaryHistory,
    pub sources: SourceList,
    clock: Rc<dyn Clock>,
    ranking: RankingConfig,
}

impl Brief {
    /// Load every store from `storage`.
    pub fn open(
        storage: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
        decay: DecayConfig,
        ranking: RankingConfig,
    ) -> Self {
        Self {
            interests: InterestStore::load(storage.clone(), clock.clone(), decay),
            history: SummaryHistory::load(storage.clone()),
            sources: SourceList::load(storage),
            clock,
            ranking,
        }
    }

    /// Record engagement with a summary's tags.
    pub fn interact(&mut self, tags: &[String]) -> usize {
        self.interests.handle_interaction(tags)
    }

    /// Wrap a generated summary and append it to the history.
    pub fn ingest(
        &mut self,
        generated: GeneratedSummary,
        topic_id: &str,
        source_count: usize,
    ) -> Summary {
        let summary = Summary::from_generated(generated, topic_id, source_count, self.clock.now());
        self.history.append(vec![summary.clone()]);
        summary
    }

    /// Newest summary of each topic; the item set both views rank.
    pub fn latest(&self) -> Vec<Summary> {
        self.history.latest_per_topic()
    }

    /// Recommended summaries among `items`, best first.
    ///
    /// Takes a fresh decayed snapshot on every call.
    pub fn for_you<'a>(&self, items: &'a [Summary]) -> Vec<ScoredItem<'a, Summary>> {
        ranking::recommend(items, &self.interests.decayed_interests(), &self.ranking)
    }

    /// Every summary in `items`, annotated with score and recommendation.
    pub fn feed<'a>(&self, items: &'a [Summary]) -> Vec<FeedEntry<'a, Summary>> {
        ranking::annotate_feed(items, &self.interests.decayed_interests(), &self.ranking)
    }

    /// Narrative timeline for one topic.
    pub fn compare(&self, topic_id: &str) -> Vec<NarrativeEntry<'_>> {
        narrative::compare_topic(topic_id, self.history.summaries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;
    use crate::summary::Sentiment;
    use chrono::{Duration, Utc};

    fn generated(text: &str, tags: &[&str]) -> GeneratedSummary {
        GeneratedSummary {
            title: "Title".to_string(),
            summary_text: text.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            key_points: vec![format!("Point: {text}")],
            sentiment: Sentiment::Neutral,
        }
    }

    fn open(storage: Rc<MemoryStorage>, clock: Rc<ManualClock>) -> Brief {
        Brief::open(
            storage,
            clock,
            DecayConfig::default(),
            RankingConfig::default(),
        )
    }

    #[test]
    fn test_interaction_drives_recommendations() {
        let clock = Rc::new(ManualClock::new(Utc::now()));
        let mut brief = open(Rc::new(MemoryStorage::new()), clock.clone());

        brief.ingest(generated("Chips shortage eases.", &["Tech"]), "chips", 3);
        clock.advance(Duration::minutes(5));
        brief.ingest(generated("Harvest record.", &["Agriculture"]), "harvest", 2);

        let latest = brief.latest();
        assert!(brief.for_you(&latest).is_empty());

        brief.interact(&["Tech".to_string()]);
        let recommended = brief.for_you(&latest);
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].item.topic_id, "chips");

        let feed = brief.feed(&latest);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].item.topic_id, "harvest");
        assert!(!feed[0].is_recommended);
        assert!(feed[1].is_recommended);
    }

    #[test]
    fn test_recommendation_fades_with_decay() {
        let clock = Rc::new(ManualClock::new(Utc::now()));
        let mut brief = open(Rc::new(MemoryStorage::new()), clock.clone());
        brief.ingest(generated("Chips.", &["Tech"]), "chips", 1);
        brief.interact(&["Tech".to_string()]);

        let latest = brief.latest();
        assert_eq!(brief.for_you(&latest).len(), 1);

        // 5 → 2.5 after one half-life, below the threshold of 4
        clock.advance(Duration::days(14));
        assert!(brief.for_you(&latest).is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        let storage = Rc::new(MemoryStorage::new());
        let clock = Rc::new(ManualClock::new(Utc::now()));
        {
            let mut brief = open(storage.clone(), clock.clone());
            brief.ingest(generated("v1", &["Tech"]), "topic", 1);
            clock.advance(Duration::hours(1));
            brief.ingest(generated("v2", &["Tech"]), "topic", 1);
            brief.interact(&["Tech".to_string()]);
            brief.sources.remove("1");
        }

        let brief = open(storage, clock);
        assert_eq!(brief.history.len(), 2);
        assert_eq!(brief.compare("topic").len(), 2);
        assert!(brief.interests.get("Tech").is_some());
        assert_eq!(brief.sources.sources().len(), 3);
    }
}
