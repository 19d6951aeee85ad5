//! Interest-weighted ranking of tagged content.
//!
//! Score = Σ decayed interest over an item's tags (missing tags count 0).
//! Every call recomputes from the snapshot it is given; nothing is cached.

use std::cmp::Ordering;

use serde::Serialize;

use crate::interest::DecayedInterests;

/// Items scoring strictly above this are recommended.
pub const DEFAULT_RECOMMENDATION_THRESHOLD: f64 = 4.0;

/// Anything carrying topic tags.
pub trait Tagged {
    fn tags(&self) -> &[String];
}

/// An item with its interest score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem<'a, T> {
    pub item: &'a T,
    pub score: f64,
}

/// A feed entry annotated with its score and recommendation flag.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry<'a, T> {
    pub item: &'a T,
    pub score: f64,
    pub is_recommended: bool,
}

/// Ranking parameters.
#[derive(Debug, Clone, Copy)]
pub struct RankingConfig {
    pub threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RECOMMENDATION_THRESHOLD,
        }
    }
}

/// Sum of decayed interest over the item's tags.
pub fn score_item<T: Tagged>(item: &T, interests: &DecayedInterests) -> f64 {
    item.tags()
        .iter()
        .map(|tag| interests.get(tag).copied().unwrap_or(0.0))
        .sum()
}

/// Score every item, preserving input order.
pub fn score_items<'a, T: Tagged>(
    items: &'a [T],
    interests: &DecayedInterests,
) -> Vec<ScoredItem<'a, T>> {
    items
        .iter()
        .map(|item| ScoredItem {
            item,
            score: score_item(item, interests),
        })
        .collect()
}

/// Items scoring above the threshold, highest score first.
///
/// The sort is stable: equal scores keep their input order.
pub fn recommend<'a, T: Tagged>(
    items: &'a [T],
    interests: &DecayedInterests,
    config: &RankingConfig,
) -> Vec<ScoredItem<'a, T>> {
    let mut recommended: Vec<ScoredItem<'a, T>> = score_items(items, interests)
        .into_iter()
        .filter(|scored| scored.score > config.threshold)
        .collect();

    recommended.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    recommended
}

/// Every item in input order with its score and recommendation flag.
pub fn annotate_feed<'a, T: Tagged>(
    items: &'a [T],
    interests: &DecayedInterests,
    config: &RankingConfig,
) -> Vec<FeedEntry<'a, T>> {
    score_items(items, interests)
        .into_iter()
        .map(|scored| FeedEntry {
            item: scored.item,
            score: scored.score,
            is_recommended: scored.score > config.threshold,
        })
        .collect()
}
