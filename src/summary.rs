//! Generated summaries and their append-only history.

use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Error;
use crate::ranking::Tagged;
use crate::storage::{self, KeyValueStore, SUMMARY_HISTORY_KEY};

/// Overall tone of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// One article inside a cluster handed to the summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub source: String,
    pub headline: String,
    pub content: String,
}

/// Articles about a single evolving story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCluster {
    pub id: String,
    pub topic: String,
    pub articles: Vec<NewsArticle>,
}

/// Payload returned by a summarization provider.
///
/// Providers name the text field `summaryText` or `summary`; when both are
/// present `summaryText` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGeneratedSummary")]
pub struct GeneratedSummary {
    pub title: String,
    pub summary_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub sentiment: Sentiment,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeneratedSummary {
    title: String,
    summary_text: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    key_points: Vec<String>,
    sentiment: Sentiment,
}

impl TryFrom<RawGeneratedSummary> for GeneratedSummary {
    type Error = String;

    fn try_from(raw: RawGeneratedSummary) -> Result<Self, Self::Error> {
        let summary_text = raw
            .summary_text
            .or(raw.summary)
            .ok_or_else(|| "missing field `summaryText`".to_string())?;
        Ok(Self {
            title: raw.title,
            summary_text,
            tags: raw.tags,
            key_points: raw.key_points,
            sentiment: raw.sentiment,
        })
    }
}

/// Contents of the first fenced `json` block in `body`, or the whole body.
fn extract_json(body: &str) -> &str {
    const OPEN: &str = "```json";
    if let Some(start) = body.find(OPEN) {
        let inner = &body[start + OPEN.len()..];
        if let Some(end) = inner.find("```") {
            return inner[..end].trim();
        }
    }
    body.trim()
}

impl GeneratedSummary {
    /// Parse and validate a provider response body.
    ///
    /// Model replies often wrap the payload in a fenced json block with prose
    /// around it; the block's contents are parsed when present.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for malformed JSON and `Error::InvalidInput` if
    /// the title or summary text is blank.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let generated: GeneratedSummary = serde_json::from_str(extract_json(body))?;
        if generated.title.trim().is_empty() {
            return Err(Error::InvalidInput("summary title is empty".to_string()));
        }
        if generated.summary_text.trim().is_empty() {
            return Err(Error::InvalidInput("summary text is empty".to_string()));
        }
        Ok(generated)
    }
}

/// A stored summary of one topic at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub topic_id: String,
    pub title: String,
    #[serde(alias = "summary")]
    pub summary_text: String,
    pub tags: Vec<String>,
    pub key_points: Vec<String>,
    pub sentiment: Sentiment,
    pub source_count: usize,
}

impl Summary {
    /// Wrap a provider result with identity and provenance.
    pub fn from_generated(
        generated: GeneratedSummary,
        topic_id: &str,
        source_count: usize,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("summary-{}-{}", topic_id, Uuid::new_v4()),
            generated_at,
            topic_id: topic_id.to_string(),
            title: generated.title,
            summary_text: generated.summary_text,
            tags: generated.tags,
            key_points: generated.key_points,
            sentiment: generated.sentiment,
            source_count,
        }
    }

    /// Wrap a provider result produced from `cluster`.
    pub fn from_cluster(
        generated: GeneratedSummary,
        cluster: &NewsCluster,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self::from_generated(generated, &cluster.id, cluster.articles.len(), generated_at)
    }
}

impl Tagged for Summary {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Append-only summary history, kept newest first.
pub struct SummaryHistory {
    summaries: Vec<Summary>,
    storage: Rc<dyn KeyValueStore>,
}

impl SummaryHistory {
    /// Load the stored history; empty when absent or malformed.
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let mut summaries: Vec<Summary> =
            storage::load_or_default(storage.as_ref(), SUMMARY_HISTORY_KEY, Vec::new);
        sort_newest_first(&mut summaries);
        tracing::debug!(count = summaries.len(), "loaded summary history");
        Self { summaries, storage }
    }

    /// Append summaries and persist the whole history.
    ///
    /// An empty batch (e.g. a failed generation) changes nothing.
    pub fn append(&mut self, summaries: Vec<Summary>) -> usize {
        if summaries.is_empty() {
            return 0;
        }
        let added = summaries.len();
        self.summaries.extend(summaries);
        sort_newest_first(&mut self.summaries);
        storage::save_logged(self.storage.as_ref(), SUMMARY_HISTORY_KEY, &self.summaries);
        added
    }

    /// Every summary, newest first.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    pub fn get(&self, id: &str) -> Option<&Summary> {
        self.summaries.iter().find(|s| s.id == id)
    }

    /// Summaries of one topic, oldest first.
    pub fn for_topic(&self, topic_id: &str) -> Vec<&Summary> {
        let mut matching: Vec<&Summary> = self
            .summaries
            .iter()
            .filter(|s| s.topic_id == topic_id)
            .collect();
        matching.sort_by_key(|s| s.generated_at);
        matching
    }

    /// The newest summary of each topic, newest first.
    pub fn latest_per_topic(&self) -> Vec<Summary> {
        let mut seen = HashSet::new();
        self.summaries
            .iter()
            .filter(|s| seen.insert(s.topic_id.as_str()))
            .cloned()
            .collect()
    }

    /// Distinct topic ids, most recently updated first.
    pub fn topic_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.summaries
            .iter()
            .map(|s| s.topic_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

fn sort_newest_first(summaries: &mut [Summary]) {
    summaries.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
}
