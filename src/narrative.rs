//! Narrative comparison: how a topic's summaries change over time.
//!
//! Summaries of one topic are ordered by generation time and each one is
//! diffed against its predecessor. The earliest summary is the baseline and
//! is shown as-is.

use serde::Serialize;

use crate::diff::{DiffSegment, DiffStats, generate_diff};
use crate::summary::Summary;

/// One summary in a topic timeline together with its changes.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeEntry<'a> {
    pub summary: &'a Summary,
    /// Id of the summary this one was diffed against; `None` for the baseline.
    pub previous_id: Option<&'a str>,
    pub summary_diff: Vec<DiffSegment>,
    /// One diff per key point, matched to the previous summary by position.
    pub key_point_diffs: Vec<Vec<DiffSegment>>,
}

impl NarrativeEntry<'_> {
    pub fn is_baseline(&self) -> bool {
        self.previous_id.is_none()
    }

    /// Token-level change counts across the text and all key points.
    pub fn stats(&self) -> DiffStats {
        std::iter::once(&self.summary_diff)
            .chain(self.key_point_diffs.iter())
            .map(|segments| DiffStats::of(segments))
            .fold(DiffStats::default(), |acc, s| DiffStats {
                unchanged: acc.unchanged + s.unchanged,
                added: acc.added + s.added,
                removed: acc.removed + s.removed,
            })
    }
}

/// Build the comparison timeline for `topic_id`.
///
/// `history` may be in any order; ties on generation time keep their
/// relative order. Unknown topics yield an empty timeline.
pub fn compare_topic<'a>(topic_id: &str, history: &'a [Summary]) -> Vec<NarrativeEntry<'a>> {
    let mut timeline: Vec<&'a Summary> = history.iter().filter(|s| s.topic_id == topic_id).collect();
    timeline.sort_by_key(|s| s.generated_at);
    compare_timeline(&timeline)
}

/// Diff each summary of an already ordered timeline against its predecessor.
pub fn compare_timeline<'a>(timeline: &[&'a Summary]) -> Vec<NarrativeEntry<'a>> {
    let mut entries = Vec::with_capacity(timeline.len());

    for (index, &summary) in timeline.iter().enumerate() {
        let entry = match index.checked_sub(1).map(|prev| timeline[prev]) {
            None => baseline(summary),
            Some(previous) => NarrativeEntry {
                summary,
                previous_id: Some(previous.id.as_str()),
                summary_diff: generate_diff(&previous.summary_text, &summary.summary_text),
                key_point_diffs: summary
                    .key_points
                    .iter()
                    .enumerate()
                    .map(|(i, point)| match previous.key_points.get(i) {
                        Some(prev_point) => generate_diff(prev_point, point),
                        None => vec![DiffSegment::added(point.as_str())],
                    })
                    .collect(),
            },
        };
        entries.push(entry);
    }

    entries
}

fn baseline(summary: &Summary) -> NarrativeEntry<'_> {
    NarrativeEntry {
        summary,
        previous_id: None,
        summary_diff: vec![DiffSegment::unchanged(summary.summary_text.as_str())],
        key_point_diffs: summary
            .key_points
            .iter()
            .map(|point| vec![DiffSegment::unchanged(point.as_str())])
            .collect(),
    }
}
