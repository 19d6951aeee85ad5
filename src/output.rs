//! JSON response types and text rendering for CLI output.

use serde::Serialize;

use newsbrief::diff::{DiffSegment, DiffStats, SegmentKind, coalesce};
use newsbrief::narrative::NarrativeEntry;
use newsbrief::sources::Source;

/// Response for a single-key mutation.
#[derive(Serialize)]
pub struct OutcomeResponse {
    pub status: String,
    pub key: String,
}

/// One tag with its score.
#[derive(Serialize)]
pub struct InterestItem {
    pub tag: String,
    pub score: f64,
}

/// Response for listing interests.
#[derive(Serialize)]
pub struct InterestsResponse {
    pub interests: Vec<InterestItem>,
}

/// Response for an ingested summary.
#[derive(Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub id: String,
    pub topic_id: String,
}

/// A ranked summary as shown in feed and recommendation views.
#[derive(Serialize)]
pub struct RankedItem {
    pub id: String,
    pub topic_id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub score: f64,
    pub is_recommended: bool,
}

/// Response for feed and recommendation views.
#[derive(Serialize)]
pub struct RankedResponse {
    pub items: Vec<RankedItem>,
}

/// History list item.
#[derive(Serialize)]
pub struct HistoryItem {
    pub id: String,
    pub topic_id: String,
    pub title: String,
    pub generated_at: String,
}

/// Response for listing history.
#[derive(Serialize)]
pub struct HistoryResponse {
    pub summaries: Vec<HistoryItem>,
}

/// Response for narrative comparison.
#[derive(Serialize)]
pub struct NarrativeResponse<'a> {
    pub topic_id: String,
    pub entries: Vec<NarrativeEntry<'a>>,
}

/// Response for an ad-hoc diff.
#[derive(Serialize)]
pub struct DiffResponse {
    pub segments: Vec<DiffSegment>,
    pub stats: DiffStats,
}

/// Response for listing sources.
#[derive(Serialize)]
pub struct SourcesResponse<'a> {
    pub sources: &'a [Source],
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Render a diff inline, word-diff style: `[-removed-]{+added+}`.
pub fn render_diff(segments: &[DiffSegment]) -> String {
    coalesce(segments.to_vec())
        .iter()
        .map(|seg| match seg.kind {
            SegmentKind::Unchanged => seg.value.clone(),
            SegmentKind::Added => format!("{{+{}+}}", seg.value),
            SegmentKind::Removed => format!("[-{}-]", seg.value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsbrief::diff::generate_diff;

    #[test]
    fn test_render_diff_marks_changes() {
        let diff = generate_diff("rates rose today", "rates fell today");
        assert_eq!(render_diff(&diff), "rates [-rose-]{+fell+} today");
    }

    #[test]
    fn test_render_unchanged_plain() {
        let diff = generate_diff("same text", "same text");
        assert_eq!(render_diff(&diff), "same text");
    }

    #[test]
    fn test_serialize_ranked_response() {
        let response = RankedResponse {
            items: vec![RankedItem {
                id: "summary-1".to_string(),
                topic_id: "topic".to_string(),
                title: "Title".to_string(),
                tags: vec!["Tech".to_string()],
                score: 5.0,
                is_recommended: true,
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"is_recommended\":true"));
        assert!(json.contains("\"score\":5.0"));
    }

    #[test]
    fn test_serialize_diff_response() {
        let segments = generate_diff("", "new");
        let response = DiffResponse {
            stats: DiffStats::of(&segments),
            segments,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"kind\":\"added\""));
        assert!(json.contains("\"added\":1"));
    }
}
