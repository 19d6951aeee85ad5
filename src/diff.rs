//! Word-level text diffing via longest common subsequence.
//!
//! Inputs are split into alternating runs of whitespace and non-whitespace,
//! so every character of both inputs survives in exactly one segment. The
//! LCS table is `(n + 1) × (m + 1)` over token counts: O(n·m) time and
//! memory with no length guard, which is fine for paragraph-sized text.

use serde::Serialize;

/// Kind of change a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

/// A run of text tagged with its change kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub value: String,
    pub kind: SegmentKind,
}

impl DiffSegment {
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: SegmentKind::Unchanged,
        }
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: SegmentKind::Added,
        }
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: SegmentKind::Removed,
        }
    }
}

/// Token counts per segment kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn of(segments: &[DiffSegment]) -> Self {
        segments.iter().fold(Self::default(), |mut stats, seg| {
            match seg.kind {
                SegmentKind::Unchanged => stats.unchanged += 1,
                SegmentKind::Added => stats.added += 1,
                SegmentKind::Removed => stats.removed += 1,
            }
            stats
        })
    }

    /// True if the diff contains any insertion or deletion.
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Split text into alternating whitespace / non-whitespace runs.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != is_space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Compute a word-level diff turning `before` into `after`.
///
/// When an insertion and a deletion contribute equally to the LCS, the
/// insertion is reported first (closer to the end of the backtrack), which
/// keeps the output deterministic. Adjacent segments of the same kind are
/// not merged; see [`coalesce`].
pub fn generate_diff(before: &str, after: &str) -> Vec<DiffSegment> {
    let old = tokenize(before);
    let new = tokenize(after);
    let n = old.len();
    let m = new.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if old[i - 1] == new[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut segments = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            segments.push(DiffSegment::unchanged(old[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            segments.push(DiffSegment::added(new[j - 1]));
            j -= 1;
        } else {
            segments.push(DiffSegment::removed(old[i - 1]));
            i -= 1;
        }
    }

    segments.reverse();
    segments
}

/// Rebuild the original text from a diff.
pub fn reconstruct_before(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Added)
        .map(|s| s.value.as_str())
        .collect()
}

/// Rebuild the revised text from a diff.
pub fn reconstruct_after(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Removed)
        .map(|s| s.value.as_str())
        .collect()
}

/// Merge adjacent segments of the same kind.
pub fn coalesce(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut merged: Vec<DiffSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match merged.last_mut() {
            Some(last) if last.kind == seg.kind => last.value.push_str(&seg.value),
            _ => merged.push(seg),
        }
    }
    merged
}
