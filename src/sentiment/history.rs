//! Display-only record of the most recent completed analyses.

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use super::api::{AnalysisResult, SentimentLabel};

/// Maximum number of retained entries; inserting beyond this evicts the oldest.
pub const HISTORY_CAPACITY: usize = 5;

/// Preview length in code points before the ellipsis marker is appended.
const PREVIEW_CHARS: usize = 50;
const PREVIEW_ELLIPSIS: &str = "...";

/// Summary of one past successful analysis. Never mutated after insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// Unique, monotonically increasing per session.
    pub id: u64,
    /// First 50 code points of the submitted text, `...`-terminated when cut.
    pub text_preview: String,
    pub label: SentimentLabel,
    pub confidence: f32,
    pub model: String,
    pub time_ms: u64,
    /// Completion wall-clock time, formatted for display.
    pub submitted_at: String,
}

/// Ordered newest-first, bounded to [`HISTORY_CAPACITY`] entries.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl History {
    /// Prepend an entry derived from a completed analysis, evicting the
    /// oldest entry when the cache is full. Infallible and synchronous.
    pub fn record(&mut self, text: &str, result: &AnalysisResult, completed_at: OffsetDateTime) {
        let entry = HistoryEntry {
            id: self.next_id,
            text_preview: text_preview(text),
            label: result.label,
            confidence: result.confidence,
            model: result.model.clone(),
            time_ms: result.time_ms,
            submitted_at: format_completed_at(completed_at),
        };
        self.next_id += 1;
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entries newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First 50 code points of `text`, with a 3-character marker appended when
/// the original was longer. Truncation is by code point, never mid-character.
pub fn text_preview(text: &str) -> String {
    let mut chars = text.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}{PREVIEW_ELLIPSIS}")
    } else {
        preview
    }
}

fn format_completed_at(at: OffsetDateTime) -> String {
    const TIME_FORMAT: &[FormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
    at.format(TIME_FORMAT).unwrap_or_default()
}
