//! Helpers to convert analyzer data into egui-facing display strings.

use crate::sentiment::api::SentimentLabel;
use crate::sentiment::history::HistoryEntry;

/// Display data for a single history row.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRowView {
    pub id: u64,
    pub preview: String,
    pub submitted_at: String,
    pub label: SentimentLabel,
    pub confidence: String,
    pub model: String,
    pub latency: String,
}

/// Confidence as a percentage with one decimal, e.g. `92.0%`.
pub fn confidence_percent(confidence: f32) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Server-reported latency, e.g. `15 ms`.
pub fn latency_label(time_ms: u64) -> String {
    format!("{time_ms} ms")
}

/// Build display rows for the history panel, newest first.
pub fn history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRowView> {
    entries
        .iter()
        .map(|entry| HistoryRowView {
            id: entry.id,
            preview: entry.text_preview.clone(),
            submitted_at: entry.submitted_at.clone(),
            label: entry.label,
            confidence: confidence_percent(entry.confidence),
            model: entry.model.clone(),
            latency: latency_label(entry.time_ms),
        })
        .collect()
}
