//! Submission lifecycle for the analyzer view.
//!
//! The session is an owned state struct with pure transition functions: the
//! caller validates-and-starts with [`AnalyzerSession::begin_submit`], runs
//! the network call however it likes, and applies the terminal outcome with
//! [`AnalyzerSession::finish_submit`]. Nothing here touches a rendering
//! surface or a socket, so the whole machine is testable in isolation.

use time::OffsetDateTime;

use super::api::{AnalysisResult, PredictError, PredictOutcome, PredictRequest, SentimentModel};
use super::history::{History, HistoryEntry};

/// Shown when submit is triggered with nothing to analyze.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze";
/// Shown when the service cannot be reached or returns an unusable body.
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Failed to analyze sentiment. Make sure the backend is running.";
/// Shown when the service answers but declines the request.
pub const REJECTED_MESSAGE: &str = "The sentiment service rejected this request.";

/// Maximum accepted input length in code points; longer input is truncated
/// at the edit site.
pub const MAX_INPUT_CHARS: usize = 1000;

/// Identifies one accepted submission. Completions carry the ticket back so
/// stale results can be dropped if a newer submission has since started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    seq: u64,
}

/// What the caller must run after a submission is accepted.
#[derive(Clone, Debug)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub request: PredictRequest,
}

/// Session state for one analyzer view.
#[derive(Debug, Default)]
pub struct AnalyzerSession {
    input: String,
    model: SentimentModel,
    current: Option<AnalysisResult>,
    error: Option<String>,
    submitting: bool,
    seq: u64,
    submitted_text: String,
    history: History,
}

impl AnalyzerSession {
    pub fn new(model: SentimentModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input text, truncating to [`MAX_INPUT_CHARS`] code points.
    pub fn set_input(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if let Some((idx, _)) = text.char_indices().nth(MAX_INPUT_CHARS) {
            text.truncate(idx);
        }
        self.input = text;
    }

    pub fn model(&self) -> SentimentModel {
        self.model
    }

    pub fn set_model(&mut self, model: SentimentModel) {
        self.model = model;
    }

    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True strictly between an accepted submit and its resolution.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Completed analyses, newest first, at most five.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Validate the input and start a submission.
    ///
    /// Returns `None` without side effects beyond the inline validation
    /// message when the trimmed input is empty, and `None` when a submission
    /// is already in flight (the trigger is expected to be disabled then).
    /// Otherwise clears the error and current result, marks the session
    /// submitting, and returns the request to run.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.submitting {
            return None;
        }
        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return None;
        }
        self.error = None;
        self.current = None;
        self.submitting = true;
        self.seq += 1;
        self.submitted_text = self.input.clone();
        Some(PendingSubmission {
            ticket: SubmissionTicket { seq: self.seq },
            request: PredictRequest {
                text: self.input.clone(),
                model: self.model,
            },
        })
    }

    /// Apply the terminal outcome of a submission.
    ///
    /// A completion whose ticket no longer matches the latest submission is
    /// ignored entirely and `false` is returned. On success the result fills
    /// the current-result slot and a derived entry is appended to history;
    /// failures set the matching user-facing message and leave both the
    /// result slot and history untouched.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<PredictOutcome, PredictError>,
        completed_at: OffsetDateTime,
    ) -> bool {
        if ticket.seq != self.seq {
            return false;
        }
        self.submitting = false;
        match outcome {
            Ok(PredictOutcome::Success(result)) => {
                self.history
                    .record(&self.submitted_text, &result, completed_at);
                self.current = Some(result);
                self.error = None;
            }
            Ok(PredictOutcome::Rejected { .. }) => {
                self.error = Some(REJECTED_MESSAGE.to_string());
            }
            Err(_) => {
                self.error = Some(TRANSPORT_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Reset input, current result and error message. History and any
    /// in-flight submission are untouched; calling this twice is the same as
    /// calling it once.
    pub fn clear(&mut self) {
        self.input.clear();
        self.current = None;
        self.error = None;
    }
}
