//! Sentiment analysis domain: service contract, submission lifecycle and
//! bounded history.

/// Wire types and the blocking call to the remote classification service.
pub mod api;
/// Bounded most-recent-first record of completed analyses.
pub mod history;
/// Submission lifecycle state machine.
pub mod session;
