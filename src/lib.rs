//! Library exports for reuse in integration tests and the binary.
/// Application directory helpers.
pub mod app_dirs;
/// Configuration loading.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent and bounded response helpers.
pub mod http_client;
/// Logging setup.
pub mod logging;
/// Sentiment domain: service contract, session lifecycle, history.
pub mod sentiment;
