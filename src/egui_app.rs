//! egui front end: controller, UI state and renderer.

/// Controller bridging the analyzer session to the renderer.
pub mod controller;
/// Shared state types consumed by the renderer.
pub mod state;
/// egui renderer and widgets.
pub mod ui;
/// Helpers converting domain data into display strings.
pub mod view_model;
