//! Shared state types for the egui UI.

use egui::Color32;

use crate::egui_app::ui::style::{self, StatusTone};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub analyzer: AnalyzerUiState,
    pub status: StatusBarState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerUiState::default(),
            status: StatusBarState::idle(),
        }
    }
}

/// Presentation-side state for the analyzer panel.
#[derive(Clone, Debug, Default)]
pub struct AnalyzerUiState {
    /// Text buffer bound to the input editor; the session mirrors it on
    /// every edit and owns the authoritative (length-capped) copy.
    pub input: String,
    /// Whether to focus the input editor on the next frame.
    pub focus_input_requested: bool,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Default status shown before the first submission.
    pub fn idle() -> Self {
        let (badge_label, badge_color) = style::status_badge(StatusTone::Idle);
        Self {
            text: "Enter some text and press Analyze".into(),
            badge_label,
            badge_color,
        }
    }
}
