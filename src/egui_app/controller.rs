//! Controller bridging the analyzer session to the egui renderer.

mod background_jobs;
pub(crate) mod jobs;

use url::Url;

use crate::config;
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::sentiment::api::SentimentModel;
use crate::sentiment::session::AnalyzerSession;

/// Owns the session state and the background job plumbing for the UI.
pub struct EguiController {
    pub ui: UiState,
    session: AnalyzerSession,
    jobs: jobs::ControllerJobs,
    base_url: Url,
}

impl EguiController {
    /// Build a controller from the persisted configuration.
    pub fn new() -> Result<Self, config::ConfigError> {
        let cfg = config::load_or_default()?;
        let base_url = cfg.base_url()?;
        tracing::info!("Using sentiment backend at {base_url}");
        Ok(Self {
            ui: UiState::default(),
            session: AnalyzerSession::new(cfg.defaults.model),
            jobs: jobs::ControllerJobs::new(),
            base_url,
        })
    }

    /// Read-only view of the session for rendering.
    pub fn session(&self) -> &AnalyzerSession {
        &self.session
    }

    /// Push the UI input buffer into the session; the session may truncate
    /// over-long input, in which case the buffer is synced back.
    pub(crate) fn sync_input(&mut self) {
        self.session.set_input(self.ui.analyzer.input.as_str());
        if self.session.input() != self.ui.analyzer.input {
            self.ui.analyzer.input = self.session.input().to_string();
        }
    }

    /// Replace the input buffer with a canned example text.
    pub(crate) fn use_example(&mut self, text: &str) {
        self.ui.analyzer.input = text.to_string();
        self.sync_input();
        self.ui.analyzer.focus_input_requested = true;
    }

    pub(crate) fn select_model(&mut self, model: SentimentModel) {
        self.session.set_model(model);
    }

    /// Validate the current input and, when accepted, run the prediction on
    /// a worker thread. At most one prediction is in flight at a time.
    pub(crate) fn submit(&mut self) {
        if self.jobs.predict_in_progress() {
            return;
        }
        self.sync_input();
        let Some(pending) = self.session.begin_submit() else {
            let message = self.session.error_message().map(String::from);
            if let Some(text) = message {
                self.set_status(text, StatusTone::Warning);
            }
            return;
        };
        let model = pending.request.model;
        tracing::info!(model = model.display_name(), "Submitting sentiment request");
        self.set_status(
            format!("Analyzing with {}…", model.display_name()),
            StatusTone::Busy,
        );
        self.jobs.begin_predict(jobs::PredictJob {
            url: self.base_url.clone(),
            ticket: pending.ticket,
            request: pending.request,
        });
    }

    /// Reset input, result and error. History and any in-flight request are
    /// untouched.
    pub(crate) fn clear(&mut self) {
        self.session.clear();
        self.ui.analyzer.input.clear();
        self.ui.analyzer.focus_input_requested = true;
        if !self.session.is_submitting() {
            self.ui.status = crate::egui_app::state::StatusBarState::idle();
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (badge_label, badge_color) = style::status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = badge_label;
        self.ui.status.badge_color = badge_color;
    }
}
