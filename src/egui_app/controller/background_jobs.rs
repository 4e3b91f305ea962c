use time::OffsetDateTime;

use super::EguiController;
use super::jobs::{JobMessage, PredictFinished};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;
use crate::sentiment::api::PredictOutcome;

impl EguiController {
    /// Drain completed background work; called at the top of every frame.
    pub(in crate::egui_app) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(_) => break,
            };
            match message {
                JobMessage::PredictFinished(message) => {
                    self.jobs.clear_predict();
                    self.apply_predict_finished(message);
                }
            }
        }
    }

    fn apply_predict_finished(&mut self, message: PredictFinished) {
        match &message.result {
            Ok(PredictOutcome::Success(result)) => {
                tracing::info!(
                    label = result.label.as_str(),
                    confidence = result.confidence,
                    model = %result.model,
                    time_ms = result.time_ms,
                    "Prediction finished"
                );
            }
            Ok(PredictOutcome::Rejected { message }) => {
                tracing::warn!(reason = ?message, "Service rejected the prediction");
            }
            Err(err) => tracing::warn!("Prediction failed: {err}"),
        }

        let applied =
            self.session
                .finish_submit(message.ticket, message.result, now_local_or_utc());
        if !applied {
            tracing::debug!("Dropped completion for a superseded submission");
            return;
        }

        let status = if let Some(error) = self.session.error_message() {
            Some((error.to_string(), StatusTone::Error))
        } else {
            self.session.current_result().map(|result| {
                let text = format!(
                    "{} ({} confidence) in {}",
                    result.label.as_str(),
                    view_model::confidence_percent(result.confidence),
                    view_model::latency_label(result.time_ms),
                );
                (text, StatusTone::Info)
            })
        };
        if let Some((text, tone)) = status {
            self.set_status(text, tone);
        }
    }
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
