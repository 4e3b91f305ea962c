//! egui renderer for the analyzer UI.

pub mod style;

use std::time::Duration;

use eframe::egui::{self, Frame, Margin, ProgressBar, RichText, StrokeKind, Ui};

use crate::egui_app::controller::EguiController;
use crate::egui_app::view_model;
use crate::sentiment::api::SentimentModel;
use crate::sentiment::session::MAX_INPUT_CHARS;

/// Smallest usable window size.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::Vec2::new(720.0, 560.0);

const EXAMPLE_TEXTS: [&str; 3] = [
    "This movie was absolutely amazing! I loved every minute of it.",
    "Terrible experience. Would not recommend to anyone.",
    "It was okay, nothing special but not bad either.",
];

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading the persisted configuration.
    pub fn new() -> Result<Self, String> {
        let controller =
            EguiController::new().map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Sentiscope")
                            .color(palette.text_primary)
                            .strong(),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new("Sentiment analysis with RNN or LSTM models")
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::section_stroke(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }

    fn render_center(&mut self, ui: &mut Ui) {
        egui::ScrollArea::vertical()
            .id_salt("analyzer_scroll")
            .show(ui, |ui| {
                self.render_input_section(ui);
                ui.add_space(10.0);
                self.render_examples(ui);
                ui.add_space(10.0);
                self.render_model_picker(ui);
                ui.add_space(10.0);
                self.render_error(ui);
                self.render_actions(ui);
                self.render_result(ui);
                self.render_history(ui);
            });
    }

    fn render_input_section(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.label(RichText::new("Enter text to analyze").color(palette.text_primary));
        ui.add_space(4.0);
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.controller.ui.analyzer.input)
                .hint_text("Type or paste your text here...")
                .desired_width(f32::INFINITY)
                .desired_rows(6)
                .char_limit(MAX_INPUT_CHARS),
        );
        if self.controller.ui.analyzer.focus_input_requested && !response.has_focus() {
            response.request_focus();
            self.controller.ui.analyzer.focus_input_requested = false;
        }
        if response.changed() {
            self.controller.sync_input();
        }
        let count = self.controller.ui.analyzer.input.chars().count();
        ui.label(
            RichText::new(format!("{count}/{MAX_INPUT_CHARS} characters"))
                .color(palette.text_muted),
        );
    }

    fn render_examples(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.label(RichText::new("Quick examples").color(palette.text_primary));
        ui.add_space(4.0);
        let mut picked: Option<&str> = None;
        ui.horizontal_wrapped(|ui| {
            for (idx, example) in EXAMPLE_TEXTS.iter().enumerate() {
                let response = ui
                    .button(format!("Example {}", idx + 1))
                    .on_hover_text(*example);
                if response.clicked() {
                    picked = Some(example);
                }
            }
        });
        if let Some(text) = picked {
            self.controller.use_example(text);
        }
    }

    fn render_model_picker(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.label(RichText::new("Model").color(palette.text_primary));
        ui.add_space(4.0);
        let selected = self.controller.session().model();
        let mut picked: Option<SentimentModel> = None;
        ui.columns(2, |columns| {
            let models = [SentimentModel::Rnn, SentimentModel::Lstm];
            for (column, model) in columns.iter_mut().zip(models) {
                let text = format!("{} — {}", model.display_name(), model.description());
                if column.selectable_label(model == selected, text).clicked() {
                    picked = Some(model);
                }
            }
        });
        if let Some(model) = picked {
            self.controller.select_model(model);
        }
    }

    fn render_error(&mut self, ui: &mut Ui) {
        let Some(message) = self.controller.session().error_message() else {
            return;
        };
        let message = message.to_string();
        let palette = style::palette();
        Frame::new()
            .fill(palette.bg_tertiary)
            .stroke(egui::Stroke::new(1.0, palette.negative))
            .inner_margin(Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.colored_label(palette.negative, message);
            });
        ui.add_space(10.0);
    }

    fn render_actions(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let submitting = self.controller.session().is_submitting();
        let can_submit = !submitting && !self.controller.ui.analyzer.input.trim().is_empty();
        let mut submit_clicked = false;
        let mut clear_clicked = false;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_submit, egui::Button::new("Analyze sentiment"))
                .clicked()
            {
                submit_clicked = true;
            }
            if ui.button("Clear").clicked() {
                clear_clicked = true;
            }
            if submitting {
                ui.add_space(4.0);
                ui.add(egui::Spinner::new());
                ui.label(RichText::new("Analyzing…").color(palette.text_muted));
            }
        });
        if submit_clicked {
            self.controller.submit();
        }
        if clear_clicked {
            self.controller.clear();
        }
    }

    fn render_result(&mut self, ui: &mut Ui) {
        let Some(result) = self.controller.session().current_result() else {
            return;
        };
        let result = result.clone();
        let palette = style::palette();
        let label_color = style::label_color(result.label);
        ui.add_space(12.0);
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(style::section_stroke())
            .inner_margin(Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Analysis result")
                        .color(palette.text_primary)
                        .strong(),
                );
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(result.label.as_str()).color(label_color).heading());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!(
                                "{} · {}",
                                result.model,
                                view_model::latency_label(result.time_ms)
                            ))
                            .color(palette.text_muted),
                        );
                    });
                });
                ui.add_space(6.0);
                ui.add(
                    ProgressBar::new(result.confidence).fill(label_color).text(
                        RichText::new(view_model::confidence_percent(result.confidence))
                            .color(palette.text_primary),
                    ),
                );
            });
    }

    fn render_history(&mut self, ui: &mut Ui) {
        let rows = view_model::history_rows(self.controller.session().history());
        if rows.is_empty() {
            return;
        }
        let palette = style::palette();
        ui.add_space(12.0);
        ui.label(
            RichText::new("Recent analyses")
                .color(palette.text_primary)
                .strong(),
        );
        ui.add_space(4.0);
        for row in &rows {
            ui.push_id(row.id, |ui| {
                Frame::new()
                    .fill(palette.bg_secondary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 6))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&row.preview).color(palette.text_primary));
                                ui.label(
                                    RichText::new(&row.submitted_at)
                                        .color(palette.text_muted)
                                        .small(),
                                );
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(RichText::new(&row.latency).color(palette.text_muted));
                                    ui.separator();
                                    ui.label(RichText::new(&row.model).color(palette.text_muted));
                                    ui.separator();
                                    ui.label(
                                        RichText::new(format!(
                                            "{} {}",
                                            row.label.as_str(),
                                            row.confidence
                                        ))
                                        .color(style::label_color(row.label)),
                                    );
                                },
                            );
                        });
                    });
            });
            ui.add_space(4.0);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.render_center(ui));
        if self.controller.session().is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
