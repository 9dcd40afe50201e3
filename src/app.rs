//! Voice-assistant chat widget — egui/eframe application.
//!
//! # Architecture
//!
//! [`VoiceWidgetApp`] owns the [`Sequencer`] (the conversation core) and a
//! [`ViewState`] (the retained render target the sequencer writes through the
//! `WidgetRenderer` seam). Each frame:
//!
//! 1. `sim.tick(now, &mut view)` fires any due phase timers and reveal steps.
//! 2. The next repaint is scheduled for the sequencer's next deadline (or at
//!    ~30 fps while the waveform animates).
//! 3. The widget is drawn purely from `view`: header with status dot and
//!    label, scrollable chat bubbles, waveform bars, and the mic button.
//!
//! # Widget states
//!
//! | Phase | Visual |
//! |-------|--------|
//! | `Idle` | "Ready" — dim dot, flat bars, mic button enabled |
//! | `Listening` | Red dot, input-style bar animation, button reads "Stop" |
//! | `Processing` | Flat bars, "Processing..." label, button disabled |
//! | `Speaking` | Green dot, output-style bars, reply typing into its bubble |

use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::AppConfig;
use crate::render::{ViewState, WaveformStyle};
use crate::sim::{Phase, Sequencer, Speaker};

/// Number of bars in the waveform row.
const WAVEFORM_BARS: usize = 24;

// ---------------------------------------------------------------------------
// VoiceWidgetApp
// ---------------------------------------------------------------------------

/// eframe application — the voice-assistant chat widget.
pub struct VoiceWidgetApp {
    /// The conversation simulator.
    sim: Sequencer,
    /// Retained view state the sequencer renders into.
    view: ViewState,
    /// Application configuration (read-only after startup).
    config: AppConfig,
}

impl VoiceWidgetApp {
    /// Build the app from loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        let sim = Sequencer::new(config.script(), config.timing.to_timing());
        Self {
            sim,
            view: ViewState::new(),
            config,
        }
    }

    // ── Repaint scheduling ───────────────────────────────────────────────

    /// Ask egui to wake us up when the sequencer next has work, or at
    /// ~30 fps while the waveform animates. egui keeps the earliest request.
    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if let Some(deadline) = self.sim.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        if self.view.waveform_active() {
            ctx.request_repaint_after(Duration::from_millis(33));
        }
    }

    // ── Draw helpers ─────────────────────────────────────────────────────

    /// Accent colour for the current container mode.
    fn state_color(&self) -> egui::Color32 {
        match self.view.mode() {
            Phase::Idle => egui::Color32::from_rgb(100, 100, 100),
            Phase::Listening => egui::Color32::from_rgb(255, 68, 68),
            Phase::Processing => egui::Color32::from_rgb(68, 136, 255),
            Phase::Speaking => egui::Color32::from_rgb(80, 200, 120),
        }
    }

    /// Header row: status dot, assistant title, right-aligned status label.
    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            let dot_color = if self.view.indicator() {
                self.state_color()
            } else {
                egui::Color32::from_rgb(70, 70, 70)
            };
            ui.painter().circle_filled(rect.center(), 4.0, dot_color);

            ui.label(
                egui::RichText::new(&self.config.ui.title)
                    .color(egui::Color32::from_rgb(220, 220, 220))
                    .size(14.0)
                    .strong(),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.view.status())
                        .color(self.state_color())
                        .size(12.0),
                );
            });
        });
        ui.add_space(2.0);
    }

    /// Scrollable chat area with left/right aligned bubbles.
    fn draw_chat(&mut self, ui: &mut egui::Ui) {
        let scroll_requested = self.view.take_scroll_request();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(4.0);
                let max_width = ui.available_width() * 0.8;

                for msg in self.view.messages() {
                    let (layout, fill) = match msg.speaker {
                        Speaker::User => (
                            egui::Layout::right_to_left(egui::Align::TOP),
                            egui::Color32::from_rgb(40, 70, 120),
                        ),
                        Speaker::Assistant => (
                            egui::Layout::left_to_right(egui::Align::TOP),
                            egui::Color32::from_rgb(45, 45, 55),
                        ),
                    };

                    ui.with_layout(layout, |ui| {
                        egui::Frame::new()
                            .fill(fill)
                            .corner_radius(egui::CornerRadius::same(10))
                            .inner_margin(egui::Margin::symmetric(10, 6))
                            .show(ui, |ui| {
                                ui.set_max_width(max_width);
                                ui.label(
                                    egui::RichText::new(msg.text.as_str())
                                        .color(egui::Color32::from_rgb(230, 230, 230))
                                        .size(13.0),
                                );
                            });
                    });
                    ui.add_space(6.0);
                }

                if scroll_requested {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    }

    /// Animated amplitude bars.
    ///
    /// Per-bar period and phase offsets stand in for the original's
    /// randomised animation durations; the motion is time-driven and needs
    /// no per-frame state.
    fn draw_waveform(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 28.0),
            egui::Sense::hover(),
        );

        let color = if self.view.waveform_active() {
            match self.view.waveform_style() {
                WaveformStyle::Normal => egui::Color32::from_rgb(68, 136, 255),
                WaveformStyle::Speaking => egui::Color32::from_rgb(80, 200, 120),
            }
        } else {
            egui::Color32::from_rgb(55, 55, 60)
        };

        let t = ui.input(|i| i.time) as f32;
        let painter = ui.painter();
        let bar_width = rect.width() / WAVEFORM_BARS as f32;

        for i in 0..WAVEFORM_BARS {
            let amplitude = if self.view.waveform_active() {
                let speed = 5.0 + (i as f32 * 0.618).fract() * 4.0;
                let phase = i as f32 * 1.3;
                0.15 + 0.85 * (t * speed + phase).sin().abs()
            } else {
                0.1
            };

            let x = rect.left() + i as f32 * bar_width;
            let bar_height = (amplitude * rect.height()).max(2.0);

            painter.rect_filled(
                egui::Rect::from_center_size(
                    egui::pos2(x + bar_width / 2.0, rect.center().y),
                    egui::vec2((bar_width * 0.6).max(1.0), bar_height),
                ),
                1.0,
                color,
            );
        }
    }

    /// The mic button — the widget's single gesture.
    fn draw_mic_button(&mut self, ui: &mut egui::Ui, now: Instant) {
        let phase = self.sim.phase();
        let label = match phase {
            Phase::Idle => "Speak",
            Phase::Listening => "Stop",
            Phase::Processing | Phase::Speaking => "Wait",
        };

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(
                egui::RichText::new(label)
                    .color(egui::Color32::from_rgb(230, 230, 230))
                    .size(13.0),
            )
            .min_size(egui::vec2(90.0, 28.0))
            .corner_radius(egui::CornerRadius::same(14));

            if ui.add_enabled(!phase.is_busy(), button).clicked() {
                self.sim.activate(now, &mut self.view);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for VoiceWidgetApp {
    /// Called every frame by eframe. Advances the simulation clock, schedules
    /// the next repaint, then renders the widget from the view state.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.sim.tick(now, &mut self.view);
        self.schedule_repaint(ctx, now);

        let panel_frame = egui::Frame::new()
            .fill(egui::Color32::from_rgb(22, 22, 28))
            .inner_margin(egui::Margin::same(8));

        egui::TopBottomPanel::top("header")
            .frame(panel_frame)
            .show(ctx, |ui| {
                self.draw_header(ui);
            });

        egui::TopBottomPanel::bottom("controls")
            .frame(panel_frame)
            .show(ctx, |ui| {
                self.draw_waveform(ui);
                ui.add_space(6.0);
                self.draw_mic_button(ui, now);
                ui.add_space(4.0);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(28, 28, 34))
                    .inner_margin(egui::Margin::same(8)),
            )
            .show(ctx, |ui| {
                self.draw_chat(ui);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("voice widget closing");
    }
}
