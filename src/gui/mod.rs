pub mod chart;
pub mod profile_dialog;
pub mod reposition;
pub mod settings_dialog;

use crate::config::OverlayConfig;
use crate::key_monitor::{KeyActivity, KeyMonitor};
use crate::overlay::{render_overlay, OverlayFont, OverlayStyle, OverlayWindow};
use crate::speed::{SpeedEstimator, Ticker, TICK_INTERVAL};
use eframe::egui;
use profile_dialog::ProfileDialog;
use reposition::{RepositionFlow, RepositionResult};
use rust_i18n::t;
use settings_dialog::{SettingsAction, SettingsDialog};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub fn app_title() -> String {
    t!("app.title").to_string()
}

/// Label of the overlay toggle button for the current overlay state.
pub fn toggle_label(overlay_enabled: bool) -> String {
    if overlay_enabled {
        t!("overlay.disable").to_string()
    } else {
        t!("overlay.enable").to_string()
    }
}

pub struct MonitorApp {
    activity: Arc<KeyActivity>,
    monitor: Option<KeyMonitor>,
    estimator: SpeedEstimator,
    ticker: Ticker,
    config: OverlayConfig,
    overlay: OverlayWindow,
    overlay_dirty: bool,
    font: Option<OverlayFont>,
    current_wpm: u32,
    settings_dialog: SettingsDialog,
    profile_dialog: ProfileDialog,
    reposition: Option<RepositionFlow>,
}

impl MonitorApp {
    /// `monitor` is polled for listener failures; pass `None` when the
    /// activity is fed some other way.
    pub fn new(
        config: OverlayConfig,
        activity: Arc<KeyActivity>,
        monitor: Option<KeyMonitor>,
    ) -> Self {
        let font = OverlayFont::egui_default();
        if font.is_none() {
            tracing::warn!("no font available for the overlay text");
        }
        let window_start = activity.now();
        Self {
            estimator: SpeedEstimator::new(window_start),
            ticker: Ticker::new(TICK_INTERVAL, Instant::now()),
            overlay: OverlayWindow::new(config.enabled()),
            overlay_dirty: true,
            activity,
            monitor,
            config,
            font,
            current_wpm: 0,
            settings_dialog: SettingsDialog::default(),
            profile_dialog: ProfileDialog::default(),
            reposition: None,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn estimator(&self) -> &SpeedEstimator {
        &self.estimator
    }

    pub fn overlay(&self) -> &OverlayWindow {
        &self.overlay
    }

    pub fn current_wpm(&self) -> u32 {
        self.current_wpm
    }

    /// Run one estimator tick at `now` (on the [`KeyActivity`] clock).
    pub fn tick(&mut self, now: Duration) {
        let outcome = self.estimator.tick(&self.activity, now);
        self.current_wpm = outcome.wpm;
        self.overlay_dirty = true;
    }

    /// Flip the overlay on or off and return the new state.
    pub fn toggle_overlay(&mut self) -> bool {
        let enabled = !self.config.enabled();
        self.config.set_enabled(enabled);
        if enabled {
            self.overlay.open();
            self.overlay_dirty = true;
        } else {
            self.overlay.close();
        }
        tracing::info!(enabled, "overlay toggled");
        enabled
    }

    /// Store a new overlay position and move the live window there. Returns
    /// the previous position.
    pub fn commit_position(&mut self, position: (i32, i32)) -> (i32, i32) {
        let previous = self.config.set_position(position);
        self.overlay.move_to(position);
        previous
    }

    /// Recompose the overlay bitmap from the latest sample.
    pub fn refresh_overlay(&mut self, ctx: &egui::Context) {
        let samples = self.estimator.history().to_vec();
        let style = OverlayStyle::from(&self.config);
        let image = render_overlay(&samples, self.current_wpm, &style, self.font.as_ref());
        self.overlay.set_image(ctx, &image);
        self.overlay_dirty = false;
    }

    fn check_monitor(&self, ctx: &egui::Context) {
        if let Some(error) = self.monitor.as_ref().and_then(KeyMonitor::failure) {
            tracing::error!("keyboard monitoring stopped: {error}");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new(t!("main.wpm", wpm = self.current_wpm).to_string())
                        .size(24.0),
                );
                ui.add_space(10.0);
                let toggle = egui::Button::new(
                    egui::RichText::new(toggle_label(self.config.enabled())).size(14.0),
                );
                if ui.add(toggle).clicked() {
                    self.toggle_overlay();
                }
                if ui.button(t!("main.settings").to_string()).clicked() {
                    self.settings_dialog.open();
                }
                if ui.button(t!("main.profile").to_string()).clicked() {
                    self.profile_dialog.open(self.estimator.stats());
                }
            });
        });
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ticker.poll(Instant::now()) {
            self.tick(self.activity.now());
            self.check_monitor(ctx);
        }

        self.top_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            chart::show(ui, self.estimator.history(), self.config.chart_color());
        });

        match self.settings_dialog.ui(ctx, &mut self.config) {
            SettingsAction::None => {}
            SettingsAction::Changed => self.overlay_dirty = true,
            SettingsAction::StartReposition => {
                if self.reposition.is_none() {
                    self.reposition = Some(RepositionFlow::start(ctx, self.config.position()));
                }
            }
        }
        self.profile_dialog.ui(ctx);

        if self.overlay_dirty && (self.overlay.is_visible() || self.reposition.is_some()) {
            self.refresh_overlay(ctx);
        }

        if let Some(flow) = &mut self.reposition {
            match flow.ui(ctx, self.overlay.texture()) {
                RepositionResult::Pending => {}
                RepositionResult::Committed(position) => {
                    self.commit_position(position);
                    self.reposition = None;
                }
                RepositionResult::Cancelled => {
                    tracing::debug!("reposition cancelled");
                    self.reposition = None;
                }
            }
        }

        self.overlay
            .show(ctx, self.config.position(), &t!("overlay.title"));

        ctx.request_repaint_after(self.ticker.until_next(Instant::now()));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}
