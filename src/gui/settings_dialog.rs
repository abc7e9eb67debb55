use crate::config::{OverlayConfig, FONT_SIZE_RANGE};
use eframe::egui;
use rust_i18n::t;

/// What the user asked for from the settings window this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// Appearance changed; the overlay bitmap should be recomposed.
    Changed,
    StartReposition,
}

/// Overlay appearance editor. Edits go straight into the live
/// [`OverlayConfig`] and are not saved.
#[derive(Default)]
pub struct SettingsDialog {
    pub open: bool,
}

impl SettingsDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, config: &mut OverlayConfig) -> SettingsAction {
        if !self.open {
            return SettingsAction::None;
        }
        let mut action = SettingsAction::None;
        let mut open = self.open;
        egui::Window::new(t!("settings.title").to_string())
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(t!("settings.font_size").to_string());
                let mut size = config.font_size();
                if ui
                    .add(egui::DragValue::new(&mut size).clamp_range(FONT_SIZE_RANGE))
                    .changed()
                {
                    config.set_font_size(size);
                    action = SettingsAction::Changed;
                }
                ui.separator();

                ui.label(t!("settings.text_color").to_string());
                let mut font_color = config.font_color();
                if ui.color_edit_button_srgba(&mut font_color).changed() {
                    config.set_font_color(font_color);
                    action = SettingsAction::Changed;
                }
                ui.separator();

                ui.label(t!("settings.chart_color").to_string());
                let mut chart_color = config.chart_color();
                if ui.color_edit_button_srgba(&mut chart_color).changed() {
                    config.set_chart_color(chart_color);
                    action = SettingsAction::Changed;
                }
                ui.separator();

                ui.label(t!("settings.position_heading").to_string());
                let (left, top) = config.position();
                ui.label(t!("settings.position", top = top, left = left).to_string());
                if ui.button(t!("settings.reposition").to_string()).clicked() {
                    action = SettingsAction::StartReposition;
                }
            });
        self.open = open;
        action
    }
}
