use crate::settings::Settings;
use eframe::egui::Color32;
use std::ops::RangeInclusive;

pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 10..=72;

/// Live overlay configuration.
///
/// Seeded from [`Settings`] and changed through the setters, each of which
/// returns the value it replaced. Nothing here is written back to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    position: (i32, i32),
    font_size: u32,
    font_color: Color32,
    chart_color: Color32,
    enabled: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl OverlayConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            position: settings.overlay_position,
            font_size: clamp_font_size(settings.overlay_font_size),
            font_color: settings.font_color(),
            chart_color: settings.graph_color(),
            enabled: true,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn font_color(&self) -> Color32 {
        self.font_color
    }

    pub fn chart_color(&self) -> Color32 {
        self.chart_color
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_position(&mut self, position: (i32, i32)) -> (i32, i32) {
        tracing::debug!(?position, "overlay position changed");
        std::mem::replace(&mut self.position, position)
    }

    /// Font size is clamped to [`FONT_SIZE_RANGE`].
    pub fn set_font_size(&mut self, size: u32) -> u32 {
        std::mem::replace(&mut self.font_size, clamp_font_size(size))
    }

    pub fn set_font_color(&mut self, color: Color32) -> Color32 {
        std::mem::replace(&mut self.font_color, color)
    }

    pub fn set_chart_color(&mut self, color: Color32) -> Color32 {
        std::mem::replace(&mut self.chart_color, color)
    }

    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.enabled, enabled)
    }
}

fn clamp_font_size(size: u32) -> u32 {
    size.clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end())
}
