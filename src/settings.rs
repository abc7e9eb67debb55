use crate::color::parse_color_or;
use crate::i18n::Language;
use anyhow::Context;
use eframe::egui::Color32;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const DEFAULT_FONT_COLOR: &str = "black";
pub const DEFAULT_GRAPH_COLOR: &str = "blue";
pub const DEFAULT_OVERLAY_POSITION: (i32, i32) = (10, 10);

/// Startup settings read from `settings.json`.
///
/// Every key is optional. Changes made in the UI are kept in memory only;
/// there is deliberately no `save`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_font_size")]
    pub overlay_font_size: u32,
    #[serde(default = "default_font_color")]
    pub overlay_font_color: String,
    #[serde(default = "default_graph_color")]
    pub graph_color: String,
    /// Top-left of the overlay window. Defaults to `(10, 10)`.
    #[serde(default = "default_overlay_position")]
    pub overlay_position: (i32, i32),
    /// Locale code of the UI, `"en"` or `"fr"`.
    #[serde(default = "default_language")]
    pub language: String,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_font_color() -> String {
    DEFAULT_FONT_COLOR.into()
}

fn default_graph_color() -> String {
    DEFAULT_GRAPH_COLOR.into()
}

fn default_overlay_position() -> (i32, i32) {
    DEFAULT_OVERLAY_POSITION
}

fn default_language() -> String {
    Language::default().code().into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay_font_size: default_font_size(),
            overlay_font_color: default_font_color(),
            graph_color: default_graph_color(),
            overlay_position: default_overlay_position(),
            language: default_language(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults; anything
    /// that is not a JSON object, including an empty file, is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read settings file {}", path.display()))
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("parse settings file {}", path.display()))
    }

    pub fn font_color(&self) -> Color32 {
        parse_color_or(&self.overlay_font_color, Color32::BLACK)
    }

    pub fn graph_color(&self) -> Color32 {
        parse_color_or(&self.graph_color, Color32::from_rgb(0, 0, 255))
    }

    pub fn language(&self) -> Language {
        match Language::from_code(&self.language) {
            Some(lang) => lang,
            None => {
                tracing::warn!(
                    "unsupported language '{}'; using {}",
                    self.language,
                    Language::default().code()
                );
                Language::default()
            }
        }
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(PathBuf::from)
    }
}
