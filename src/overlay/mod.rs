//! Floating WPM overlay: bitmap composition and the viewport that shows it.

pub mod render;
pub mod window;

pub use render::{render_overlay, sparkline_polygon, OverlayFont, OverlayStyle};
pub use window::OverlayWindow;
