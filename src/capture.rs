use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use screenshots::Screen;

/// Full-screen capture of the primary display.
pub struct ScreenCapture {
    pub image: RgbaImage,
    /// Physical pixels per logical point of the captured display.
    pub scale_factor: f32,
}

impl ScreenCapture {
    /// Logical size of the capture in points.
    pub fn logical_size(&self) -> (f32, f32) {
        let scale = if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        (
            self.image.width() as f32 / scale,
            self.image.height() as f32 / scale,
        )
    }
}

pub fn capture_primary_screen() -> Result<ScreenCapture> {
    let screen = Screen::from_point(0, 0).context("locate screen at origin")?;
    let image = screen.capture().context("capture screen")?;
    if image.width() == 0 || image.height() == 0 {
        return Err(anyhow!("screen capture bounds are empty"));
    }
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        scale = screen.display_info.scale_factor,
        "captured screen"
    );
    Ok(ScreenCapture {
        image,
        scale_factor: screen.display_info.scale_factor,
    })
}
