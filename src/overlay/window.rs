use crate::overlay::render::{OVERLAY_HEIGHT, OVERLAY_WIDTH};
use eframe::egui::{
    self, pos2, Color32, Rect, TextureHandle, TextureOptions, ViewportBuilder, ViewportCommand,
    ViewportId,
};
use image::RgbaImage;

/// Borderless, always-on-top, transparent viewport showing the overlay bitmap.
///
/// Each time the overlay is switched on it gets a fresh viewport identity, so
/// egui tears the old native window down and builds a new one.
#[derive(Default)]
pub struct OverlayWindow {
    generation: u64,
    visible: bool,
    texture: Option<TextureHandle>,
    pending_move: Option<(i32, i32)>,
}

impl OverlayWindow {
    pub fn new(visible: bool) -> Self {
        Self {
            generation: 0,
            visible,
            texture: None,
            pending_move: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Identity of the live viewport, `None` while the overlay is off.
    pub fn viewport_id(&self) -> Option<ViewportId> {
        self.visible
            .then(|| ViewportId::from_hash_of(("wpm-overlay", self.generation)))
    }

    /// Recreate the overlay window.
    pub fn open(&mut self) {
        self.generation += 1;
        self.visible = true;
        self.pending_move = None;
        tracing::debug!(generation = self.generation, "overlay opened");
    }

    /// Destroy the overlay window.
    pub fn close(&mut self) {
        self.visible = false;
        self.pending_move = None;
        tracing::debug!("overlay closed");
    }

    /// Move the live window on the next frame. Ignored while hidden; a fresh
    /// window is built at the configured position anyway.
    pub fn move_to(&mut self, position: (i32, i32)) {
        if self.visible {
            self.pending_move = Some(position);
        }
    }

    pub fn pending_move(&self) -> Option<(i32, i32)> {
        self.pending_move
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Upload a freshly composed bitmap.
    pub fn set_image(&mut self, ctx: &egui::Context, rgba: &RgbaImage) {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [rgba.width() as usize, rgba.height() as usize],
            rgba.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("wpm-overlay", image, TextureOptions::NEAREST))
            }
        }
    }

    /// Show the viewport for this frame. Must run every frame while visible.
    pub fn show(&mut self, ctx: &egui::Context, position: (i32, i32), title: &str) {
        let Some(id) = self.viewport_id() else {
            return;
        };
        if let Some((x, y)) = self.pending_move.take() {
            ctx.send_viewport_cmd_to(
                id,
                ViewportCommand::OuterPosition(pos2(x as f32, y as f32)),
            );
        }

        let builder = ViewportBuilder::default()
            .with_title(title)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false)
            .with_position(pos2(position.0 as f32, position.1 as f32))
            .with_inner_size([OVERLAY_WIDTH as f32, OVERLAY_HEIGHT as f32]);

        let texture = self.texture.as_ref();
        ctx.show_viewport_immediate(id, builder, |ctx, _class| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    if let Some(texture) = texture {
                        let rect = Rect::from_min_size(ui.max_rect().min, texture.size_vec2());
                        ui.painter().image(
                            texture.id(),
                            rect,
                            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                            Color32::WHITE,
                        );
                    }
                });
        });
    }
}
