use crate::capture::{capture_primary_screen, ScreenCapture};
use crate::overlay::render::{OVERLAY_HEIGHT, OVERLAY_WIDTH};
use eframe::egui::{
    self, pos2, vec2, Color32, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions,
    ViewportBuilder, ViewportId, Vec2,
};
use rust_i18n::t;

/// Drag state of the preview frame, in screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    origin: Pos2,
    grab_offset: Option<Vec2>,
}

impl DragFrame {
    pub fn new(position: (i32, i32)) -> Self {
        Self {
            origin: pos2(position.0 as f32, position.1 as f32),
            grab_offset: None,
        }
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }

    pub fn begin_drag(&mut self, pointer: Pos2) {
        self.grab_offset = Some(pointer - self.origin);
    }

    /// Move the frame so the grabbed point stays under the pointer.
    pub fn drag_to(&mut self, pointer: Pos2) {
        if let Some(offset) = self.grab_offset {
            self.origin = pointer - offset;
        }
    }

    /// End the drag and return the new top-left, rounded to whole pixels.
    pub fn release(&mut self) -> (i32, i32) {
        self.grab_offset = None;
        (self.origin.x.round() as i32, self.origin.y.round() as i32)
    }
}

/// Outcome of one frame of the repositioning flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionResult {
    Pending,
    Committed((i32, i32)),
    Cancelled,
}

/// Full-screen backdrop of a screen capture with a draggable overlay preview.
pub struct RepositionFlow {
    frame: DragFrame,
    backdrop: Option<TextureHandle>,
    size: Vec2,
}

impl RepositionFlow {
    /// Capture the screen and start the flow at the overlay's `position`.
    pub fn start(ctx: &egui::Context, position: (i32, i32)) -> Self {
        let (backdrop, size) = match capture_primary_screen() {
            Ok(capture) => {
                let (w, h) = capture.logical_size();
                (Some(backdrop_texture(ctx, &capture)), vec2(w, h))
            }
            Err(e) => {
                tracing::warn!("screen capture failed, repositioning over a blank backdrop: {e:#}");
                let size = ctx
                    .input(|i| i.viewport().monitor_size)
                    .unwrap_or(vec2(1920.0, 1080.0));
                (None, size)
            }
        };
        tracing::debug!(?position, "reposition started");
        Self {
            frame: DragFrame::new(position),
            backdrop,
            size,
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, preview: Option<&TextureHandle>) -> RepositionResult {
        let builder = ViewportBuilder::default()
            .with_title(t!("reposition.title").to_string())
            .with_decorations(false)
            .with_always_on_top()
            .with_position(pos2(0.0, 0.0))
            .with_inner_size(self.size);

        let frame = &mut self.frame;
        let backdrop = self.backdrop.as_ref();
        ctx.show_viewport_immediate(
            ViewportId::from_hash_of("wpm-reposition"),
            builder,
            |ctx, _class| {
                if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.viewport().close_requested())
                {
                    return RepositionResult::Cancelled;
                }
                egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(Color32::from_gray(40)))
                    .show(ctx, |ui| drag_ui(ui, frame, backdrop, preview))
                    .inner
            },
        )
    }
}

fn drag_ui(
    ui: &mut egui::Ui,
    frame: &mut DragFrame,
    backdrop: Option<&TextureHandle>,
    preview: Option<&TextureHandle>,
) -> RepositionResult {
    let full = ui.max_rect();
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    if let Some(backdrop) = backdrop {
        ui.painter().image(backdrop.id(), full, uv, Color32::WHITE);
    }
    ui.painter().text(
        full.center_top() + vec2(0.0, 24.0),
        egui::Align2::CENTER_TOP,
        t!("reposition.hint").to_string(),
        egui::FontId::proportional(18.0),
        Color32::WHITE,
    );

    let rect = Rect::from_min_size(
        full.min + frame.origin().to_vec2(),
        vec2(OVERLAY_WIDTH as f32, OVERLAY_HEIGHT as f32),
    );
    if let Some(preview) = preview {
        ui.painter().image(preview.id(), rect, uv, Color32::WHITE);
    }
    ui.painter()
        .rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::from_rgb(255, 200, 0)));

    let response = ui.interact(rect, ui.id().with("wpm-reposition-frame"), Sense::drag());
    let pointer = response
        .interact_pointer_pos()
        .map(|p| p - full.min.to_vec2());

    if response.dragged() {
        if let Some(pointer) = pointer {
            if !frame.is_dragging() {
                let grab = ui
                    .input(|i| i.pointer.press_origin())
                    .map(|p| p - full.min.to_vec2())
                    .unwrap_or(pointer);
                frame.begin_drag(grab);
            }
            frame.drag_to(pointer);
        }
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        RepositionResult::Pending
    } else if frame.is_dragging() {
        let position = frame.release();
        tracing::info!(?position, "overlay repositioned");
        RepositionResult::Committed(position)
    } else {
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
        RepositionResult::Pending
    }
}

fn backdrop_texture(ctx: &egui::Context, capture: &ScreenCapture) -> TextureHandle {
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [capture.image.width() as usize, capture.image.height() as usize],
        capture.image.as_raw(),
    );
    ctx.load_texture("wpm-reposition-backdrop", image, TextureOptions::LINEAR)
}
