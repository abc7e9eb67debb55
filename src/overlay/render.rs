use crate::config::OverlayConfig;
use eframe::egui::{self, Color32};
use image::RgbaImage;

pub const OVERLAY_WIDTH: u32 = 250;
pub const OVERLAY_HEIGHT: u32 = 130;

const GRAPH_X: i64 = 20;
const GRAPH_WIDTH: i64 = 180;
const GRAPH_HEIGHT: i64 = 40;
const GRAPH_BOTTOM_MARGIN: i64 = 20;
const GRAPH_Y: i64 = OVERLAY_HEIGHT as i64 - GRAPH_HEIGHT - GRAPH_BOTTOM_MARGIN;
const GRAPH_BASELINE: i64 = GRAPH_Y + GRAPH_HEIGHT;

/// Offsets of the white outline copies drawn under the text.
const OUTLINE_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub font_size: f32,
    pub font_color: Color32,
    pub chart_color: Color32,
}

impl From<&OverlayConfig> for OverlayStyle {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            font_size: config.font_size() as f32,
            font_color: config.font_color(),
            chart_color: config.chart_color(),
        }
    }
}

/// Font used for the overlay text, taken from egui's bundled proportional font.
#[derive(Clone)]
pub struct OverlayFont {
    font: ab_glyph::FontArc,
    tweak: egui::FontTweak,
}

impl OverlayFont {
    pub fn egui_default() -> Option<Self> {
        let definitions = egui::FontDefinitions::default();
        let family = definitions.families.get(&egui::FontFamily::Proportional)?;
        let font_name = family.first()?;
        let data = definitions.font_data.get(font_name)?.clone();
        let tweak = data.tweak;
        let font = match data.font {
            std::borrow::Cow::Borrowed(bytes) => {
                ab_glyph::FontRef::try_from_slice_and_index(bytes, data.index)
                    .map(ab_glyph::FontArc::from)
                    .ok()
            }
            std::borrow::Cow::Owned(bytes) => {
                ab_glyph::FontVec::try_from_vec_and_index(bytes, data.index)
                    .map(ab_glyph::FontArc::from)
                    .ok()
            }
        }?;
        Some(Self { font, tweak })
    }

    /// Rasterise `text` with its origin at the top-left of the first line.
    fn rasterize(&self, text: &str, size: f32) -> TextMask {
        use ab_glyph::{point, Font, ScaleFont};

        let mut mask = TextMask::default();
        let scaled = self.font.as_scaled(size * self.tweak.scale);
        let mut caret = point(0.0, scaled.ascent() + self.tweak.y_offset * size);
        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);
            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let origin_x = bounds.min.x as i32;
            let origin_y = bounds.min.y as i32;
            outlined.draw(|x, y, coverage| {
                if coverage > 0.0 {
                    mask.push(origin_x + x as i32, origin_y + y as i32, coverage);
                }
            });
        }
        mask
    }
}

/// Coverage of rasterised text, in pixels relative to the text origin.
#[derive(Debug, Default)]
struct TextMask {
    coverage: Vec<(i32, i32, f32)>,
    min: (i32, i32),
    max: (i32, i32),
}

impl TextMask {
    fn push(&mut self, x: i32, y: i32, coverage: f32) {
        if self.coverage.is_empty() {
            self.min = (x, y);
            self.max = (x, y);
        } else {
            self.min = (self.min.0.min(x), self.min.1.min(y));
            self.max = (self.max.0.max(x), self.max.1.max(y));
        }
        self.coverage.push((x, y, coverage.min(1.0)));
    }

    fn size(&self) -> (i32, i32) {
        if self.coverage.is_empty() {
            return (0, 0);
        }
        (self.max.0 - self.min.0 + 1, self.max.1 - self.min.1 + 1)
    }

    fn stamp(&self, img: &mut RgbaImage, offset: (i32, i32), color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        for &(x, y, coverage) in &self.coverage {
            let alpha = (a as f32 * coverage).round().clamp(0.0, 255.0) as u8;
            blend_pixel(img, x + offset.0, y + offset.1, [r, g, b, alpha]);
        }
    }
}

/// Vertices of the sparkline polygon for `samples`, closed along the baseline.
///
/// Samples are normalised to the buffer's `[min, max]` with a `+1` in the
/// denominator, so equal samples lie flat on the baseline.
pub fn sparkline_polygon(samples: &[u32]) -> Vec<(i64, i64)> {
    let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
        return Vec::new();
    };
    let n = samples.len() as i64;
    let range = (max - min) as i64 + 1;

    let mut points = Vec::with_capacity(samples.len() + 2);
    points.push((GRAPH_X, GRAPH_BASELINE));
    for (i, &speed) in samples.iter().enumerate() {
        let x = GRAPH_X + (i as i64 * GRAPH_WIDTH) / n;
        let y = GRAPH_BASELINE - ((speed - min) as i64 * GRAPH_HEIGHT) / range;
        points.push((x, y));
    }
    points.push((GRAPH_X + GRAPH_WIDTH, GRAPH_BASELINE));
    points
}

/// Compose the overlay bitmap: sparkline of `samples` plus the outlined
/// `"{wpm} WPM"` text. Text is skipped when no font is available.
pub fn render_overlay(
    samples: &[u32],
    wpm: u32,
    style: &OverlayStyle,
    font: Option<&OverlayFont>,
) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(
        OVERLAY_WIDTH,
        OVERLAY_HEIGHT,
        image::Rgba([255, 255, 255, 0]),
    );

    let polygon = sparkline_polygon(samples);
    if !polygon.is_empty() {
        let color = style.chart_color.to_srgba_unmultiplied();
        fill_polygon(&mut img, &polygon, color);
        for (i, &start) in polygon.iter().enumerate() {
            let end = polygon[(i + 1) % polygon.len()];
            draw_line(&mut img, start, end, color);
        }
    }

    if let Some(font) = font {
        let mask = font.rasterize(&format!("{wpm} WPM"), style.font_size);
        let (text_w, text_h) = mask.size();
        let target_x = OVERLAY_WIDTH as i32 / 2 - text_w / 2;
        let target_y = (OVERLAY_HEIGHT as i32 - GRAPH_HEIGHT as i32) / 2 - text_h / 2;
        let offset = (target_x - mask.min.0, target_y - mask.min.1);
        for (dx, dy) in OUTLINE_OFFSETS {
            mask.stamp(&mut img, (offset.0 + dx, offset.1 + dy), Color32::WHITE);
        }
        mask.stamp(&mut img, offset, style.font_color);
    }

    img
}

fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    let [r, g, b, a] = color;
    if a == 0 || x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let dst = img.get_pixel(x, y).0;
    let src_a = a as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    let blend = |src: u8, dst: u8| {
        let src_f = src as f32 / 255.0;
        let dst_f = dst as f32 / 255.0;
        ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    img.put_pixel(
        x,
        y,
        image::Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]),
    );
}

/// One pixel wide line between two pixel coordinates.
fn draw_line(img: &mut RgbaImage, start: (i64, i64), end: (i64, i64), color: [u8; 4]) {
    let dx = (end.0 - start.0) as f32;
    let dy = (end.1 - start.1) as f32;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
    let mut last = None;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (start.0 as f32 + dx * t).round() as i32;
        let y = (start.1 as f32 + dy * t).round() as i32;
        if last == Some((x, y)) {
            continue;
        }
        last = Some((x, y));
        blend_pixel(img, x, y, color);
    }
}

/// Even-odd scanline fill sampling each row at the pixel coordinate.
fn fill_polygon(img: &mut RgbaImage, points: &[(i64, i64)], color: [u8; 4]) {
    if points.len() < 3 {
        return;
    }
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.1)
        .max()
        .unwrap_or(0)
        .min(img.height() as i64 - 1);

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in min_y..=max_y {
        crossings.clear();
        let yf = y as f32;
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            if y0 == y1 {
                continue;
            }
            let (lo, hi) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
            if y < lo || y >= hi {
                continue;
            }
            let t = (yf - y0 as f32) / (y1 - y0) as f32;
            crossings.push(x0 as f32 + t * (x1 - x0) as f32);
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil() as i32;
            let end = pair[1].floor() as i32;
            for x in start..=end {
                blend_pixel(img, x, y as i32, color);
            }
        }
    }
}
