use criterion::{criterion_group, criterion_main, Criterion};
use eframe::egui::Color32;
use wpm_overlay::overlay::{render_overlay, OverlayFont, OverlayStyle};

fn bench_overlay(c: &mut Criterion) {
    let font = OverlayFont::egui_default();
    let samples: Vec<u32> = (0..60).map(|i| 40 + (i * 13) % 45).collect();
    let style = OverlayStyle {
        font_size: 24.0,
        font_color: Color32::BLACK,
        chart_color: Color32::from_rgb(0, 0, 255),
    };
    c.bench_function("render_overlay_60_samples", |b| {
        b.iter(|| render_overlay(&samples, 87, &style, font.as_ref()))
    });
}

criterion_group!(benches, bench_overlay);
criterion_main!(benches);
