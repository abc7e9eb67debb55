use eframe::egui::Color32;
use wpm_overlay::overlay::{render_overlay, OverlayFont, OverlayStyle};

fn style(font_color: Color32) -> OverlayStyle {
    OverlayStyle {
        font_size: 48.0,
        font_color,
        chart_color: Color32::from_rgb(0, 0, 255),
    }
}

#[test]
fn text_is_centered_above_the_sparkline() {
    let font = OverlayFont::egui_default().expect("bundled font");
    let img = render_overlay(&[], 87, &style(Color32::from_rgb(255, 0, 0)), Some(&font));

    let painted: Vec<(u32, u32)> = img
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] > 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!painted.is_empty());
    assert!(painted.iter().all(|&(_, y)| y < 70), "text must stay above the graph");

    let min_x = painted.iter().map(|p| p.0).min().unwrap() as i32;
    let max_x = painted.iter().map(|p| p.0).max().unwrap() as i32;
    let center = (min_x + max_x) / 2;
    assert!((center - 125).abs() <= 3, "text centered at {center}");

    let min_y = painted.iter().map(|p| p.1).min().unwrap() as i32;
    let max_y = painted.iter().map(|p| p.1).max().unwrap() as i32;
    assert!(((min_y + max_y) / 2 - 45).abs() <= 3);
}

#[test]
fn text_has_white_outline_under_foreground() {
    let font = OverlayFont::egui_default().expect("bundled font");
    let img = render_overlay(&[], 42, &style(Color32::from_rgb(255, 0, 0)), Some(&font));

    assert!(img.pixels().any(|p| p.0 == [255, 0, 0, 255]));
    assert!(img
        .pixels()
        .any(|p| p.0[3] == 255 && p.0[1] >= 200 && p.0[2] >= 200));
}

#[test]
fn sparkline_and_text_coexist() {
    let font = OverlayFont::egui_default().expect("bundled font");
    let samples: Vec<u32> = (0..60).map(|i| (i * 7) % 50).collect();
    let img = render_overlay(&samples, 3, &style(Color32::BLACK), Some(&font));
    assert_eq!(img.dimensions(), (250, 130));
    assert_eq!(img.get_pixel(150, 110).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(5, 5).0[3], 0);
}
