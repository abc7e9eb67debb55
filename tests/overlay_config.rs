use eframe::egui::Color32;
use wpm_overlay::config::OverlayConfig;
use wpm_overlay::settings::Settings;

#[test]
fn seeded_from_settings() {
    let settings = Settings {
        overlay_font_size: 30,
        overlay_font_color: "red".into(),
        graph_color: "#00ff00".into(),
        overlay_position: (5, 6),
        ..Settings::default()
    };
    let config = OverlayConfig::from_settings(&settings);
    assert_eq!(config.font_size(), 30);
    assert_eq!(config.font_color(), Color32::from_rgb(255, 0, 0));
    assert_eq!(config.chart_color(), Color32::from_rgb(0, 255, 0));
    assert_eq!(config.position(), (5, 6));
    assert!(config.enabled());
}

#[test]
fn defaults_match_settings_defaults() {
    let config = OverlayConfig::default();
    assert_eq!(config.font_size(), 24);
    assert_eq!(config.font_color(), Color32::BLACK);
    assert_eq!(config.chart_color(), Color32::from_rgb(0, 0, 255));
    assert_eq!(config.position(), (10, 10));
}

#[test]
fn setters_return_previous_value() {
    let mut config = OverlayConfig::default();
    assert_eq!(config.set_position((100, 200)), (10, 10));
    assert_eq!(config.set_position((1, 2)), (100, 200));
    assert_eq!(config.set_font_size(40), 24);
    assert_eq!(config.set_font_color(Color32::WHITE), Color32::BLACK);
    assert_eq!(
        config.set_chart_color(Color32::RED),
        Color32::from_rgb(0, 0, 255)
    );
    assert!(config.set_enabled(false));
    assert!(!config.enabled());
}

#[test]
fn font_size_is_clamped() {
    let mut config = OverlayConfig::default();
    config.set_font_size(2);
    assert_eq!(config.font_size(), 10);
    config.set_font_size(500);
    assert_eq!(config.font_size(), 72);

    let settings = Settings {
        overlay_font_size: 0,
        ..Settings::default()
    };
    assert_eq!(OverlayConfig::from_settings(&settings).font_size(), 10);
}
