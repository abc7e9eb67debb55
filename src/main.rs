use eframe::egui;
use std::sync::Arc;
use wpm_overlay::config::OverlayConfig;
use wpm_overlay::gui::{app_title, MonitorApp};
use wpm_overlay::key_monitor::{KeyActivity, KeyMonitor};
use wpm_overlay::settings::Settings;
use wpm_overlay::{i18n, logging, SETTINGS_FILE};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging, settings.log_file());
    i18n::set_language(settings.language());
    tracing::info!(?settings, "starting");

    let activity = Arc::new(KeyActivity::new());
    let monitor = KeyMonitor::start(activity.clone())?;
    let config = OverlayConfig::from_settings(&settings);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app_title())
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([480.0, 320.0])
            .with_always_on_top(),
        ..Default::default()
    };

    let app_monitor = monitor.clone();
    eframe::run_native(
        "wpm_overlay",
        native_options,
        Box::new(move |_cc| Box::new(MonitorApp::new(config, activity, Some(app_monitor)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the user interface: {e}"))?;

    if let Some(error) = monitor.failure() {
        anyhow::bail!(error);
    }
    Ok(())
}
