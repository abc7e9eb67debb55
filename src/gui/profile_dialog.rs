use crate::speed::ProfileStats;
use eframe::egui;
use rust_i18n::t;

/// Shows the statistics captured when the window was opened.
#[derive(Default)]
pub struct ProfileDialog {
    pub open: bool,
    snapshot: ProfileStats,
}

impl ProfileDialog {
    pub fn open(&mut self, stats: ProfileStats) {
        self.snapshot = stats;
        self.open = true;
    }

    pub fn snapshot(&self) -> ProfileStats {
        self.snapshot
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        let mut open = self.open;
        let stats = self.snapshot;
        egui::Window::new(t!("profile.title").to_string())
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(
                        t!("profile.average", speed = format!("{:.2}", stats.average_speed))
                            .to_string(),
                    )
                    .size(16.0),
                );
                ui.label(
                    egui::RichText::new(t!("profile.max", speed = stats.max_speed).to_string())
                        .size(16.0),
                );
            });
        self.open = open;
    }
}
