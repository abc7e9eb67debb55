use crate::speed::SampleHistory;
use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use rust_i18n::t;

/// Width of the x axis in samples.
pub const CHART_SPAN: f64 = 60.0;

/// History as `[index, wpm]` plot points.
pub fn chart_points(history: &SampleHistory) -> Vec<[f64; 2]> {
    history
        .iter()
        .enumerate()
        .map(|(i, wpm)| [i as f64, wpm as f64])
        .collect()
}

/// Line-and-area chart of the speed history with a fixed `[0, 60]` x range
/// and a y floor of 0.
pub fn show(ui: &mut egui::Ui, history: &SampleHistory, color: Color32) {
    ui.vertical_centered(|ui| ui.heading(t!("chart.title").to_string()));

    let points = chart_points(history);
    Plot::new("speed_history")
        .legend(Legend::default())
        .x_axis_label(t!("chart.x_label").to_string())
        .y_axis_label(t!("chart.y_label").to_string())
        .include_x(0.0)
        .include_x(CHART_SPAN)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let name = t!("chart.legend").to_string();
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(color)
                    .fill(0.0)
                    .name(&name),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(color)
                    .radius(3.0)
                    .name(&name),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_history_order() {
        let mut history = SampleHistory::default();
        history.push(12);
        history.push(30);
        assert_eq!(chart_points(&history), vec![[0.0, 12.0], [1.0, 30.0]]);
    }
}
