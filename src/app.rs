use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TitanicApp {
    pub state: AppState,
}

impl TitanicApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TitanicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            self.state.next_view();
        }

        // ---- Top panel: tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: chart or schema ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Dataset => panels::dataset_panel(ui, &self.state.summary),
            View::Chart(_) => {
                if let Some(chart) = self.state.active_chart() {
                    plot::chart_plot(ui, chart);
                }
            }
        });
    }
}
