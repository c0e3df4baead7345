use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::report::DatasetSummary;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the tab strip and the dataset caption.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for (idx, chart) in state.charts.iter().enumerate() {
            ui.selectable_value(&mut state.view, View::Chart(idx), chart.title.as_str());
        }
        ui.selectable_value(&mut state.view, View::Dataset, "Dataset");

        ui.separator();

        ui.label(format!(
            "{} passengers from {}",
            state.summary.records, state.source
        ));
    });
}

// ---------------------------------------------------------------------------
// Dataset panel
// ---------------------------------------------------------------------------

/// Render the record count and the column/type table.
pub fn dataset_panel(ui: &mut Ui, summary: &DatasetSummary) {
    ui.heading("Dataset information");
    ui.label(format!("Number of records: {}", summary.records));
    ui.label(format!("Number of columns: {}", summary.columns.len()));
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Column");
            });
            header.col(|ui| {
                ui.strong("Type");
            });
        })
        .body(|mut body| {
            for (name, dtype) in &summary.columns {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(dtype.name()).monospace());
                    });
                });
            }
        });
}
