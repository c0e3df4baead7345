use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, HLine, Legend, LineStyle, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::chart::{pie_slices, Chart, ChartKind};

/// Total width of one category's group of bars, in category units.
const GROUP_WIDTH: f64 = 0.7;
/// Pie label radius relative to the unit circle.
const PIE_LABEL_RADIUS: f64 = 1.25;
const PIE_SHARE_RADIUS: f64 = 0.6;

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render one chart description in the central panel.
pub fn chart_plot(ui: &mut Ui, chart: &Chart) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&chart.title).strong());
    });
    match chart.kind {
        ChartKind::Pie => pie_plot(ui, chart),
        ChartKind::Bar => bar_plot(ui, chart),
    }
}

fn pie_plot(ui: &mut Ui, chart: &Chart) {
    let Some(series) = chart.series.first() else {
        return;
    };
    let slices = pie_slices(&series.values);

    Plot::new(("pie", &chart.title))
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_x(-1.8)
        .include_x(1.8)
        .include_y(-1.5)
        .include_y(1.5)
        .show(ui, |plot_ui| {
            for (idx, slice) in slices.iter().enumerate() {
                if slice.sweep <= 0.0 {
                    continue;
                }
                let color = chart
                    .category_colors
                    .get(idx)
                    .copied()
                    .unwrap_or(series.color);
                let label = chart.categories.get(idx).cloned().unwrap_or_default();

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(wedge_points(slice.start, slice.sweep)))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(&label),
                );

                let mid = slice.mid_angle();
                plot_ui.text(Text::new(
                    PlotPoint::new(PIE_LABEL_RADIUS * mid.cos(), PIE_LABEL_RADIUS * mid.sin()),
                    RichText::new(label).strong(),
                ));
                if let Some(share) = series.value_labels.get(idx) {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(PIE_SHARE_RADIUS * mid.cos(), PIE_SHARE_RADIUS * mid.sin()),
                            RichText::new(share).strong(),
                        )
                        .color(Color32::BLACK),
                    );
                }
            }
        });
}

fn bar_plot(ui: &mut Ui, chart: &Chart) {
    let max_value = chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0, f64::max);
    let y_max = chart.y_max.unwrap_or(max_value * 1.15).max(1.0);
    let label_pad = y_max * 0.01;
    let offsets = bar_offsets(chart.series.len());
    let bar_width = GROUP_WIDTH / chart.series.len().max(1) as f64;

    Plot::new(("bar", &chart.title))
        .legend(Legend::default())
        .x_axis_label(chart.x_axis.as_str())
        .y_axis_label(chart.y_axis.as_str())
        .show_axes([false, true])
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_x(-0.6)
        .include_x(chart.categories.len() as f64 - 0.4)
        .include_y(-y_max * 0.08)
        .include_y(y_max)
        .show(ui, |plot_ui| {
            for (series, offset) in chart.series.iter().zip(&offsets) {
                let bars = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(idx, &value)| {
                        let fill = chart
                            .category_colors
                            .get(idx)
                            .copied()
                            .unwrap_or(series.color);
                        Bar::new(idx as f64 + offset, value)
                            .width(bar_width)
                            .fill(fill)
                            .stroke(Stroke::new(1.0, Color32::BLACK))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(series.color));

                for (idx, (&value, label)) in series.values.iter().zip(&series.value_labels).enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(idx as f64 + offset, value + label_pad),
                            RichText::new(label).strong(),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }

            for (idx, category) in chart.categories.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(idx as f64, -label_pad), category.as_str())
                        .anchor(Align2::CENTER_TOP),
                );
            }

            if let Some(reference) = &chart.reference {
                plot_ui.hline(
                    HLine::new(reference.value)
                        .color(reference.color)
                        .style(LineStyle::dashed_loose())
                        .name(&reference.label),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Horizontal offsets of `n` side-by-side bars centred on their category.
fn bar_offsets(n: usize) -> Vec<f64> {
    let width = GROUP_WIDTH / n.max(1) as f64;
    let centre = (n as f64 - 1.0) / 2.0;
    (0..n).map(|i| (i as f64 - centre) * width).collect()
}

/// Closed outline of a unit-circle wedge: centre, then the arc.
fn wedge_points(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / std::f64::consts::TAU) * 128.0).ceil().max(2.0) as usize;
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| {
            let angle = start + sweep * i as f64 / steps as f64;
            [angle.cos(), angle.sin()]
        }))
        .collect()
}
