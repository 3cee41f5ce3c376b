use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::data::extrema::CorrelationPair;
use crate::data::model::NumericTable;

// ---------------------------------------------------------------------------
// Scatter of one correlated pair
// ---------------------------------------------------------------------------

/// Points where both columns of `pair` are present, i.e. exactly the rows
/// that went into its coefficient.
pub fn pair_points(table: &NumericTable, pair: &CorrelationPair) -> Vec<[f64; 2]> {
    let (Some(x), Some(y)) = (table.column(&pair.first), table.column(&pair.second)) else {
        return Vec::new();
    };
    x.values
        .iter()
        .zip(y.values.iter())
        .filter_map(|(a, b)| Some([(*a)?, (*b)?]))
        .collect()
}

/// Render the scatter plot below an extremum panel.
pub fn pair_scatter(ui: &mut Ui, table: &NumericTable, pair: &CorrelationPair, color: Color32) {
    let points: PlotPoints = pair_points(table, pair).into_iter().collect();

    Plot::new(("pair_scatter", &pair.first, &pair.second))
        .height(240.0)
        .x_axis_label(pair.first.clone())
        .y_axis_label(pair.second.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name(format!("r = {:.4}", pair.coefficient))
                    .color(color)
                    .radius(2.5),
            );
        });
}
