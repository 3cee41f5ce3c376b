use eframe::egui::{self, Color32, RichText, Stroke, Ui};

use crate::color::DivergingScale;
use crate::data::extrema::CorrelationPair;
use crate::data::model::NumericTable;
use crate::state::{AppState, ExtremumView, SAMPLE_ROWS};
use crate::ui::{plot, tables};

const POSITIVE_ACCENT: Color32 = Color32::from_rgb(40, 167, 69);
const NEGATIVE_ACCENT: Color32 = Color32::from_rgb(220, 53, 69);

// ---------------------------------------------------------------------------
// Central panel – the dashboard
// ---------------------------------------------------------------------------

/// Render the dashboard: extremum buttons, their panels and the optional
/// matrix / sample sections.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🏋 Fitness data correlation explorer");

    let Some(dataset) = state.dataset.clone() else {
        ui.label(format!("Data file: {}", state.data_path.display()));
        ui.add_space(8.0);
        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        ui.label("Open a file to analyse  (File → Open…)");
        return;
    };

    ui.label(format!("Data file: {}", dataset.path.display()));
    ui.separator();

    match state.extrema() {
        Some(Ok(extrema)) => {
            if ui.button("⬆ Show strongest positive correlation").clicked() {
                state.press(ExtremumView::StrongestPositive);
            }
            if state.active_view == Some(ExtremumView::StrongestPositive) {
                extremum_panel(
                    ui,
                    &dataset.numeric,
                    &extrema.max,
                    ExtremumView::StrongestPositive,
                );
            }

            ui.separator();

            if ui.button("⬇ Show strongest negative correlation").clicked() {
                state.press(ExtremumView::StrongestNegative);
            }
            if state.active_view == Some(ExtremumView::StrongestNegative) {
                extremum_panel(
                    ui,
                    &dataset.numeric,
                    &extrema.min,
                    ExtremumView::StrongestNegative,
                );
            }
        }
        Some(Err(e)) => {
            ui.label(
                RichText::new(format!(
                    "Nothing to compare: {e}. At least two varying numeric columns are needed."
                ))
                .color(Color32::YELLOW),
            );
        }
        None => {}
    }

    ui.separator();

    egui::CollapsingHeader::new("📊 Full correlation matrix")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if dataset.matrix.is_empty() {
                ui.label("No numeric columns.");
            } else {
                tables::correlation_matrix(ui, &dataset.matrix, &DivergingScale::coolwarm());
            }
        });

    egui::CollapsingHeader::new("📋 Numeric data sample")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if dataset.numeric.is_empty() {
                ui.label("No numeric columns.");
            } else {
                tables::numeric_sample(ui, &dataset.numeric, SAMPLE_ROWS);
            }
        });
}

fn extremum_panel(
    ui: &mut Ui,
    numeric: &NumericTable,
    pair: &CorrelationPair,
    view: ExtremumView,
) {
    let (title, accent, hint) = match view {
        ExtremumView::StrongestPositive => (
            "Strongest positive correlation",
            POSITIVE_ACCENT,
            "The closer the value is to 1, the more one variable tends to rise as the other rises.",
        ),
        ExtremumView::StrongestNegative => (
            "Strongest negative correlation",
            NEGATIVE_ACCENT,
            "The closer the value is to -1, the more one variable tends to fall as the other rises.",
        ),
    };

    egui::Frame::group(ui.style())
        .stroke(Stroke::new(1.5, accent))
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(title).strong().color(accent));
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Columns:");
                ui.label(RichText::new(&pair.first).strong());
                ui.label("and");
                ui.label(RichText::new(&pair.second).strong());
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Coefficient:");
                ui.label(RichText::new(format!("{:.4}", pair.coefficient)).strong());
            });
            ui.label(RichText::new(hint).italics());
        });

    plot::pair_scatter(ui, numeric, pair, accent);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} columns, {} numeric",
                ds.table.n_rows(),
                ds.table.n_columns(),
                ds.numeric.n_columns()
            ))
            .on_hover_text(ds.table.column_names().join(", "));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open data file")
        .add_filter("Supported files", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
