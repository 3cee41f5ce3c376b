use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color::DivergingScale;
use crate::data::correlation::CorrelationMatrix;
use crate::data::model::NumericTable;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Correlation matrix heat-map
// ---------------------------------------------------------------------------

/// Full matrix, three decimals, each cell shaded on the diverging scale.
pub fn correlation_matrix(ui: &mut Ui, matrix: &CorrelationMatrix, scale: &DivergingScale) {
    let labels = matrix.labels();

    ui.push_id("correlation_matrix", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(false)
                .resizable(true)
                .column(TableColumn::auto())
                .columns(TableColumn::initial(72.0).at_least(48.0), labels.len())
                .header(ROW_HEIGHT, |mut header| {
                    header.col(|_ui: &mut Ui| {});
                    for label in labels {
                        header.col(|ui: &mut Ui| {
                            ui.strong(label);
                        });
                    }
                })
                .body(|mut body| {
                    for (i, label) in labels.iter().enumerate() {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.strong(label);
                            });
                            for &r in matrix.row(i) {
                                row.col(|ui: &mut Ui| {
                                    let bg = scale.color_for(r);
                                    ui.painter().rect_filled(ui.max_rect(), 0.0, bg);
                                    ui.label(
                                        RichText::new(format!("{r:.3}"))
                                            .color(DivergingScale::text_color_on(bg)),
                                    );
                                });
                            }
                        });
                    }
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Numeric sample (first rows)
// ---------------------------------------------------------------------------

/// The first `n_rows` rows of the numeric sub-table.
pub fn numeric_sample(ui: &mut Ui, table: &NumericTable, n_rows: usize) {
    ui.push_id("numeric_sample", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .column(TableColumn::auto())
                .columns(TableColumn::auto().at_least(48.0), table.n_columns())
                .header(ROW_HEIGHT, |mut header| {
                    header.col(|_ui: &mut Ui| {});
                    for col in &table.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(&col.name).on_hover_text(col.dtype.to_string());
                        });
                    }
                })
                .body(|mut body| {
                    for row_idx in table.head(n_rows) {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(row_idx.to_string());
                            });
                            for col in &table.columns {
                                row.col(|ui: &mut Ui| {
                                    ui.label(col.display(row_idx));
                                });
                            }
                        });
                    }
                });
        });
    });
}
