use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::TableView;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Render the filtered rows with every column of the source table.
pub fn data_table(ui: &mut Ui, view: &TableView<'_>) {
    let columns = view.columns();
    let rows: Vec<_> = view.rows().collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .columns(Column::auto().at_least(60.0).clip(true), columns.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let cells = rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
