use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Choice;
use crate::data::loader::SourceFormat;
use crate::state::AppState;
use crate::ui::{plot, table};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 60, 60);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(60, 160, 90);
const WARNING_COLOR: Color32 = Color32::from_rgb(210, 150, 40);

// ---------------------------------------------------------------------------
// Left side panel – upload and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: file upload, then the two filter selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Upload Your Data File");
    if ui.button("Open CSV or Excel file…").clicked() {
        open_file_dialog(state);
    }
    if let Some(name) = &state.file_name {
        ui.label(RichText::new(name).italics());
    }
    ui.separator();

    if state.table.is_none() {
        ui.label("No file loaded.");
        return;
    }

    ui.heading("Filter Tourists");
    ui.add_space(4.0);

    // ---- Country: radio buttons ----
    ui.strong("Select Country");
    let mut picked_country: Option<Choice> = None;
    ScrollArea::vertical()
        .id_salt("country_options")
        .max_height(260.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for option in &state.country_options {
                let selected = state.selection.country == *option;
                if ui.radio(selected, option.to_string()).clicked() {
                    picked_country = Some(option.clone());
                }
            }
        });
    if let Some(choice) = picked_country {
        state.set_country(choice);
    }
    ui.separator();

    // ---- Destination: drop-down ----
    ui.strong("Select Destination");
    let mut picked_destination: Option<Choice> = None;
    egui::ComboBox::from_id_salt("destination")
        .selected_text(state.selection.destination.to_string())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.destination_options {
                let selected = state.selection.destination == *option;
                if ui.selectable_label(selected, option.to_string()).clicked() {
                    picked_destination = Some(option.clone());
                }
            }
        });
    if let Some(choice) = picked_destination {
        state.set_destination(choice);
    }
}

// ---------------------------------------------------------------------------
// Central panel – table, summary, charts, download
// ---------------------------------------------------------------------------

/// Render the dashboard body for the current state.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Tourist Informatics");
    ui.separator();

    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(ERROR_COLOR).strong());
    }

    let Some(view) = state.view() else {
        ui.label("Please upload a file from the sidebar to begin.");
        return;
    };

    let mut download_clicked = false;
    ScrollArea::vertical()
        .id_salt("dashboard")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("File loaded successfully!").color(SUCCESS_COLOR));
            ui.add_space(8.0);

            ui.heading("Filtered Tourist Data");
            table::data_table(ui, &view);
            ui.add_space(12.0);

            ui.heading("Summary");
            match &state.summary {
                Some(summary) => {
                    for line in summary.lines() {
                        ui.label(format!("• {line}"));
                    }
                }
                None => {
                    ui.label(
                        RichText::new("No data found for the selected filters.")
                            .color(WARNING_COLOR),
                    );
                }
            }
            ui.add_space(12.0);

            match &state.charts {
                Some(charts) => {
                    ui.heading("Visual Insights");
                    ui.columns(2, |cols| {
                        cols[0].strong("Destination Distribution");
                        plot::destination_pie(&mut cols[0], charts, state.color_map.as_ref());
                        cols[1].strong("Tourist Ratings");
                        plot::rating_bars(&mut cols[1], charts);
                    });
                }
                None => {
                    ui.label("No data to visualize.");
                }
            }
            ui.add_space(12.0);

            ui.heading("Download Filtered Data");
            download_clicked = ui.button("Download as CSV").clicked();
        });

    if download_clicked {
        save_export_dialog(state);
    }
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
            let can_export = state.table.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                save_export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} tourists loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tourist data")
        .add_filter("CSV or Excel", &SourceFormat::EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx"])
        .pick_file();

    if let Some(path) = file {
        // Errors are logged and shown through `status_message`.
        let _ = state.load_path(&path);
    }
}

pub fn save_export_dialog(state: &mut AppState) {
    let Some(result) = state.export() else {
        return;
    };
    let download = match result {
        Ok(download) => download,
        Err(e) => {
            log::error!("Export failed: {e}");
            state.status_message = Some(format!("Error: {e}"));
            return;
        }
    };

    let target = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(&download.file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        match download.save(&path) {
            Ok(()) => log::info!(
                "Saved {} ({}) to {}",
                download.file_name,
                download.media_type,
                path.display()
            ),
            Err(e) => {
                log::error!("Export failed: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
