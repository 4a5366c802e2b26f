use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::EXPORT_FILE_NAME;
use crate::data::model::Field;
use crate::state::AppState;
use crate::view::{AxisSelection, DashboardView, Session};

pub const UPLOAD_PROMPT: &str = "Please upload an Excel file to begin analysis";

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
            if ui
                .add_enabled(state.session.is_some(), egui::Button::new("Download Cleaned Data…"))
                .clicked()
            {
                save_export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} records, {} clean",
                session.source_name,
                session.records.len(),
                session.clean.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Empty state
// ---------------------------------------------------------------------------

/// Shown until the first successful upload.
pub fn upload_prompt(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(RichText::new(UPLOAD_PROMPT).size(16.0));
        ui.add_space(8.0);
        if ui.button("Upload Excel file (.xlsx)…").clicked() {
            open_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// Raw data
// ---------------------------------------------------------------------------

/// Collapsible table of every uploaded row plus the record counts.
pub fn raw_data(ui: &mut Ui, session: &Session, view: &DashboardView) {
    egui::CollapsingHeader::new("View Raw Data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let columns = &session.records.columns;
            let records = &session.records.records;

            ScrollArea::horizontal()
                .id_salt("raw_data_hscroll")
                .show(ui, |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .columns(Column::auto().at_least(70.0).resizable(true), columns.len())
                        .max_scroll_height(300.0)
                        .header(20.0, |mut header| {
                            for col in columns {
                                header.col(|ui: &mut Ui| {
                                    ui.strong(col);
                                });
                            }
                        })
                        .body(|body| {
                            body.rows(18.0, records.len(), |mut row| {
                                let rec = &records[row.index()];
                                for col in columns {
                                    row.col(|ui: &mut Ui| {
                                        let text = rec.get(col).map(|v| v.to_string()).unwrap_or_default();
                                        ui.label(text);
                                    });
                                }
                            });
                        });
                });

            ui.weak(view.record_caption());
        });
}

// ---------------------------------------------------------------------------
// Cross-analysis selectors
// ---------------------------------------------------------------------------

/// Two side-by-side field selectors. Edits `axes` in place.
pub fn axis_selectors(ui: &mut Ui, axes: &mut AxisSelection) {
    ui.columns(2, |cols: &mut [Ui]| {
        field_combo(&mut cols[0], "X-axis variable", &mut axes.x);
        field_combo(&mut cols[1], "Y-axis variable", &mut axes.y);
    });
}

fn field_combo(ui: &mut Ui, label: &str, selected: &mut Field) {
    ui.label(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(selected.column_name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for field in Field::ALL {
                ui.selectable_value(selected, field, field.column_name());
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your Excel file")
        .add_filter("Excel workbook", &["xlsx"])
        .pick_file();

    if let Some(path) = file {
        // Errors are already logged and stored in `status_message`.
        let _ = state.open_path(&path);
    }
}

pub fn save_export_dialog(state: &mut AppState) {
    let Some(export) = state.export() else {
        return;
    };

    let result = export.and_then(|export| {
        let target = rfd::FileDialog::new()
            .set_title("Download Cleaned Data")
            .set_file_name(export.file_name)
            .add_filter("CSV", &["csv"])
            .save_file();
        match target {
            Some(path) => export.write_to(&path),
            None => Ok(()),
        }
    });

    if let Err(e) = result {
        log::error!("Failed to export {EXPORT_FILE_NAME}: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
