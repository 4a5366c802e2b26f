use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Field;
use crate::state::AppState;
use crate::ui::{charts, panels, plot};
use crate::view::{CrossAnalysis, DashboardView, IDENTICAL_AXES_WARNING};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashboardApp {
    pub state: AppState,
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("User Data Analysis Dashboard");
            ui.separator();

            if self.state.view.is_none() {
                panels::upload_prompt(ui, &mut self.state);
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

/// Loaded-state body. Input from the selectors and the download button is
/// applied after the frame is drawn so the view is never mutated mid-paint.
fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let (Some(session), Some(view)) = (&state.session, &state.view) else {
        return;
    };

    panels::raw_data(ui, session, view);
    ui.add_space(8.0);

    overview_charts(ui, view);
    ui.add_space(12.0);

    let current = view.axes;
    let mut axes = current;
    ui.heading("Cross Analysis");
    panels::axis_selectors(ui, &mut axes);
    ui.add_space(6.0);
    cross_analysis(ui, view);

    ui.add_space(12.0);
    let download = ui.button("Download Cleaned Data").clicked();

    if axes.x != current.x {
        state.set_x_axis(axes.x);
    }
    if axes.y != current.y {
        state.set_y_axis(axes.y);
    }
    if download {
        panels::save_export_dialog(state);
    }
}

fn overview_charts(ui: &mut Ui, view: &DashboardView) {
    ui.columns(3, |cols: &mut [Ui]| {
        cols[0].heading(Field::MaritalStatus.label());
        charts::donut_chart(&mut cols[0], &view.marital_status);

        cols[1].heading(Field::BoloAppLanguage.label());
        plot::category_bar_chart(&mut cols[1], "app_language_bars", "Language", &view.app_language);

        cols[2].heading(Field::EmploymentStatus.label());
        charts::treemap_chart(&mut cols[2], &view.employment_status);
    });
}

fn cross_analysis(ui: &mut Ui, view: &DashboardView) {
    match &view.cross {
        CrossAnalysis::Table(tab) => {
            ui.label(
                RichText::new(format!("{} vs {}", view.axes.x, view.axes.y))
                    .size(18.0)
                    .strong(),
            );
            charts::heatmap(ui, tab);
        }
        CrossAnalysis::IdenticalAxes(_) => {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.colored_label(Color32::from_rgb(214, 150, 0), IDENTICAL_AXES_WARNING);
            });
        }
    }
}
