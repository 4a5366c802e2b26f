use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::{generate_palette, CategoryColors};
use crate::data::aggregate::FrequencyTable;
use crate::ui::charts::{no_data, CHART_HEIGHT};

// ---------------------------------------------------------------------------
// Category bar chart
// ---------------------------------------------------------------------------

/// One bar per category, coloured by category, count written above each bar.
pub fn category_bar_chart(ui: &mut Ui, id: &str, x_label: &str, table: &FrequencyTable) {
    if table.is_empty() {
        no_data(ui, CHART_HEIGHT);
        return;
    }

    let colors = CategoryColors::new(
        table.entries().iter().map(|(c, _)| c),
        generate_palette(table.len()),
    );

    let bars: Vec<Bar> = table
        .entries()
        .iter()
        .enumerate()
        .map(|(i, (category, count))| {
            Bar::new(i as f64, *count as f64)
                .name(category.to_string())
                .fill(colors.color_for(category))
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = table.entries().iter().map(|(c, _)| c.to_string()).collect();
    let max = table.entries().first().map(|(_, n)| *n).unwrap_or(0) as f64;

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .include_y(0.0)
        .include_y(max * 1.15)
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            for (i, (_, count)) in table.entries().iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, *count as f64),
                        RichText::new(count.to_string()).strong(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}
