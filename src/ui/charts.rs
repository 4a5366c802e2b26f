use std::f32::consts::TAU;

use eframe::egui::{
    self, pos2, vec2, Align2, Color32, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke, Ui,
};

use crate::color::{pastel, text_color_for, CategoryColors, BLUES, VIRIDIS};
use crate::data::aggregate::{CrossTab, FrequencyTable};
use crate::ui::treemap::squarify;

/// Fraction of the pie radius left empty in the middle.
const DONUT_HOLE: f32 = 0.3;

/// Height shared by the three overview charts.
pub const CHART_HEIGHT: f32 = 320.0;

/// Placeholder for a chart with nothing to draw.
pub fn no_data(ui: &mut Ui, height: f32) {
    ui.allocate_ui(vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak("No data");
        });
    });
}

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

/// Donut chart of `table` with "label / percent" written inside each slice.
pub fn donut_chart(ui: &mut Ui, table: &FrequencyTable) {
    if table.is_empty() {
        no_data(ui, CHART_HEIGHT);
        return;
    }

    let categories = table.entries().iter().map(|(c, _)| c);
    let colors = CategoryColors::new(categories, pastel(table.len()));

    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = (rect.width().min(rect.height()) / 2.0 - 8.0).max(10.0);
    let inner = outer * DONUT_HOLE;
    let background = ui.visuals().panel_fill;

    // Angle 0 points up, slices run clockwise.
    let point = |angle: f32, radius: f32| -> Pos2 {
        center + vec2(angle.sin(), -angle.cos()) * radius
    };

    let mut hovered = None;
    let pointer = response.hover_pos();
    let mut start = 0.0f32;

    for (category, count) in table.entries() {
        let sweep = table.share(*count) as f32 * TAU;
        let end = start + sweep;
        let color = colors.color_for(category);

        let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as usize;
        let mut mesh = Mesh::default();
        for s in 0..=steps {
            let a = start + sweep * s as f32 / steps as f32;
            mesh.colored_vertex(point(a, inner), color);
            mesh.colored_vertex(point(a, outer), color);
        }
        for s in 0..steps as u32 {
            let i = s * 2;
            mesh.add_triangle(i, i + 1, i + 2);
            mesh.add_triangle(i + 1, i + 3, i + 2);
        }
        painter.add(Shape::mesh(mesh));

        if table.len() > 1 {
            painter.line_segment([point(start, inner), point(start, outer)], Stroke::new(1.5, background));
        }

        let percent = table.share(*count) * 100.0;
        if sweep > 0.25 {
            let mid = point(start + sweep / 2.0, (inner + outer) / 2.0);
            painter.text(
                mid,
                Align2::CENTER_CENTER,
                format!("{category}\n{percent:.1}%"),
                FontId::proportional(12.0),
                text_color_for(color),
            );
        }

        if let Some(p) = pointer {
            let offset = p - center;
            let radius = offset.length();
            let angle = offset.x.atan2(-offset.y).rem_euclid(TAU);
            if radius >= inner && radius <= outer && angle >= start && angle < end {
                hovered = Some(format!("{category}: {count} ({percent:.1}%)"));
            }
        }

        start = end;
    }

    if let Some(text) = hovered {
        response.on_hover_text(text);
    }
}

// ---------------------------------------------------------------------------
// Treemap
// ---------------------------------------------------------------------------

/// Treemap of `table`: tile area and colour both follow the count.
pub fn treemap_chart(ui: &mut Ui, table: &FrequencyTable) {
    if table.is_empty() {
        no_data(ui, CHART_HEIGHT);
        return;
    }

    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let rect = response.rect.shrink(2.0);

    let counts: Vec<f64> = table.entries().iter().map(|(_, n)| *n as f64).collect();
    let min = counts.iter().copied().fold(f64::INFINITY, f64::min);
    let max = counts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tiles = squarify(&counts, rect);
    let background = ui.visuals().panel_fill;

    let mut hovered = None;
    for ((category, count), tile) in table.entries().iter().zip(&tiles) {
        let color = BLUES.sample_range(*count as f64, min, max);
        painter.rect_filled(*tile, 0.0, background);
        painter.rect_filled(tile.shrink(1.0), 0.0, color);

        let label = format!("{category}\n{count}");
        let galley = painter.layout_no_wrap(
            label,
            FontId::proportional(12.0),
            text_color_for(color),
        );
        if galley.size().x + 8.0 <= tile.width() && galley.size().y + 8.0 <= tile.height() {
            painter.galley(tile.min + vec2(4.0, 4.0), galley, text_color_for(color));
        }

        if response.hover_pos().is_some_and(|p| tile.contains(p)) {
            hovered = Some(format!("{category}: {count}"));
        }
    }

    if let Some(text) = hovered {
        response.on_hover_text(text);
    }
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

const ROW_LABEL_WIDTH: f32 = 130.0;
const COL_LABEL_HEIGHT: f32 = 40.0;
const COLOR_BAR_WIDTH: f32 = 70.0;

/// Annotated heatmap of a cross-tabulation. Row categories run down the left
/// edge, column categories along the bottom.
pub fn heatmap(ui: &mut Ui, tab: &CrossTab) {
    if tab.is_empty() {
        no_data(ui, 200.0);
        return;
    }

    let height = (tab.rows().len() as f32 * 48.0 + COL_LABEL_HEIGHT).clamp(200.0, 560.0);
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), height), Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();

    let grid = Rect::from_min_max(
        pos2(rect.left() + ROW_LABEL_WIDTH, rect.top()),
        pos2(rect.right() - COLOR_BAR_WIDTH, rect.bottom() - COL_LABEL_HEIGHT),
    );
    let cell_w = grid.width() / tab.cols().len() as f32;
    let cell_h = grid.height() / tab.rows().len() as f32;

    let min = (0..tab.rows().len())
        .flat_map(|r| (0..tab.cols().len()).map(move |c| (r, c)))
        .map(|(r, c)| tab.cell(r, c))
        .min()
        .unwrap_or(0) as f64;
    let max = tab.max_count() as f64;

    let mut hovered = None;
    for (r, row) in tab.rows().iter().enumerate() {
        let y = grid.top() + r as f32 * cell_h;
        painter.text(
            pos2(grid.left() - 6.0, y + cell_h / 2.0),
            Align2::RIGHT_CENTER,
            row.to_string(),
            FontId::proportional(12.0),
            text_color,
        );

        for (c, col) in tab.cols().iter().enumerate() {
            let cell = Rect::from_min_size(pos2(grid.left() + c as f32 * cell_w, y), vec2(cell_w, cell_h));
            let count = tab.cell(r, c);
            let color = VIRIDIS.sample_range(count as f64, min, max);
            painter.rect_filled(cell, 0.0, color);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                count.to_string(),
                FontId::proportional(13.0),
                text_color_for(color),
            );

            if response.hover_pos().is_some_and(|p| cell.contains(p)) {
                hovered = Some(format!(
                    "{}: {row}\n{}: {col}\ncount: {count}",
                    tab.row_field, tab.col_field
                ));
            }
        }
    }

    for (c, col) in tab.cols().iter().enumerate() {
        painter.text(
            pos2(grid.left() + (c as f32 + 0.5) * cell_w, grid.bottom() + 4.0),
            Align2::CENTER_TOP,
            col.to_string(),
            FontId::proportional(12.0),
            text_color,
        );
    }
    painter.text(
        pos2(grid.center().x, rect.bottom()),
        Align2::CENTER_BOTTOM,
        tab.col_field.column_name(),
        FontId::proportional(13.0),
        text_color,
    );
    painter.text(
        pos2(rect.left(), grid.top() - 2.0),
        Align2::LEFT_BOTTOM,
        tab.row_field.column_name(),
        FontId::proportional(13.0),
        text_color,
    );

    color_bar(&painter, grid, min, max, text_color);

    if let Some(text) = hovered {
        response.on_hover_text(text);
    }
}

fn color_bar(painter: &egui::Painter, grid: Rect, min: f64, max: f64, text_color: Color32) {
    const STEPS: usize = 48;
    let bar = Rect::from_min_size(pos2(grid.right() + 12.0, grid.top()), vec2(14.0, grid.height()));
    let step_h = bar.height() / STEPS as f32;
    for i in 0..STEPS {
        // Top of the bar is the maximum.
        let t = 1.0 - (i as f64 + 0.5) / STEPS as f64;
        let strip = Rect::from_min_size(pos2(bar.left(), bar.top() + i as f32 * step_h), vec2(bar.width(), step_h + 0.5));
        painter.rect_filled(strip, 0.0, VIRIDIS.sample(t));
    }
    let font = FontId::proportional(11.0);
    painter.text(bar.right_top() + vec2(4.0, 0.0), Align2::LEFT_TOP, format!("{max}"), font.clone(), text_color);
    painter.text(bar.right_bottom() + vec2(4.0, 0.0), Align2::LEFT_BOTTOM, format!("{min}"), font, text_color);
}
