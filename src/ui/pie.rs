use std::f32::consts::TAU;

use eframe::egui::{
    self, Align2, Color32, FontId, Mesh, Pos2, Rect, RichText, Sense, Shape, Ui, Vec2,
};

use crate::color::generate_palette;
use crate::figure::PieFigure;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 204, 113);
const FAILURE_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

// ---------------------------------------------------------------------------
// Pie chart (upper central panel)
// ---------------------------------------------------------------------------

/// Render the pie chart: centered title, the disc, and a legend column.
pub fn pie_chart(ui: &mut Ui, figure: &PieFigure, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    let total = figure.total();
    if total == 0 {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.weak("No data for this selection");
        });
        return;
    }

    let colors = slice_colors(figure);
    ui.horizontal(|ui: &mut Ui| {
        let side = height.min(ui.available_width() * 0.6).max(40.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        draw_slices(ui, rect, figure, total, &colors);

        // Legend: every slice keeps its entry, zero-count ones included.
        ui.vertical(|ui: &mut Ui| {
            for ((label, count), color) in figure.slices.iter().zip(&colors) {
                ui.label(RichText::new(format!("{label}: {count}")).color(*color));
            }
        });
    });
}

/// Colours for the slices: a success-vs-failure split keeps its fixed
/// green/red pair, anything else gets the generated palette.
fn slice_colors(figure: &PieFigure) -> Vec<Color32> {
    let labels: Vec<&str> = figure.slices.iter().map(|(label, _)| label.as_str()).collect();
    if labels == ["Success", "Failure"] {
        vec![SUCCESS_COLOR, FAILURE_COLOR]
    } else {
        generate_palette(figure.slices.len())
    }
}

fn draw_slices(ui: &Ui, rect: Rect, figure: &PieFigure, total: u64, colors: &[Color32]) {
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - 4.0;

    // Slices start at twelve o'clock and run clockwise.  Angles come
    // from cumulative counts, so the disc always closes exactly.
    let mut cumulative = 0u64;
    for ((label, count), color) in figure.slices.iter().zip(colors) {
        if *count == 0 {
            continue;
        }
        let from = -TAU / 4.0 + TAU * (cumulative as f32 / total as f32);
        cumulative += u64::from(*count);
        let to = -TAU / 4.0 + TAU * (cumulative as f32 / total as f32);
        add_slice(&painter, center, radius, from, to, *color);

        let fraction = *count as f32 / total as f32;
        if fraction >= 0.05 {
            let mid = (from + to) / 2.0;
            let pos = center + radius * 0.6 * Vec2::new(mid.cos(), mid.sin());
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{label}\n{:.1}%", fraction * 100.0),
                FontId::proportional(11.0),
                Color32::WHITE,
            );
        }
    }
}

/// Paint one slice as a triangle fan around the centre.
fn add_slice(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    from: f32,
    to: f32,
    color: Color32,
) {
    let steps = (((to - from) / TAU * 96.0).ceil() as usize).max(2);
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for i in 0..=steps {
        let angle = from + (to - from) * (i as f32 / steps as f32);
        let point = center + radius * Vec2::new(angle.cos(), angle.sin());
        mesh.colored_vertex(point, color);
    }
    for i in 0..steps {
        mesh.add_triangle(0, (i + 1) as u32, (i + 2) as u32);
    }
    painter.add(Shape::mesh(mesh));
}
