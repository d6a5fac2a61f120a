use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Plot, Points};

use crate::color::ColorMap;
use crate::figure::ScatterFigure;

// ---------------------------------------------------------------------------
// Payload scatter plot (lower central panel)
// ---------------------------------------------------------------------------

/// Render the payload-vs-outcome scatter.
pub fn scatter_plot(ui: &mut Ui, figure: &ScatterFigure, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    let grouped = figure.color_column.is_some();
    let ticks = figure.y_ticks;

    let mut plot = Plot::new("payload_scatter")
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .include_y(-0.5)
        .include_y(1.5)
        // The outcome axis only ever shows the two classes.
        .y_grid_spacer(move |_| {
            ticks
                .iter()
                .map(|&value| GridMark {
                    value,
                    step_size: 1.0,
                })
                .collect()
        })
        .y_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if grouped {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for series in &figure.series {
            let color = match &series.label {
                Some(label) => colors.color_for(label),
                None if grouped => Color32::GRAY,
                None => Color32::LIGHT_BLUE,
            };

            let mut points = Points::new(series.points.clone())
                .radius(3.0)
                .color(color);
            if let Some(label) = &series.label {
                points = points.name(label);
            }
            plot_ui.points(points);
        }
    });
}
