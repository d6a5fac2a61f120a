use eframe::egui::{self, Align2, ComboBox, FontId, RichText, ScrollArea, Sense, Slider, Ui};

use crate::data::aggregate::SiteSelection;
use crate::state::AppState;

/// Label of the site selector entry that shows every launch site.
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Fixed tick marks painted under the payload sliders.
const PAYLOAD_MARKS: [f64; 5] = [0.0, 2500.0, 5000.0, 7500.0, 10_000.0];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("SpaceX Launch Records Dashboard");
        ui.separator();
        ui.label(format!(
            "{} launches across {} sites",
            state.dataset.len(),
            state.dataset.sites.len()
        ));
        ui.separator();
        ui.label(format!(
            "{} in current selection",
            state.selected_point_count()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – site and payload filters
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            site_selector(ui, state);
            ui.separator();
            payload_sliders(ui, state);

            if let Some(column) = state.dataset.booster_column.clone() {
                ui.separator();
                booster_legend(ui, state, &column);
            }
        });
}

fn site_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let current_label = match &state.site {
        SiteSelection::All => ALL_SITES_LABEL.to_string(),
        SiteSelection::Site(name) => name.clone(),
    };
    // Clone so we can mutate state inside the combo closure.
    let sites = state.dataset.sites.clone();

    ComboBox::from_id_salt("site_select")
        .selected_text(&current_label)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.site == SiteSelection::All, ALL_SITES_LABEL)
                .clicked()
            {
                state.set_site(SiteSelection::All);
            }
            for site in &sites {
                let is_current = matches!(&state.site, SiteSelection::Site(s) if s == site);
                if ui.selectable_label(is_current, site).clicked() {
                    state.set_site(SiteSelection::Site(site.clone()));
                }
            }
        });
}

fn payload_sliders(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg)");

    let (bound_lo, bound_hi) = state.dataset.payload_bounds;
    let (mut low, mut high) = state.payload_range;

    let low_resp = ui.add(
        Slider::new(&mut low, bound_lo..=bound_hi)
            .text("Low")
            .step_by(1.0)
            .fixed_decimals(0),
    );
    let high_resp = ui.add(
        Slider::new(&mut high, bound_lo..=bound_hi)
            .text("High")
            .step_by(1.0)
            .fixed_decimals(0),
    );

    // Keep the pair ordered: the handle being dragged wins and pushes
    // the other one along.
    if low_resp.changed() && low > high {
        high = low;
    }
    if high_resp.changed() && high < low {
        low = high;
    }
    state.set_payload_range((low, high));

    payload_marks(ui, bound_lo, bound_hi);
}

/// Paint the fixed payload tick labels at their proportional positions
/// within the dataset bounds.  Marks outside the bounds are dropped.
fn payload_marks(ui: &mut Ui, bound_lo: f64, bound_hi: f64) {
    let span = bound_hi - bound_lo;
    if span <= 0.0 {
        return;
    }

    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 14.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let color = ui.visuals().weak_text_color();

    for mark in PAYLOAD_MARKS {
        if mark < bound_lo || mark > bound_hi {
            continue;
        }
        let t = ((mark - bound_lo) / span) as f32;
        let x = rect.left() + t * rect.width();
        painter.text(
            egui::pos2(x, rect.center().y),
            Align2::CENTER_CENTER,
            format!("{mark:.0}"),
            FontId::proportional(10.0),
            color,
        );
    }
}

fn booster_legend(ui: &mut Ui, state: &AppState, column: &str) {
    ui.strong(column);
    for (label, color) in state.booster_colors.legend_entries() {
        ui.label(RichText::new(label).color(color));
    }
}
