use crate::color::ColorMap;
use crate::data::aggregate::SiteSelection;
use crate::data::model::LaunchDataset;
use crate::figure::{pie_figure, scatter_figure, PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  The dataset is loaded
/// before the window opens, so it is always present.
pub struct AppState {
    pub dataset: LaunchDataset,

    /// Current site selection.
    pub site: SiteSelection,

    /// Current payload range, inclusive on both ends.
    pub payload_range: (f64, f64),

    /// Figures for the current selection (cached; rebuilt on change).
    pub pie: PieFigure,
    pub scatter: ScatterFigure,

    /// Colour per booster version, fixed for the dataset's lifetime.
    pub booster_colors: ColorMap,
}

impl AppState {
    /// Initial state: all sites, the full payload range of the dataset.
    pub fn new(dataset: LaunchDataset) -> Self {
        let site = SiteSelection::All;
        let payload_range = dataset.payload_bounds;
        let pie = pie_figure(&dataset, &site);
        let scatter = scatter_figure(&dataset, &site, payload_range);
        let booster_colors = ColorMap::new(&dataset.booster_values);

        Self {
            dataset,
            site,
            payload_range,
            pie,
            scatter,
            booster_colors,
        }
    }

    /// Switch the site selection and rebuild both figures.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.site == site {
            return;
        }
        self.site = site;
        self.refresh_figures();
    }

    /// Move the payload range and rebuild the scatter-side state.
    pub fn set_payload_range(&mut self, range: (f64, f64)) {
        if self.payload_range == range {
            return;
        }
        self.payload_range = range;
        self.refresh_figures();
    }

    fn refresh_figures(&mut self) {
        self.pie = pie_figure(&self.dataset, &self.site);
        self.scatter = scatter_figure(&self.dataset, &self.site, self.payload_range);
        log::debug!(
            "figures rebuilt: {} pie slices, {} scatter points",
            self.pie.slices.len(),
            self.scatter.point_count()
        );
    }

    /// Number of launches in the current scatter selection.
    pub fn selected_point_count(&self) -> usize {
        self.scatter.point_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::boosted_launches;

    #[test]
    fn new_state_starts_on_all_sites_with_full_range() {
        let state = AppState::new(boosted_launches());
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload_range, (1000.0, 6000.0));
        assert_eq!(state.pie.title, "Total Successful Launches by Site");
        assert_eq!(state.scatter.title, "Payload vs Outcome for all sites");
        assert_eq!(state.selected_point_count(), 4);
    }

    #[test]
    fn changing_site_rebuilds_both_figures() {
        let mut state = AppState::new(boosted_launches());
        state.set_site(SiteSelection::Site("KSC".to_string()));

        assert_eq!(state.pie.title, "Success vs. Failure for site: KSC");
        assert_eq!(
            state.pie.slices,
            [("Success".to_string(), 1), ("Failure".to_string(), 1)]
        );
        assert_eq!(state.scatter.title, "Payload vs Outcome for KSC");
        assert_eq!(state.selected_point_count(), 2);
    }

    #[test]
    fn narrowing_the_range_trims_the_scatter_but_not_the_pie() {
        let mut state = AppState::new(boosted_launches());
        let pie_before = state.pie.clone();

        state.set_payload_range((2000.0, 3000.0));
        assert_eq!(state.selected_point_count(), 2);
        assert_eq!(state.pie, pie_before);
    }

    #[test]
    fn setting_the_same_selection_changes_nothing() {
        let mut state = AppState::new(boosted_launches());
        let pie_before = state.pie.clone();
        let scatter_before = state.scatter.clone();

        state.set_site(SiteSelection::All);
        state.set_payload_range(state.payload_range);

        assert_eq!(state.pie, pie_before);
        assert_eq!(state.scatter, scatter_before);
    }
}
