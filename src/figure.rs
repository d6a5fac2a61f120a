use std::collections::BTreeMap;

use crate::data::aggregate::{pie_aggregation, scatter_indices, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Figure descriptions
// ---------------------------------------------------------------------------

pub const X_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const Y_AXIS_LABEL: &str = "Launch Outcome (class)";

/// The outcome axis only ever shows the two classes.
pub const Y_TICKS: [f64; 2] = [0.0, 1.0];

/// A pie chart: a title and one (label, count) slice per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<(String, u32)>,
}

impl PieFigure {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|(_, count)| u64::from(*count)).sum()
    }
}

/// One scatter series: its points, plus the legend label when the
/// dataset carries a booster column.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: Option<String>,
    pub points: Vec<[f64; 2]>,
}

/// A payload-vs-outcome scatter plot, one series per booster version.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_ticks: [f64; 2],
    /// The column the series are coloured by, if any.
    pub color_column: Option<String>,
    pub series: Vec<ScatterSeries>,
}

impl ScatterFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Figure construction
// ---------------------------------------------------------------------------

/// Build the success pie for the current site selection.
///
/// With all sites selected the slices are successful launches per site;
/// with one site selected they are that site's success/failure split.
pub fn pie_figure(dataset: &LaunchDataset, site: &SiteSelection) -> PieFigure {
    let title = match site {
        SiteSelection::All => "Total Successful Launches by Site".to_string(),
        SiteSelection::Site(name) => format!("Success vs. Failure for site: {name}"),
    };

    PieFigure {
        title,
        slices: pie_aggregation(dataset, site),
    }
}

/// Build the payload-vs-outcome scatter for the current site selection
/// and payload range.  Records are grouped into one series per booster
/// version when the dataset carries a booster column.
pub fn scatter_figure(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    payload_range: (f64, f64),
) -> ScatterFigure {
    let title = match site {
        SiteSelection::All => "Payload vs Outcome for all sites".to_string(),
        SiteSelection::Site(name) => format!("Payload vs Outcome for {name}"),
    };

    let (low, high) = payload_range;
    let indices = scatter_indices(dataset, site, low, high);

    let mut series = Vec::new();
    if dataset.booster_column.is_some() {
        // One series per booster version, plus a trailing unlabelled
        // series for records whose booster cell was empty.
        let mut grouped: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        let mut ungrouped: Vec<[f64; 2]> = Vec::new();
        for idx in indices {
            let rec = &dataset.records[idx];
            let Some(mass) = rec.payload_mass else { continue };
            let point = [mass, rec.outcome.class()];
            match &rec.booster {
                Some(booster) => grouped.entry(booster).or_default().push(point),
                None => ungrouped.push(point),
            }
        }
        for (label, points) in grouped {
            series.push(ScatterSeries {
                label: Some(label.to_string()),
                points,
            });
        }
        if !ungrouped.is_empty() {
            series.push(ScatterSeries {
                label: None,
                points: ungrouped,
            });
        }
    } else {
        let points: Vec<[f64; 2]> = indices
            .into_iter()
            .filter_map(|idx| {
                let rec = &dataset.records[idx];
                rec.payload_mass.map(|mass| [mass, rec.outcome.class()])
            })
            .collect();
        if !points.is_empty() {
            series.push(ScatterSeries {
                label: None,
                points,
            });
        }
    }

    ScatterFigure {
        title,
        x_label: X_AXIS_LABEL,
        y_label: Y_AXIS_LABEL,
        y_ticks: Y_TICKS,
        color_column: dataset.booster_column.clone(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{boosted_launches, three_launches};

    #[test]
    fn pie_title_switches_with_the_selection() {
        let dataset = three_launches();
        let all = pie_figure(&dataset, &SiteSelection::All);
        assert_eq!(all.title, "Total Successful Launches by Site");

        let one = pie_figure(&dataset, &SiteSelection::Site("VAFB".to_string()));
        assert_eq!(one.title, "Success vs. Failure for site: VAFB");
        assert_eq!(one.slices, [("Success".to_string(), 1), ("Failure".to_string(), 0)]);
        assert_eq!(one.total(), 1);
    }

    #[test]
    fn scatter_titles_and_axes_are_fixed() {
        let dataset = three_launches();
        let all = scatter_figure(&dataset, &SiteSelection::All, (0.0, 10_000.0));
        assert_eq!(all.title, "Payload vs Outcome for all sites");
        assert_eq!(all.x_label, "Payload Mass (kg)");
        assert_eq!(all.y_label, "Launch Outcome (class)");
        assert_eq!(all.y_ticks, [0.0, 1.0]);

        let one = scatter_figure(
            &dataset,
            &SiteSelection::Site("CCAFS".to_string()),
            (0.0, 10_000.0),
        );
        assert_eq!(one.title, "Payload vs Outcome for CCAFS");
    }

    #[test]
    fn scatter_groups_series_by_booster_in_label_order() {
        let dataset = boosted_launches();
        let fig = scatter_figure(&dataset, &SiteSelection::All, (0.0, 10_000.0));

        assert_eq!(fig.color_column.as_deref(), Some("Booster Version Category"));
        let labels: Vec<_> = fig.series.iter().map(|s| s.label.clone()).collect();
        assert_eq!(
            labels,
            [Some("B4".to_string()), Some("B5".to_string()), Some("FT".to_string())]
        );
        // KSC 1000/FT, KSC 2500/B4, CCAFS 3000/FT, CCAFS 6000/B5; the
        // fifth record has no payload and is excluded.
        assert_eq!(fig.point_count(), 4);
        let ft = fig.series.iter().find(|s| s.label.as_deref() == Some("FT")).unwrap();
        assert_eq!(ft.points, [[1000.0, 1.0], [3000.0, 1.0]]);
    }

    #[test]
    fn scatter_without_booster_column_is_one_unlabelled_series() {
        let dataset = three_launches();
        let fig = scatter_figure(&dataset, &SiteSelection::All, (0.0, 10_000.0));
        assert_eq!(fig.color_column, None);
        assert_eq!(fig.series.len(), 1);
        assert_eq!(fig.series[0].label, None);
        assert_eq!(fig.series[0].points.len(), 3);
    }

    #[test]
    fn scatter_puts_unboosted_records_in_a_trailing_series() {
        let mut dataset = boosted_launches();
        dataset.records[4].payload_mass = Some(4200.0);
        dataset.records[4].booster = None;
        let fig = scatter_figure(&dataset, &SiteSelection::All, (0.0, 10_000.0));

        let last = fig.series.last().unwrap();
        assert_eq!(last.label, None);
        assert_eq!(last.points, [[4200.0, 0.0]]);
        assert_eq!(fig.point_count(), 5);
    }

    #[test]
    fn scatter_respects_site_and_range() {
        let dataset = boosted_launches();
        let fig = scatter_figure(
            &dataset,
            &SiteSelection::Site("KSC".to_string()),
            (0.0, 2000.0),
        );
        assert_eq!(fig.point_count(), 1);
        assert_eq!(fig.series[0].points, [[1000.0, 1.0]]);

        let none = scatter_figure(
            &dataset,
            &SiteSelection::Site("no-such-site".to_string()),
            (0.0, 10_000.0),
        );
        assert_eq!(none.point_count(), 0);
        assert!(none.series.is_empty());
    }
}
