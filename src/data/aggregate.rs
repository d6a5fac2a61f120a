use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Site selection: every site, or exactly one
// ---------------------------------------------------------------------------

/// The site choice driving both charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    /// Whether a record at `site` passes this selection.
    pub fn admits(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

// ---------------------------------------------------------------------------
// Pie aggregation
// ---------------------------------------------------------------------------

/// Slice labels and counts for the success pie.
///
/// With `All` selected, one `(site, successes)` pair per distinct site,
/// sorted by site label; a site with zero successes still appears with
/// count 0. For a specific site it is always the fixed Success/Failure
/// pair, zeros preserved. An unknown site yields no pairs at all rather
/// than an error.
pub fn pie_aggregation(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<(String, u32)> {
    match site {
        SiteSelection::All => {
            let mut successes: BTreeMap<&str, u32> = BTreeMap::new();
            for rec in &dataset.records {
                let count = successes.entry(rec.site.as_str()).or_insert(0);
                if rec.outcome.is_success() {
                    *count += 1;
                }
            }
            successes
                .into_iter()
                .map(|(site, count)| (site.to_string(), count))
                .collect()
        }
        SiteSelection::Site(selected) => {
            if !dataset.sites.iter().any(|s| s == selected) {
                return Vec::new();
            }
            let mut success = 0u32;
            let mut failure = 0u32;
            for rec in dataset.records.iter().filter(|r| &r.site == selected) {
                match rec.outcome {
                    Outcome::Success => success += 1,
                    Outcome::Failure => failure += 1,
                }
            }
            vec![
                ("Success".to_string(), success),
                ("Failure".to_string(), failure),
            ]
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter point filter
// ---------------------------------------------------------------------------

/// Indices of records with payload mass inside `[low, high]` (inclusive),
/// restricted to the selected site. Records without a payload mass never
/// match, dataset order is preserved, and an inverted range simply matches
/// nothing.
pub fn scatter_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    low: f64,
    high: f64,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.admits(&rec.site))
        .filter(|(_, rec)| {
            rec.payload_mass
                .is_some_and(|mass| low <= mass && mass <= high)
        })
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{boosted_launches, record, three_launches};
    use crate::data::model::LaunchDataset;

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    #[test]
    fn all_sites_sum_successes_per_site() {
        let ds = three_launches();
        let pairs = pie_aggregation(&ds, &SiteSelection::All);
        assert_eq!(
            pairs,
            [("CCAFS".to_string(), 1), ("VAFB".to_string(), 1)]
        );
    }

    #[test]
    fn all_sites_counts_sum_to_total_successes() {
        let ds = boosted_launches();
        let total_successes = ds
            .records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count() as u32;
        let pairs = pie_aggregation(&ds, &SiteSelection::All);
        assert_eq!(pairs.iter().map(|(_, n)| n).sum::<u32>(), total_successes);
    }

    #[test]
    fn all_sites_keep_zero_success_sites() {
        let ds = LaunchDataset::from_records(
            vec![
                record("CCAFS", Some(100.0), 0, None),
                record("VAFB", Some(200.0), 1, None),
            ],
            None,
        );
        let pairs = pie_aggregation(&ds, &SiteSelection::All);
        assert_eq!(
            pairs,
            [("CCAFS".to_string(), 0), ("VAFB".to_string(), 1)]
        );
    }

    #[test]
    fn all_sites_pairs_sorted_by_label() {
        let ds = LaunchDataset::from_records(
            vec![
                record("VAFB", Some(1.0), 1, None),
                record("CCAFS", Some(2.0), 1, None),
                record("KSC", Some(3.0), 0, None),
            ],
            None,
        );
        let labels: Vec<String> = pie_aggregation(&ds, &SiteSelection::All)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, ["CCAFS", "KSC", "VAFB"]);
    }

    #[test]
    fn single_site_always_emits_the_fixed_pair() {
        let ds = three_launches();
        let pairs = pie_aggregation(&ds, &site("CCAFS"));
        assert_eq!(
            pairs,
            [("Success".to_string(), 1), ("Failure".to_string(), 1)]
        );
    }

    #[test]
    fn single_site_pair_sums_to_site_count() {
        let ds = boosted_launches();
        for name in &ds.sites {
            let pairs = pie_aggregation(&ds, &site(name));
            assert_eq!(pairs.len(), 2);
            assert_eq!(pairs[0].0, "Success");
            assert_eq!(pairs[1].0, "Failure");
            let site_total = ds.records.iter().filter(|r| &r.site == name).count() as u32;
            assert_eq!(pairs[0].1 + pairs[1].1, site_total);
        }
    }

    #[test]
    fn single_site_preserves_zero_counts() {
        let ds = LaunchDataset::from_records(
            vec![
                record("KSC", Some(100.0), 1, None),
                record("KSC", Some(200.0), 1, None),
            ],
            None,
        );
        let pairs = pie_aggregation(&ds, &site("KSC"));
        assert_eq!(
            pairs,
            [("Success".to_string(), 2), ("Failure".to_string(), 0)]
        );
    }

    #[test]
    fn unknown_site_yields_empty_aggregation() {
        let ds = three_launches();
        assert!(pie_aggregation(&ds, &site("Boca Chica")).is_empty());
    }

    #[test]
    fn scatter_respects_inclusive_bounds() {
        let ds = three_launches();
        let indices = scatter_indices(&ds, &SiteSelection::All, 500.0, 2000.0);
        assert_eq!(indices, [0, 2]);
        for &idx in &indices {
            let mass = ds.records[idx].payload_mass.expect("filtered record");
            assert!((500.0..=2000.0).contains(&mass));
        }
    }

    #[test]
    fn scatter_matches_range_scenario() {
        let ds = three_launches();
        let indices = scatter_indices(&ds, &SiteSelection::All, 0.0, 3000.0);
        assert_eq!(indices, [0, 2]);
    }

    #[test]
    fn scatter_restricts_to_selected_site() {
        let ds = boosted_launches();
        let indices = scatter_indices(&ds, &site("KSC"), 0.0, 10_000.0);
        assert_eq!(indices, [0, 1]);
        for &idx in &indices {
            assert_eq!(ds.records[idx].site, "KSC");
        }
    }

    #[test]
    fn scatter_excludes_missing_payloads() {
        let ds = boosted_launches();
        let indices = scatter_indices(&ds, &SiteSelection::All, 0.0, 10_000.0);
        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn scatter_preserves_dataset_order_and_is_idempotent() {
        let ds = boosted_launches();
        let first = scatter_indices(&ds, &SiteSelection::All, 1000.0, 6000.0);
        assert!(first.windows(2).all(|w| w[0] < w[1]));

        let refiltered: Vec<usize> = first
            .iter()
            .copied()
            .filter(|&idx| {
                ds.records[idx]
                    .payload_mass
                    .is_some_and(|m| (1000.0..=6000.0).contains(&m))
            })
            .collect();
        assert_eq!(first, refiltered);
    }

    #[test]
    fn scatter_inverted_range_matches_nothing() {
        let ds = three_launches();
        assert!(scatter_indices(&ds, &SiteSelection::All, 3000.0, 1000.0).is_empty());
    }

    #[test]
    fn scatter_unknown_site_matches_nothing() {
        let ds = three_launches();
        assert!(scatter_indices(&ds, &site("Boca Chica"), 0.0, 10_000.0).is_empty());
    }
}
