use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the binary result of a launch
// ---------------------------------------------------------------------------

/// Raised when the `class` column holds something other than 0 or 1.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid launch class {0} (expected 0 or 1)")]
pub struct InvalidOutcome(pub i64);

/// Launch outcome, decoded from the 0/1 `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Failure,
    Success,
}

impl TryFrom<i64> for Outcome {
    type Error = InvalidOutcome;

    fn try_from(class: i64) -> Result<Self, InvalidOutcome> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(InvalidOutcome(other)),
        }
    }
}

impl Outcome {
    /// The numeric class value, used as the scatter y coordinate.
    pub fn class(self) -> f64 {
        match self {
            Outcome::Failure => 0.0,
            Outcome::Success => 1.0,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Launch site name, never empty in well-formed data.
    pub site: String,
    /// Payload mass in kg. Missing or non-finite source cells load as `None`.
    pub payload_mass: Option<f64>,
    pub outcome: Outcome,
    /// Value of the booster column picked at load time, if the file has one.
    pub booster: Option<String>,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full launch table plus data derived once at construction.
///
/// The dataset is immutable for the process lifetime; everything the UI
/// needs repeatedly (site list, payload bounds, booster values) is computed
/// here rather than re-derived per frame.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct sites in first-seen order. Drives the site selector.
    pub sites: Vec<String>,
    /// (min, max) over present payload masses; (0, 0) when none are present.
    pub payload_bounds: (f64, f64),
    /// Header the loader picked for booster grouping. `None` disables the
    /// colour grouping entirely.
    pub booster_column: Option<String>,
    /// Sorted distinct booster values across the whole dataset, so colour
    /// assignment stays stable no matter how the view is filtered.
    pub booster_values: Vec<String>,
}

impl LaunchDataset {
    /// Build the derived indices from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>, booster_column: Option<String>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut boosters: BTreeSet<String> = BTreeSet::new();
        let mut bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.iter().any(|s| s == &rec.site) {
                sites.push(rec.site.clone());
            }
            if let Some(booster) = &rec.booster {
                boosters.insert(booster.clone());
            }
            if let Some(mass) = rec.payload_mass {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(mass), hi.max(mass)),
                    None => (mass, mass),
                });
            }
        }

        LaunchDataset {
            records,
            sites,
            payload_bounds: bounds.unwrap_or((0.0, 0.0)),
            booster_column,
            booster_values: boosters.into_iter().collect(),
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Test fixtures shared across the data layer
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn outcome_decodes_zero_and_one() {
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(1), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(2), Err(InvalidOutcome(2)));
        assert_eq!(Outcome::try_from(-1), Err(InvalidOutcome(-1)));
    }

    #[test]
    fn outcome_exposes_class_and_labels() {
        assert_eq!(Outcome::Failure.class(), 0.0);
        assert_eq!(Outcome::Success.class(), 1.0);
        assert_eq!(Outcome::Success.to_string(), "Success");
        assert_eq!(Outcome::Failure.to_string(), "Failure");
        assert!(Outcome::Success.is_success());
        assert!(!Outcome::Failure.is_success());
    }

    #[test]
    fn sites_keep_first_seen_order() {
        let ds = LaunchDataset::from_records(
            vec![
                record("VAFB", Some(1.0), 1, None),
                record("CCAFS", Some(2.0), 0, None),
                record("VAFB", Some(3.0), 1, None),
                record("KSC", Some(4.0), 1, None),
            ],
            None,
        );
        assert_eq!(ds.sites, ["VAFB", "CCAFS", "KSC"]);
    }

    #[test]
    fn payload_bounds_ignore_missing_masses() {
        let ds = LaunchDataset::from_records(
            vec![
                record("A", Some(4000.0), 1, None),
                record("A", None, 0, None),
                record("B", Some(500.0), 1, None),
            ],
            None,
        );
        assert_eq!(ds.payload_bounds, (500.0, 4000.0));
    }

    #[test]
    fn payload_bounds_default_to_zero_without_masses() {
        let ds = LaunchDataset::from_records(vec![record("A", None, 1, None)], None);
        assert_eq!(ds.payload_bounds, (0.0, 0.0));

        let single = LaunchDataset::from_records(vec![record("A", Some(750.0), 1, None)], None);
        assert_eq!(single.payload_bounds, (750.0, 750.0));
    }

    #[test]
    fn booster_values_are_sorted_and_distinct() {
        let ds = super::fixtures::boosted_launches();
        assert_eq!(ds.booster_values, ["B4", "B5", "FT"]);
        assert_eq!(
            ds.booster_column.as_deref(),
            Some("Booster Version Category")
        );
    }

    #[test]
    fn len_and_is_empty_track_records() {
        let ds = super::fixtures::three_launches();
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());

        let empty = LaunchDataset::from_records(Vec::new(), None);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert!(empty.sites.is_empty());
    }
}
