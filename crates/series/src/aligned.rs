//! Year-intersection alignment of a target series and its exogenous driver.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AlignError;
use crate::series::ObservationSeries;

/// Inclusive range of matched years. Displays as "1965-2024".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// First matched year.
    pub start: i32,
    /// Last matched year.
    pub end: i32,
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Min/max/mean summary of one aligned series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl SeriesStats {
    fn from_values(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            min,
            max,
            mean: helios_stats::mean(values),
        }
    }
}

/// The inner join of a target and an exogenous [`ObservationSeries`] by
/// year, with rows missing in either series dropped.
///
/// Invariants: non-empty, years strictly increasing, at least the
/// configured minimum number of rows.
#[derive(Clone, Debug)]
pub struct AlignedDataset {
    years: Vec<i32>,
    target: Vec<f64>,
    exogenous: Vec<f64>,
    target_stats: SeriesStats,
    exog_stats: SeriesStats,
    year_range: YearRange,
}

impl AlignedDataset {
    /// Returns the matched years, strictly increasing.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the target values over the matched years.
    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Returns the exogenous values over the matched years.
    pub fn exogenous(&self) -> &[f64] {
        &self.exogenous
    }

    /// Returns the number of matched rows.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Always `false`; alignment fails before producing an empty dataset.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Returns min/max/mean of the target over the matched years.
    pub fn target_stats(&self) -> SeriesStats {
        self.target_stats
    }

    /// Returns min/max/mean of the exogenous series over the matched years.
    pub fn exog_stats(&self) -> SeriesStats {
        self.exog_stats
    }

    /// Returns the inclusive matched year range.
    pub fn year_range(&self) -> YearRange {
        self.year_range
    }
}

/// Aligns a target series with its exogenous driver by year intersection.
///
/// Pure transform: computes the inner join of the two series, drops rows
/// where either value is missing (`NaN`), and summarises the result. The
/// inputs are not modified.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`AlignError::Disjoint`] | no usable common years |
/// | [`AlignError::Insufficient`] | fewer than `min_years` matched rows |
pub fn align(
    target: &ObservationSeries,
    exogenous: &ObservationSeries,
    min_years: usize,
) -> Result<AlignedDataset, AlignError> {
    let mut years = Vec::new();
    let mut target_values = Vec::new();
    let mut exog_values = Vec::new();

    // Both year lists are strictly increasing, so a two-pointer merge
    // finds the intersection in one pass.
    let (ty, tv) = (target.years(), target.values());
    let (xy, xv) = (exogenous.years(), exogenous.values());
    let (mut i, mut j) = (0, 0);
    while i < ty.len() && j < xy.len() {
        match ty[i].cmp(&xy[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if !tv[i].is_nan() && !xv[j].is_nan() {
                    years.push(ty[i]);
                    target_values.push(tv[i]);
                    exog_values.push(xv[j]);
                }
                i += 1;
                j += 1;
            }
        }
    }

    if years.is_empty() {
        return Err(AlignError::Disjoint {
            target_name: target.name().to_string(),
            target_range: target.year_span(),
            exog_name: exogenous.name().to_string(),
            exog_range: exogenous.year_span(),
        });
    }

    let year_range = YearRange {
        start: years[0],
        end: *years.last().expect("years is non-empty"),
    };
    if years.len() < min_years {
        return Err(AlignError::Insufficient {
            matched: years.len(),
            matched_range: year_range.to_string(),
            min: min_years,
        });
    }

    debug!(
        matched = years.len(),
        range = %year_range,
        "aligned target and exogenous series"
    );

    let target_stats = SeriesStats::from_values(&target_values);
    let exog_stats = SeriesStats::from_values(&exog_values);
    Ok(AlignedDataset {
        years,
        target: target_values,
        exogenous: exog_values,
        target_stats,
        exog_stats,
        year_range,
    })
}
