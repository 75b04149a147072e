//! A named yearly observation series.

use crate::error::SeriesError;

/// An ordered sequence of (year, value) observations for one variable.
///
/// Years are unique and strictly increasing; construction sorts the input
/// by year. Values may be `NaN`, which marks a missing observation to be
/// dropped during alignment; infinite values are rejected outright.
#[derive(Clone, Debug)]
pub struct ObservationSeries {
    name: String,
    years: Vec<i32>,
    values: Vec<f64>,
}

impl ObservationSeries {
    /// Builds a series from parallel year/value vectors.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::EmptySeries`] | no observations |
    /// | [`SeriesError::LengthMismatch`] | `years.len() != values.len()` |
    /// | [`SeriesError::DuplicateYear`] | the same year appears twice |
    /// | [`SeriesError::InfiniteValue`] | a value is +/- infinity |
    pub fn new(
        name: impl Into<String>,
        years: Vec<i32>,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        if years.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                name,
                years: years.len(),
                values: values.len(),
            });
        }
        if years.is_empty() {
            return Err(SeriesError::EmptySeries { name });
        }
        for (&year, &value) in years.iter().zip(values.iter()) {
            if value.is_infinite() {
                return Err(SeriesError::InfiniteValue { name, year });
            }
        }

        let mut points: Vec<(i32, f64)> = years.into_iter().zip(values).collect();
        points.sort_by_key(|&(year, _)| year);
        for pair in points.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(SeriesError::DuplicateYear {
                    name,
                    year: pair[0].0,
                });
            }
        }

        let (years, values) = points.into_iter().unzip();
        Ok(Self {
            name,
            years,
            values,
        })
    }

    /// Returns the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the years, strictly increasing.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the values, parallel to [`ObservationSeries::years()`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of observations (missing ones included).
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns `true` if the series has no observations. Always `false`
    /// for a constructed series, kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Returns "first-last" over the observed years, e.g. "1965-2024".
    pub fn year_span(&self) -> String {
        format!(
            "{}-{}",
            self.years.first().copied().unwrap_or(0),
            self.years.last().copied().unwrap_or(0)
        )
    }
}
