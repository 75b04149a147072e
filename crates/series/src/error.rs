//! Error types for the helios-series crate.

/// Error type for all fallible operations in the helios-series crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a series is constructed with no observations.
    #[error("series '{name}' is empty")]
    EmptySeries {
        /// Name of the offending series.
        name: String,
    },

    /// Returned when years and values differ in length.
    #[error("series '{name}': {years} years but {values} values")]
    LengthMismatch {
        /// Name of the offending series.
        name: String,
        /// Number of year entries.
        years: usize,
        /// Number of value entries.
        values: usize,
    },

    /// Returned when the same year appears more than once.
    #[error("series '{name}' has duplicate year {year}")]
    DuplicateYear {
        /// Name of the offending series.
        name: String,
        /// The duplicated year.
        year: i32,
    },

    /// Returned when a value is +/- infinity. NaN is allowed and treated
    /// as a missing observation.
    #[error("series '{name}' has an infinite value at year {year}")]
    InfiniteValue {
        /// Name of the offending series.
        name: String,
        /// Year of the infinite value.
        year: i32,
    },
}

/// Error type for target/exogenous alignment.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AlignError {
    /// Returned when the two series share no usable years.
    #[error(
        "no overlapping years between '{target_name}' ({target_range}) and \
         '{exog_name}' ({exog_range})"
    )]
    Disjoint {
        /// Target series name.
        target_name: String,
        /// Target year range, e.g. "1965-1975".
        target_range: String,
        /// Exogenous series name.
        exog_name: String,
        /// Exogenous year range, e.g. "1990-2024".
        exog_range: String,
    },

    /// Returned when fewer matched years remain than the configured minimum.
    #[error("only {matched} matched years ({matched_range}), need at least {min}")]
    Insufficient {
        /// Number of matched years after dropping missing values.
        matched: usize,
        /// Matched year range, e.g. "1965-1980".
        matched_range: String,
        /// Minimum number of matched years required.
        min: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_series() {
        let e = SeriesError::EmptySeries {
            name: "energy".to_string(),
        };
        assert_eq!(e.to_string(), "series 'energy' is empty");
    }

    #[test]
    fn error_length_mismatch() {
        let e = SeriesError::LengthMismatch {
            name: "gdp".to_string(),
            years: 10,
            values: 9,
        };
        assert_eq!(e.to_string(), "series 'gdp': 10 years but 9 values");
    }

    #[test]
    fn error_duplicate_year() {
        let e = SeriesError::DuplicateYear {
            name: "energy".to_string(),
            year: 1999,
        };
        assert_eq!(e.to_string(), "series 'energy' has duplicate year 1999");
    }

    #[test]
    fn error_disjoint() {
        let e = AlignError::Disjoint {
            target_name: "energy".to_string(),
            target_range: "1965-1975".to_string(),
            exog_name: "gdp".to_string(),
            exog_range: "1990-2024".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "no overlapping years between 'energy' (1965-1975) and 'gdp' (1990-2024)"
        );
    }

    #[test]
    fn error_insufficient() {
        let e = AlignError::Insufficient {
            matched: 6,
            matched_range: "2000-2005".to_string(),
            min: 10,
        };
        assert_eq!(
            e.to_string(),
            "only 6 matched years (2000-2005), need at least 10"
        );
    }

    #[test]
    fn errors_are_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SeriesError>();
        assert_impl::<AlignError>();
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
        assert_impl::<AlignError>();
    }
}
