//! Error types for the helios-arimax crate.

/// Error type for all fallible operations in the helios-arimax crate.
///
/// Covers input validation, numerical issues in the Kalman filter, and
/// optimizer failures during ARIMAX model fitting and forecasting.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArimaxError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when target and exogenous series differ in length.
    #[error("length mismatch: target has {target} observations, exogenous has {exog}")]
    LengthMismatch {
        /// Number of target observations.
        target: usize,
        /// Number of exogenous observations.
        exog: usize,
    },

    /// Returned when the data has fewer observations than the order needs.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the differenced target has (near-)zero variance.
    #[error("differenced target is constant (zero variance)")]
    ConstantData,

    /// Returned when the likelihood optimizer fails to converge.
    #[error("optimisation failed to converge")]
    OptimizationFailed,

    /// Returned when the Kalman filter produces a degenerate prediction
    /// variance.
    #[error("state-space filter diverged")]
    FilterDiverged,

    /// Returned when a forecast confidence level is outside (0, 1).
    #[error("invalid confidence alpha: {alpha} (must be in (0, 1))")]
    InvalidConfidence {
        /// The offending alpha.
        alpha: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        assert_eq!(ArimaxError::EmptyData.to_string(), "input data is empty");
    }

    #[test]
    fn error_length_mismatch() {
        let e = ArimaxError::LengthMismatch {
            target: 50,
            exog: 49,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch: target has 50 observations, exogenous has 49"
        );
    }

    #[test]
    fn error_insufficient_data() {
        let e = ArimaxError::InsufficientData { n: 5, min: 10 };
        assert_eq!(
            e.to_string(),
            "insufficient data: got 5 observations, need at least 10"
        );
    }

    #[test]
    fn error_non_finite_data() {
        assert_eq!(
            ArimaxError::NonFiniteData.to_string(),
            "input data contains non-finite values"
        );
    }

    #[test]
    fn error_constant_data() {
        assert_eq!(
            ArimaxError::ConstantData.to_string(),
            "differenced target is constant (zero variance)"
        );
    }

    #[test]
    fn error_optimization_failed() {
        assert_eq!(
            ArimaxError::OptimizationFailed.to_string(),
            "optimisation failed to converge"
        );
    }

    #[test]
    fn error_invalid_confidence() {
        let e = ArimaxError::InvalidConfidence { alpha: 1.5 };
        assert_eq!(
            e.to_string(),
            "invalid confidence alpha: 1.5 (must be in (0, 1))"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ArimaxError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ArimaxError>();
    }
}
