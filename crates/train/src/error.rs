//! Error types for the helios-train crate.

use helios_arimax::ArimaxError;
use helios_evaluate::EvaluateError;

/// Error type for all fallible operations in the helios-train crate.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    /// Returned when the split ratio is not a fraction in (0, 1).
    #[error("invalid split ratio {ratio}: must be a fraction strictly between 0 and 1")]
    InvalidSplitRatio {
        /// The offending ratio.
        ratio: f64,
    },

    /// Returned when the chronological split violates the size floors.
    #[error(
        "split too small: train={train_size} (min {min_train}), test={test_size} (min {min_test})"
    )]
    SplitTooSmall {
        /// Resulting training rows.
        train_size: usize,
        /// Resulting test rows.
        test_size: usize,
        /// Configured training floor.
        min_train: usize,
        /// Configured test floor.
        min_test: usize,
    },

    /// Estimation engine failure. The run is not registered.
    #[error("estimation failed: {0}")]
    Estimation(#[from] ArimaxError),

    /// Estimation exceeded its wall-clock budget. Treated exactly like an
    /// engine failure: the run is not registered.
    #[error("estimation exceeded the {limit_secs}s deadline")]
    EstimationTimeout {
        /// The configured wall-clock budget in seconds.
        limit_secs: u64,
    },

    /// Metric computation failure on the held-out window.
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluateError),
}
