//! The result of one training run.

use serde::{Deserialize, Serialize};

use helios_arimax::{ArimaxFit, Order};
use helios_evaluate::{Metrics, ResidualDiagnostics};
use helios_series::{SeriesStats, YearRange};

/// How the aligned dataset was split, chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Rows in the training window.
    pub train_size: usize,
    /// Rows in the held-out window.
    pub test_size: usize,
    /// The requested ratio.
    pub split_ratio: f64,
}

/// Summary of the aligned dataset the run was trained on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Total matched rows.
    pub rows: usize,
    /// Inclusive matched year range.
    pub year_range: YearRange,
    /// Target min/max/mean.
    pub target: SeriesStats,
    /// Exogenous min/max/mean.
    pub exogenous: SeriesStats,
}

/// One complete training run: evaluation results on the held-out window
/// plus the full-sample refit that becomes the served artifact if this
/// run is promoted.
#[derive(Clone, Debug)]
pub struct TrainingRun {
    /// The fitted order.
    pub order: Order,
    /// Split bookkeeping.
    pub split: SplitSummary,
    /// Held-out accuracy of the train-window fit.
    pub metrics: Metrics,
    /// Residual diagnostics of the train-window fit (advisory).
    pub diagnostics: ResidualDiagnostics,
    /// Dataset summary.
    pub dataset: DatasetSummary,
    /// All matched years, oldest first.
    pub years: Vec<i32>,
    /// Years of the held-out window.
    pub test_years: Vec<i32>,
    /// Held-out actuals.
    pub test_actual: Vec<f64>,
    /// Forecasts of the held-out window from the train-window fit.
    pub test_predicted: Vec<f64>,
    /// Full-sample refit at the same order — the artifact-to-be.
    pub fit: ArimaxFit,
}
