//! Held-out forecast accuracy metrics.

use serde::{Deserialize, Serialize};

use crate::error::EvaluateError;

/// Accuracy of test-set forecasts against the held-out actuals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean absolute percentage error, in percent. Rows with a zero
    /// actual are excluded from the mean; 0.0 when no rows remain.
    pub mape: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Coefficient of determination, `1 - SS_res / SS_tot`; 0.0 when the
    /// actuals have no variance.
    pub r2: f64,
}

/// Computes accuracy metrics for a held-out window.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EvaluateError::EmptyInput`] | either slice is empty |
/// | [`EvaluateError::LengthMismatch`] | slice lengths differ |
/// | [`EvaluateError::NonFiniteInput`] | any NaN or infinity |
pub fn accuracy(actual: &[f64], predicted: &[f64]) -> Result<Metrics, EvaluateError> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(EvaluateError::EmptyInput);
    }
    if actual.len() != predicted.len() {
        return Err(EvaluateError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual
        .iter()
        .chain(predicted.iter())
        .any(|v| !v.is_finite())
    {
        return Err(EvaluateError::NonFiniteInput);
    }

    let n = actual.len() as f64;

    let mae = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt();

    // Never divide by a zero actual.
    let pct: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();
    let mape = if pct.is_empty() {
        0.0
    } else {
        pct.iter().sum::<f64>() / pct.len() as f64 * 100.0
    };

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let r2 = if ss_tot <= 1e-300 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(Metrics {
        mape,
        rmse,
        mae,
        r2,
    })
}
