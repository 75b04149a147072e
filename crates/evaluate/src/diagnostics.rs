//! Residual diagnostics: white-noise and normality checks.
//!
//! Both tests are advisory. A model that fails them is still registrable;
//! the verdicts ride along on the model record for a human (or a policy)
//! to weigh at promotion time.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::EvaluateError;

/// Significance level shared by both residual tests.
const PASS_LEVEL: f64 = 0.05;

/// Residual summary plus white-noise and normality verdicts.
///
/// The p-values (and their pass flags) are `None` when the residual
/// sample is too short for the test, which is reported as "not testable"
/// rather than as a pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResidualDiagnostics {
    /// Ljung-Box p-value; high means no evidence of leftover
    /// autocorrelation.
    pub ljung_box_pvalue: Option<f64>,
    /// `Some(true)` iff `ljung_box_pvalue > 0.05`.
    pub ljung_box_pass: Option<bool>,
    /// Jarque-Bera p-value; high means no evidence against normality.
    pub jarque_bera_pvalue: Option<f64>,
    /// `Some(true)` iff `jarque_bera_pvalue > 0.05`.
    pub jarque_bera_pass: Option<bool>,
    pub residual_mean: f64,
    pub residual_std: f64,
    pub residual_min: f64,
    pub residual_max: f64,
}

/// Runs the residual diagnostics.
///
/// `lags` sets the Ljung-Box depth; when `None` it defaults to
/// `min(10, n / 5)`, floored at 1.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EvaluateError::EmptyInput`] | `residuals` is empty |
/// | [`EvaluateError::NonFiniteInput`] | any NaN or infinity |
pub fn diagnostics(
    residuals: &[f64],
    lags: Option<usize>,
) -> Result<ResidualDiagnostics, EvaluateError> {
    if residuals.is_empty() {
        return Err(EvaluateError::EmptyInput);
    }
    if residuals.iter().any(|v| !v.is_finite()) {
        return Err(EvaluateError::NonFiniteInput);
    }

    let lags = lags.unwrap_or_else(|| (residuals.len() / 5).clamp(1, 10));
    let ljung_box_pvalue = ljung_box(residuals, lags);
    let jarque_bera_pvalue = jarque_bera(residuals);

    Ok(ResidualDiagnostics {
        ljung_box_pvalue,
        ljung_box_pass: ljung_box_pvalue.map(|p| p > PASS_LEVEL),
        jarque_bera_pvalue,
        jarque_bera_pass: jarque_bera_pvalue.map(|p| p > PASS_LEVEL),
        residual_mean: helios_stats::mean(residuals),
        residual_std: helios_stats::sd(residuals),
        residual_min: residuals.iter().copied().fold(f64::INFINITY, f64::min),
        residual_max: residuals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

/// Ljung-Box portmanteau test at depth `lags`:
/// `Q = n (n+2) sum_k r_k^2 / (n-k)`, chi-squared with `lags` degrees of
/// freedom under the white-noise null.
fn ljung_box(residuals: &[f64], lags: usize) -> Option<f64> {
    let n = residuals.len();
    if lags == 0 || n <= lags + 1 {
        return None;
    }
    let acf = helios_stats::autocorrelations(residuals, lags);
    if acf.len() != lags {
        return None;
    }
    let nf = n as f64;
    let q = nf
        * (nf + 2.0)
        * acf
            .iter()
            .enumerate()
            .map(|(i, r)| r * r / (nf - (i + 1) as f64))
            .sum::<f64>();
    let chi2 = ChiSquared::new(lags as f64).ok()?;
    Some(1.0 - chi2.cdf(q))
}

/// Jarque-Bera normality test:
/// `JB = n/6 (S^2 + K^2/4)` with skewness `S` and excess kurtosis `K`,
/// chi-squared with 2 degrees of freedom under the normal null.
fn jarque_bera(residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 8 {
        return None;
    }
    let s = helios_stats::skewness(residuals)?;
    let k = helios_stats::excess_kurtosis(residuals)?;
    let jb = n as f64 / 6.0 * (s * s + k * k / 4.0);
    let chi2 = ChiSquared::new(2.0).ok()?;
    Some(1.0 - chi2.cdf(jb))
}
