//! ARIMAX model specification (unfitted).

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::diff::difference;
use crate::error::ArimaxError;
use crate::fit::ArimaxFit;
use crate::optimizer;
use crate::order::Order;
use crate::regression;

/// An unfitted ARIMAX(p,d,q) specification with one exogenous regressor.
///
/// Entry point of the typestate workflow: create a spec with
/// [`ArimaxSpec::new()`], optionally relax the stationarity/invertibility
/// constraints, then call [`ArimaxSpec::fit()`] to obtain an
/// [`ArimaxFit`].
///
/// ```ignore
/// let fit = ArimaxSpec::new(Order::new(1, 1, 1))
///     .relax_constraints(true)
///     .fit(&energy, &gdp)?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArimaxSpec {
    order: Order,
    relaxed: bool,
}

impl ArimaxSpec {
    /// Creates a new specification with strict constraints.
    pub fn new(order: Order) -> Self {
        Self {
            order,
            relaxed: false,
        }
    }

    /// Controls the stationarity/invertibility constraints.
    ///
    /// When relaxed, the optimizer searches raw coefficient space and the
    /// filter tolerates non-stationary candidates via a diffuse
    /// initialization. This avoids spurious fit failures on short yearly
    /// samples at the cost of admitting explosive processes.
    pub fn relax_constraints(mut self, relaxed: bool) -> Self {
        self.relaxed = relaxed;
        self
    }

    /// Returns the order triple.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Returns whether constraints are relaxed.
    pub fn is_relaxed(&self) -> bool {
        self.relaxed
    }

    /// Fits the specification to a target series and its exogenous driver.
    ///
    /// The model is regression-with-ARMA-errors: both series are
    /// differenced `d` times, the differenced target is regressed on an
    /// intercept and the differenced driver, and an ARMA(p,q) process is
    /// estimated on the regression errors by exact Gaussian maximum
    /// likelihood.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaxError::EmptyData`] | either series is empty |
    /// | [`ArimaxError::LengthMismatch`] | series lengths differ |
    /// | [`ArimaxError::NonFiniteData`] | any NaN or infinity |
    /// | [`ArimaxError::InsufficientData`] | too few rows for the order |
    /// | [`ArimaxError::ConstantData`] | differenced target has no variance |
    /// | [`ArimaxError::OptimizationFailed`] | the optimizer does not converge |
    /// | [`ArimaxError::FilterDiverged`] | degenerate filter state |
    pub fn fit(&self, target: &[f64], exog: &[f64]) -> Result<ArimaxFit, ArimaxError> {
        let Order { p, d, q } = self.order;

        if target.is_empty() || exog.is_empty() {
            return Err(ArimaxError::EmptyData);
        }
        if target.len() != exog.len() {
            return Err(ArimaxError::LengthMismatch {
                target: target.len(),
                exog: exog.len(),
            });
        }
        if target
            .iter()
            .chain(exog.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ArimaxError::NonFiniteData);
        }
        let min_diffed = p.max(q + 1).max(1) + 2;
        if target.len() < d + min_diffed {
            return Err(ArimaxError::InsufficientData {
                n: target.len(),
                min: d + min_diffed,
            });
        }

        let yd = difference(target, d);
        let range = yd.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            - yd.iter().copied().fold(f64::INFINITY, f64::min);
        if range.abs() < f64::EPSILON {
            return Err(ArimaxError::ConstantData);
        }
        let xd = difference(exog, d);

        let ols = regression::fit_intercept_slope(&yd, &xd);
        let error_var = {
            let n = ols.residuals.len() as f64;
            let m = ols.residuals.iter().sum::<f64>() / n;
            ols.residuals.iter().map(|e| (e - m) * (e - m)).sum::<f64>() / n
        };
        if error_var < 1e-12 {
            return Err(ArimaxError::ConstantData);
        }

        let arma = optimizer::estimate(p, q, &ols.residuals, self.relaxed)?;
        let p_values = assemble_p_values(&ols, &arma);

        debug!(
            order = %self.order,
            n = target.len(),
            log_likelihood = arma.log_likelihood,
            "fitted ARIMAX model"
        );

        Ok(ArimaxFit::new(
            self.order,
            ols.beta.to_vec(),
            arma.ar,
            arma.ma,
            arma.sigma2,
            arma.residuals,
            arma.log_likelihood,
            p_values,
            target.to_vec(),
            exog.to_vec(),
        ))
    }
}

/// Joins regression and ARMA p-values into one vector ordered as
/// `[intercept, slope, ar.., ma..]`. `None` when either side could not be
/// computed.
fn assemble_p_values(
    ols: &regression::Ols,
    arma: &optimizer::ArmaEstimate,
) -> Option<Vec<f64>> {
    let std_errors = ols.std_errors?;
    let arma_p = arma.p_values.as_ref()?;
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    let mut out = Vec::with_capacity(2 + arma_p.len());
    for (coef, se) in ols.beta.iter().zip(std_errors.iter()) {
        if !(se.is_finite() && *se > 0.0) {
            return None;
        }
        let z = (coef / se).abs();
        out.push(2.0 * (1.0 - normal.cdf(z)));
    }
    out.extend_from_slice(arma_p);
    Some(out)
}
