//! Fitted ARIMAX model results and forecasting.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::diff::{difference, difference_future, integrate_forecast};
use crate::error::ArimaxError;
use crate::order::Order;

/// A fitted ARIMAX(p,d,q) model produced by
/// [`ArimaxSpec::fit()`](crate::ArimaxSpec::fit).
///
/// Carries the regression coefficients, ARMA coefficients, innovation
/// variance, one-step residuals, log-likelihood, and the training data
/// levels needed to continue the series forward. Serializable, so a fit
/// doubles as the persisted model artifact: a deserialized fit produces
/// bit-identical forecasts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArimaxFit {
    order: Order,
    beta: Vec<f64>,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sigma2: f64,
    residuals: Vec<f64>,
    log_likelihood: f64,
    p_values: Option<Vec<f64>>,
    target: Vec<f64>,
    exog: Vec<f64>,
}

/// Point forecasts with symmetric confidence bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastBands {
    /// Point estimates, one per step.
    pub mean: Vec<f64>,
    /// Lower confidence bounds.
    pub lower: Vec<f64>,
    /// Upper confidence bounds.
    pub upper: Vec<f64>,
}

impl ArimaxFit {
    /// Creates a new `ArimaxFit` (crate-internal constructor).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        order: Order,
        beta: Vec<f64>,
        ar: Vec<f64>,
        ma: Vec<f64>,
        sigma2: f64,
        residuals: Vec<f64>,
        log_likelihood: f64,
        p_values: Option<Vec<f64>>,
        target: Vec<f64>,
        exog: Vec<f64>,
    ) -> Self {
        Self {
            order,
            beta,
            ar,
            ma,
            sigma2,
            residuals,
            log_likelihood,
            p_values,
            target,
            exog,
        }
    }

    /// Returns the (p, d, q) order of the fitted model.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Returns the regression coefficients `[intercept, slope]`.
    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    /// Returns the AR coefficients.
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients.
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the innovation variance.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the one-step-ahead prediction residuals (differenced scale).
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// All estimated parameters, ordered `[intercept, slope, ar.., ma..,
    /// sigma2]`.
    pub fn params(&self) -> Vec<f64> {
        let mut out = self.beta.clone();
        out.extend_from_slice(&self.ar);
        out.extend_from_slice(&self.ma);
        out.push(self.sigma2);
        out
    }

    /// Two-sided p-values for `[intercept, slope, ar.., ma..]`; `None`
    /// when the observed information matrix was singular.
    pub fn p_values(&self) -> Option<&[f64]> {
        self.p_values.as_deref()
    }

    /// Akaike Information Criterion: `2k - 2 log L` with
    /// `k = p + q + 2 + 1` (ARMA coefficients, regression coefficients,
    /// innovation variance). Lower is better.
    pub fn aic(&self) -> f64 {
        let k = (self.order.p + self.order.q + self.beta.len() + 1) as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    /// Number of training observations (level scale).
    pub fn n_obs(&self) -> usize {
        self.target.len()
    }

    /// Training exogenous levels, oldest first.
    pub fn exog_history(&self) -> &[f64] {
        &self.exog
    }

    /// Last observed target level.
    pub fn last_target(&self) -> f64 {
        *self.target.last().expect("fit retains its training data")
    }

    /// Last observed exogenous level.
    pub fn last_exog(&self) -> f64 {
        *self.exog.last().expect("fit retains its training data")
    }

    /// Point forecasts for `steps` periods given future exogenous levels.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArimaxError::LengthMismatch`] | `future_exog.len() != steps` |
    /// | [`ArimaxError::NonFiniteData`] | non-finite future exog |
    pub fn forecast(&self, steps: usize, future_exog: &[f64]) -> Result<Vec<f64>, ArimaxError> {
        Ok(self.forecast_diffed(steps, future_exog)?.1)
    }

    /// Point forecasts plus confidence bounds at level `1 - alpha`.
    ///
    /// Standard errors come from the psi-weight expansion of the full
    /// ARIMA lag polynomial, so the bounds are already on the level scale.
    /// Every returned step satisfies `lower <= mean <= upper`.
    ///
    /// # Errors
    ///
    /// As [`ArimaxFit::forecast`], plus
    /// [`ArimaxError::InvalidConfidence`] when `alpha` is outside (0, 1).
    pub fn get_forecast(
        &self,
        steps: usize,
        future_exog: &[f64],
        alpha: f64,
    ) -> Result<ForecastBands, ArimaxError> {
        if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
            return Err(ArimaxError::InvalidConfidence { alpha });
        }
        let (_, mean) = self.forecast_diffed(steps, future_exog)?;

        let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
        let z = normal.inverse_cdf(1.0 - alpha / 2.0);

        let psi = self.psi_weights(steps);
        let mut cumulative = 0.0;
        let mut lower = Vec::with_capacity(steps);
        let mut upper = Vec::with_capacity(steps);
        for (k, &point) in mean.iter().enumerate() {
            cumulative += psi[k] * psi[k];
            let se = (self.sigma2 * cumulative).sqrt();
            lower.push(point - z * se);
            upper.push(point + z * se);
        }

        Ok(ForecastBands { mean, lower, upper })
    }

    /// Shared forecast path: returns (differenced-scale, level-scale)
    /// point forecasts.
    fn forecast_diffed(
        &self,
        steps: usize,
        future_exog: &[f64],
    ) -> Result<(Vec<f64>, Vec<f64>), ArimaxError> {
        if future_exog.len() != steps {
            return Err(ArimaxError::LengthMismatch {
                target: steps,
                exog: future_exog.len(),
            });
        }
        if future_exog.iter().any(|v| !v.is_finite()) {
            return Err(ArimaxError::NonFiniteData);
        }
        if steps == 0 {
            return Ok((vec![], vec![]));
        }

        let d = self.order.d;
        let yd = difference(&self.target, d);
        let xd = difference(&self.exog, d);

        // Regression errors over the sample, then extended by the ARMA
        // recursion (future innovations are zero, past ones come from the
        // filter).
        let mut errors: Vec<f64> = yd
            .iter()
            .zip(xd.iter())
            .map(|(&y, &x)| y - self.beta[0] - self.beta[1] * x)
            .collect();
        let n = errors.len();
        for k in 0..steps {
            let t = n + k;
            let mut value = 0.0;
            for (i, &phi) in self.ar.iter().enumerate() {
                if t >= i + 1 {
                    value += phi * errors[t - 1 - i];
                }
            }
            for (j, &theta) in self.ma.iter().enumerate() {
                if t >= j + 1 && t - 1 - j < n {
                    value += theta * self.residuals[t - 1 - j];
                }
            }
            errors.push(value);
        }

        let xd_future = difference_future(&self.exog[self.exog.len() - d..], future_exog, d);
        let diffed: Vec<f64> = (0..steps)
            .map(|k| self.beta[0] + self.beta[1] * xd_future[k] + errors[n + k])
            .collect();
        let levels = integrate_forecast(&self.target, &diffed, d);
        Ok((diffed, levels))
    }

    /// First `steps` psi weights of the ARIMA lag polynomial
    /// `theta(B) / (phi(B) (1-B)^d)`.
    fn psi_weights(&self, steps: usize) -> Vec<f64> {
        // phi(B) (1-B)^d expanded: poly[0] = 1, AR-side coefficient of
        // B^i is -poly[i].
        let mut poly = vec![0.0; self.order.p + 1];
        poly[0] = 1.0;
        for (i, &phi) in self.ar.iter().enumerate() {
            poly[i + 1] = -phi;
        }
        for _ in 0..self.order.d {
            let mut next = vec![0.0; poly.len() + 1];
            for (i, &c) in poly.iter().enumerate() {
                next[i] += c;
                next[i + 1] -= c;
            }
            poly = next;
        }

        let degree = poly.len() - 1;
        let mut psi = vec![0.0; steps];
        for j in 0..steps {
            if j == 0 {
                psi[0] = 1.0;
                continue;
            }
            let mut value = if j <= self.order.q {
                self.ma[j - 1]
            } else {
                0.0
            };
            for i in 1..=degree.min(j) {
                value += -poly[i] * psi[j - i];
            }
            psi[j] = value;
        }
        psi
    }
}
