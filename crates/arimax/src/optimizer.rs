//! Nelder-Mead maximum-likelihood estimation of the ARMA error process.
//!
//! Wraps the `argmin` crate to minimize the negative concentrated
//! log-likelihood. In constrained mode the parameters pass through the
//! PACF transform so every candidate is stationary and invertible; in
//! relaxed mode they are used as raw coefficients and the filter falls
//! back to a diffuse initialization outside the stationary region.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use ndarray::Array2;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ArimaxError;
use crate::kalman;
use crate::params;
use crate::small_linalg;

const MAX_ITERS: u64 = 1000;
const SD_TOLERANCE: f64 = 1e-8;

/// Estimated ARMA error process.
pub(crate) struct ArmaEstimate {
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
    pub(crate) sigma2: f64,
    pub(crate) residuals: Vec<f64>,
    pub(crate) log_likelihood: f64,
    /// Two-sided normal-approximation p-values for the AR then MA
    /// coefficients; `None` when the information matrix is singular.
    pub(crate) p_values: Option<Vec<f64>>,
}

/// Fits an ARMA(p,q) process to the regression error series.
pub(crate) fn estimate(
    p: usize,
    q: usize,
    errors: &[f64],
    relaxed: bool,
) -> Result<ArmaEstimate, ArimaxError> {
    // ARMA(0,0): the concentrated optimum is available in closed form.
    if p == 0 && q == 0 {
        let out = kalman::filter_full(&[], &[], errors)?;
        return Ok(ArmaEstimate {
            ar: vec![],
            ma: vec![],
            sigma2: out.sigma2,
            residuals: out.residuals,
            log_likelihood: out.log_likelihood,
            p_values: Some(vec![]),
        });
    }

    let dim = p + q;
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(vec![0.0; dim]);
    for i in 0..dim {
        let mut vertex = vec![0.0; dim];
        vertex[i] = 0.5;
        simplex.push(vertex);
    }

    let cost = ArmaCost {
        errors,
        p,
        relaxed,
    };

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(SD_TOLERANCE)
        .map_err(|_| ArimaxError::OptimizationFailed)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .map_err(|_| ArimaxError::OptimizationFailed)?;

    let state = result.state();
    let best = state
        .best_param
        .as_ref()
        .ok_or(ArimaxError::OptimizationFailed)?;
    if !state.best_cost.is_finite() || state.best_cost == f64::MAX {
        return Err(ArimaxError::OptimizationFailed);
    }

    let (ar, ma) = to_coefficients(best, p, relaxed);
    let out = kalman::filter_full(&ar, &ma, errors)?;
    let p_values = coefficient_p_values(&ar, &ma, errors);

    Ok(ArmaEstimate {
        ar,
        ma,
        sigma2: out.sigma2,
        residuals: out.residuals,
        log_likelihood: out.log_likelihood,
        p_values,
    })
}

fn to_coefficients(raw: &[f64], p: usize, relaxed: bool) -> (Vec<f64>, Vec<f64>) {
    let (ar_raw, ma_raw) = raw.split_at(p);
    if relaxed {
        (ar_raw.to_vec(), ma_raw.to_vec())
    } else {
        (
            params::pacf_to_coeffs(ar_raw),
            params::pacf_to_coeffs(ma_raw),
        )
    }
}

/// Cost function for argmin: negative concentrated log-likelihood.
struct ArmaCost<'a> {
    errors: &'a [f64],
    p: usize,
    relaxed: bool,
}

impl CostFunction for ArmaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, raw: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (ar, ma) = to_coefficients(raw, self.p, self.relaxed);
        match kalman::concentrated_loglik(&ar, &ma, self.errors) {
            Ok(loglik) if loglik.is_finite() => Ok(-loglik),
            _ => Ok(f64::MAX),
        }
    }
}

/// Observed-information p-values in coefficient space.
///
/// Builds a finite-difference Hessian of the negative log-likelihood at
/// the optimum, inverts it for the asymptotic covariance, and converts
/// coefficient / standard-error ratios to two-sided normal p-values.
fn coefficient_p_values(ar: &[f64], ma: &[f64], errors: &[f64]) -> Option<Vec<f64>> {
    let coefs: Vec<f64> = ar.iter().chain(ma.iter()).copied().collect();
    let dim = coefs.len();
    if dim == 0 {
        return Some(vec![]);
    }

    let neg_loglik = |theta: &[f64]| -> Option<f64> {
        let (a, m) = theta.split_at(ar.len());
        kalman::concentrated_loglik(a, m, errors)
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| -v)
    };

    let f0 = neg_loglik(&coefs)?;
    let steps: Vec<f64> = coefs.iter().map(|c| 1e-4_f64.max(1e-4 * c.abs())).collect();

    let mut hessian = Array2::zeros((dim, dim));
    for i in 0..dim {
        for j in i..dim {
            let value = if i == j {
                let mut plus = coefs.clone();
                plus[i] += steps[i];
                let mut minus = coefs.clone();
                minus[i] -= steps[i];
                (neg_loglik(&plus)? - 2.0 * f0 + neg_loglik(&minus)?) / (steps[i] * steps[i])
            } else {
                let mut pp = coefs.clone();
                pp[i] += steps[i];
                pp[j] += steps[j];
                let mut pm = coefs.clone();
                pm[i] += steps[i];
                pm[j] -= steps[j];
                let mut mp = coefs.clone();
                mp[i] -= steps[i];
                mp[j] += steps[j];
                let mut mm = coefs.clone();
                mm[i] -= steps[i];
                mm[j] -= steps[j];
                (neg_loglik(&pp)? - neg_loglik(&pm)? - neg_loglik(&mp)? + neg_loglik(&mm)?)
                    / (4.0 * steps[i] * steps[j])
            };
            hessian[[i, j]] = value;
            hessian[[j, i]] = value;
        }
    }

    let cov = small_linalg::invert(&hessian)?;
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    let mut p_values = Vec::with_capacity(dim);
    for (i, &coef) in coefs.iter().enumerate() {
        let var = cov[[i, i]];
        if !(var.is_finite() && var > 0.0) {
            return None;
        }
        let z = (coef / var.sqrt()).abs();
        p_values.push(2.0 * (1.0 - normal.cdf(z)));
    }
    Some(p_values)
}
