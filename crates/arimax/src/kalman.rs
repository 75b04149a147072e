//! Companion-form state space and the univariate Kalman filter used for
//! ARMA likelihood evaluation.
//!
//! The ARMA(p,q) error process is written as
//!
//! ```text
//! x[t+1] = T x[t] + R e[t]      (transition)
//! y[t]   = x[t][0]              (observation)
//! ```
//!
//! with `T` the companion matrix of the AR polynomial, `R = [1, theta_1,
//! ..., theta_q, 0, ...]`, and state dimension `max(p, q+1)`. The filter is
//! run with unit innovation variance; sigma2 is concentrated out of the
//! Gaussian likelihood via the prediction-error decomposition.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

use crate::error::ArimaxError;
use crate::small_linalg;

/// Diffuse-ish prior used when the stationary covariance solve is not
/// available (relaxed mode near or past the unit circle).
const DIFFUSE_KAPPA: f64 = 1e6;

const MIN_PREDICTION_VAR: f64 = 1e-12;

/// Companion-form representation of an ARMA(p,q) process.
pub(crate) struct Companion {
    dim: usize,
    trans: Array2<f64>,
    noise_outer: Array2<f64>,
}

impl Companion {
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let dim = p.max(q + 1).max(1);

        let mut trans = Array2::zeros((dim, dim));
        for (i, &phi) in ar.iter().enumerate() {
            trans[[i, 0]] = phi;
        }
        for i in 0..dim.saturating_sub(1) {
            trans[[i, i + 1]] = 1.0;
        }

        let mut noise = Array1::zeros(dim);
        noise[0] = 1.0;
        for (j, &theta) in ma.iter().enumerate() {
            noise[j + 1] = theta;
        }
        let col = noise.view().insert_axis(Axis(1));
        let row = noise.view().insert_axis(Axis(0));
        let noise_outer = col.dot(&row);

        Self {
            dim,
            trans,
            noise_outer,
        }
    }

    /// Stationary state covariance: the solution of `P = T P T' + R R'`,
    /// obtained from the vectorised linear system `(I - T (x) T) vec(P) =
    /// vec(R R')`. Falls back to a diffuse `kappa * I` prior when the
    /// system is singular or the solution is unusable.
    fn initial_covariance(&self) -> Array2<f64> {
        let r = self.dim;
        let n = r * r;
        let mut a = Array2::zeros((n, n));
        let mut b = Array1::zeros(n);
        for i in 0..r {
            for j in 0..r {
                let row = i * r + j;
                b[row] = self.noise_outer[[i, j]];
                for k in 0..r {
                    for l in 0..r {
                        let col = k * r + l;
                        let kron = self.trans[[i, k]] * self.trans[[j, l]];
                        a[[row, col]] = if row == col { 1.0 - kron } else { -kron };
                    }
                }
            }
        }

        match small_linalg::solve(&a, &b) {
            Some(vec_p) if vec_p.iter().all(|v| v.is_finite()) && vec_p[0] > 0.0 => {
                let mut p = Array2::zeros((r, r));
                for i in 0..r {
                    for j in 0..r {
                        p[[i, j]] = vec_p[i * r + j];
                    }
                }
                // Force symmetry lost to rounding.
                (&p + &p.t()) / 2.0
            }
            _ => Array2::eye(r) * DIFFUSE_KAPPA,
        }
    }
}

/// Output of a full filtering pass.
pub(crate) struct FilterOutput {
    /// Concentrated innovation variance estimate.
    pub(crate) sigma2: f64,
    /// One-step-ahead prediction errors.
    pub(crate) residuals: Vec<f64>,
    /// Maximised Gaussian log-likelihood.
    pub(crate) log_likelihood: f64,
}

struct Pass {
    ssq: f64,
    sum_log_f: f64,
    residuals: Vec<f64>,
}

fn run_filter(companion: &Companion, data: &[f64]) -> Result<Pass, ArimaxError> {
    let mut state: Array1<f64> = Array1::zeros(companion.dim);
    let mut cov = companion.initial_covariance();

    let mut ssq = 0.0;
    let mut sum_log_f = 0.0;
    let mut residuals = Vec::with_capacity(data.len());

    for &y in data {
        let f = cov[[0, 0]];
        if !f.is_finite() || f <= MIN_PREDICTION_VAR {
            return Err(ArimaxError::FilterDiverged);
        }
        let v = y - state[0];
        ssq += v * v / f;
        sum_log_f += f.ln();
        residuals.push(v);

        // Gain direction: T P Z with Z = e1.
        let pz = cov.column(0).to_owned();
        let tpz = companion.trans.dot(&pz);

        state = companion.trans.dot(&state) + &tpz * (v / f);
        let tpt = companion.trans.dot(&cov).dot(&companion.trans.t());
        let correction = {
            let col = tpz.view().insert_axis(Axis(1));
            let row = tpz.view().insert_axis(Axis(0));
            col.dot(&row) / f
        };
        cov = tpt + &companion.noise_outer - correction;
        cov = (&cov + &cov.t()) / 2.0;

        if !ssq.is_finite() {
            return Err(ArimaxError::FilterDiverged);
        }
    }

    Ok(Pass {
        ssq,
        sum_log_f,
        residuals,
    })
}

fn concentrated(pass: &Pass, n: usize) -> (f64, f64) {
    let nf = n as f64;
    let sigma2 = (pass.ssq / nf).max(f64::MIN_POSITIVE);
    let log_likelihood = -0.5 * nf * ((2.0 * std::f64::consts::PI).ln() + 1.0)
        - 0.5 * nf * sigma2.ln()
        - 0.5 * pass.sum_log_f;
    (sigma2, log_likelihood)
}

/// Concentrated Gaussian log-likelihood of an ARMA(p,q) process for the
/// given coefficients.
pub(crate) fn concentrated_loglik(ar: &[f64], ma: &[f64], data: &[f64]) -> Result<f64, ArimaxError> {
    let companion = Companion::new(ar, ma);
    let pass = run_filter(&companion, data)?;
    let (_, log_likelihood) = concentrated(&pass, data.len());
    Ok(log_likelihood)
}

/// Full filtering pass: sigma2, residuals, and the log-likelihood at the
/// concentrated optimum.
pub(crate) fn filter_full(ar: &[f64], ma: &[f64], data: &[f64]) -> Result<FilterOutput, ArimaxError> {
    let companion = Companion::new(ar, ma);
    let pass = run_filter(&companion, data)?;
    let (sigma2, log_likelihood) = concentrated(&pass, data.len());
    Ok(FilterOutput {
        sigma2,
        residuals: pass.residuals,
        log_likelihood,
    })
}
