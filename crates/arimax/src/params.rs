//! Parameter transforms for the likelihood optimizer.
//!
//! In constrained mode the optimizer works on unconstrained reals that are
//! mapped to stationary (AR) / invertible (MA) coefficients through the
//! partial-autocorrelation parametrization: `tanh` squashes each value into
//! (-1, 1) and a Levinson-Durbin recursion turns the partial correlations
//! into polynomial coefficients.
//!
//! **Not part of the public API.**

/// Maps unconstrained optimizer parameters to ARMA coefficients.
///
/// The resulting polynomial has all roots outside the unit circle, so the
/// same transform serves both the AR and MA sides.
pub(crate) fn pacf_to_coeffs(raw: &[f64]) -> Vec<f64> {
    let order = raw.len();
    if order == 0 {
        return Vec::new();
    }

    let pacf: Vec<f64> = raw.iter().map(|v| v.tanh()).collect();

    let mut coeffs = vec![0.0; order];
    let mut scratch = vec![0.0; order];
    coeffs[0] = pacf[0];
    for k in 1..order {
        scratch[..order].copy_from_slice(&coeffs);
        coeffs[k] = pacf[k];
        for j in 0..k {
            coeffs[j] = scratch[j] - pacf[k] * scratch[k - 1 - j];
        }
    }
    coeffs
}
