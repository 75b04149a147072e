//! Differencing helpers.
//!
//! **Not part of the public API.**

/// First difference: `v[t] - v[t-1]`. Empty or single-element input gives
/// an empty result.
pub(crate) fn diff_once(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Applies `d` differencing passes.
pub(crate) fn difference(data: &[f64], d: usize) -> Vec<f64> {
    let mut out = data.to_vec();
    for _ in 0..d {
        out = diff_once(&out);
    }
    out
}

/// Differences future values against the observed history.
///
/// `tail` must hold the last `d` observed levels. The returned vector has
/// `future.len()` elements: the d-times differenced continuation of the
/// series.
pub(crate) fn difference_future(tail: &[f64], future: &[f64], d: usize) -> Vec<f64> {
    debug_assert_eq!(tail.len(), d);
    let mut ext: Vec<f64> = tail.iter().chain(future.iter()).copied().collect();
    for _ in 0..d {
        ext = diff_once(&ext);
    }
    ext
}

/// Integrates a d-times differenced forecast back to the level scale.
///
/// `history` is the full observed level series; the integration constants
/// are the last values of each intermediate differencing stage.
pub(crate) fn integrate_forecast(history: &[f64], diffed_forecast: &[f64], d: usize) -> Vec<f64> {
    // last[j] = last value of the j-times differenced history.
    let mut last = Vec::with_capacity(d);
    let mut stage = history.to_vec();
    for _ in 0..d {
        last.push(*stage.last().expect("history outlives differencing"));
        stage = diff_once(&stage);
    }

    let mut out = Vec::with_capacity(diffed_forecast.len());
    for &f in diffed_forecast {
        let mut value = f;
        for j in (0..d).rev() {
            value += last[j];
            last[j] = value;
        }
        out.push(value);
    }
    out
}
