//! Round-trip integration tests for helios-arimax.

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use helios_arimax::{ArimaxSpec, Order};

/// Target driven by an exogenous series plus AR(1) noise, on the level
/// scale (d = 0).
fn regression_ar1(
    intercept: f64,
    slope: f64,
    phi: f64,
    n: usize,
    seed: u64,
) -> (Vec<f64>, Vec<f64>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let exog: Vec<f64> = (0..n).map(|i| 50.0 + i as f64 + noise.sample(&mut rng)).collect();
    let mut e = vec![0.0; n];
    for t in 1..n {
        e[t] = phi * e[t - 1] + noise.sample(&mut rng);
    }
    let target: Vec<f64> = exog
        .iter()
        .zip(e.iter())
        .map(|(&x, &et)| intercept + slope * x + et)
        .collect();
    (target, exog)
}

/// Integrated target: differences follow a regression on differenced exog
/// plus white noise.
fn integrated_series(drift: f64, slope: f64, n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let mut exog = vec![100.0];
    for _ in 1..n {
        let last = *exog.last().unwrap();
        exog.push(last + 2.0 + noise.sample(&mut rng));
    }
    let mut target = vec![500.0];
    for t in 1..n {
        let dx = exog[t] - exog[t - 1];
        let last = *target.last().unwrap();
        target.push(last + drift + slope * dx + noise.sample(&mut rng));
    }
    (target, exog)
}

#[test]
fn level_regression_recovery() {
    let (target, exog) = regression_ar1(5.0, 1.5, 0.5, 400, 11);
    let fit = ArimaxSpec::new(Order::new(1, 0, 0)).fit(&target, &exog).unwrap();
    assert!(
        (fit.beta()[1] - 1.5).abs() < 0.15,
        "slope: expected ~1.5, got {}",
        fit.beta()[1]
    );
    assert!(
        (fit.ar()[0] - 0.5).abs() < 0.2,
        "phi: expected ~0.5, got {}",
        fit.ar()[0]
    );
    assert!(fit.sigma2() > 0.5 && fit.sigma2() < 2.0, "sigma2 = {}", fit.sigma2());
}

#[test]
fn integrated_regression_recovery() {
    let (target, exog) = integrated_series(1.0, 0.8, 300, 22);
    let fit = ArimaxSpec::new(Order::new(0, 1, 0))
        .relax_constraints(true)
        .fit(&target, &exog)
        .unwrap();
    assert!(
        (fit.beta()[1] - 0.8).abs() < 0.2,
        "slope: expected ~0.8, got {}",
        fit.beta()[1]
    );
}

#[test]
fn aic_prefers_generating_structure() {
    let (target, exog) = regression_ar1(0.0, 1.0, 0.7, 500, 33);
    let ar1 = ArimaxSpec::new(Order::new(1, 0, 0)).fit(&target, &exog).unwrap();
    let wn = ArimaxSpec::new(Order::new(0, 0, 0)).fit(&target, &exog).unwrap();
    assert!(
        ar1.aic() < wn.aic(),
        "AR(1) AIC {} should beat white-noise AIC {}",
        ar1.aic(),
        wn.aic()
    );
}

#[test]
fn forecast_bounds_ordered_and_widening() {
    let (target, exog) = integrated_series(0.5, 0.5, 120, 44);
    let fit = ArimaxSpec::new(Order::new(1, 1, 1))
        .relax_constraints(true)
        .fit(&target, &exog)
        .unwrap();

    let last = *exog.last().unwrap();
    let future: Vec<f64> = (1..=6).map(|k| last + 2.0 * k as f64).collect();
    let bands = fit.get_forecast(6, &future, 0.05).unwrap();

    assert_eq!(bands.mean.len(), 6);
    for k in 0..6 {
        assert!(bands.lower[k] <= bands.mean[k]);
        assert!(bands.mean[k] <= bands.upper[k]);
    }
    let width = |k: usize| bands.upper[k] - bands.lower[k];
    assert!(
        width(5) >= width(0),
        "interval should not shrink with horizon: {} vs {}",
        width(5),
        width(0)
    );
}

#[test]
fn serialized_fit_forecasts_identically() {
    let (target, exog) = integrated_series(1.0, 0.6, 150, 55);
    let fit = ArimaxSpec::new(Order::new(1, 1, 0))
        .relax_constraints(true)
        .fit(&target, &exog)
        .unwrap();

    let bytes = serde_json::to_vec(&fit).unwrap();
    let restored: helios_arimax::ArimaxFit = serde_json::from_slice(&bytes).unwrap();

    let last = *exog.last().unwrap();
    let future: Vec<f64> = (1..=4).map(|k| last * (1.0 + 0.05 * k as f64)).collect();
    assert_eq!(
        fit.get_forecast(4, &future, 0.05).unwrap(),
        restored.get_forecast(4, &future, 0.05).unwrap()
    );
}

#[test]
fn relaxed_fit_handles_short_yearly_sample() {
    // Roughly the size of a 48-year training window.
    let (target, exog) = integrated_series(1.5, 0.4, 48, 66);
    let fit = ArimaxSpec::new(Order::new(1, 1, 1))
        .relax_constraints(true)
        .fit(&target, &exog)
        .unwrap();
    assert!(fit.log_likelihood().is_finite());
    let points = fit
        .forecast(12, &(1..=12).map(|k| exog.last().unwrap() + k as f64 * 2.0).collect::<Vec<_>>())
        .unwrap();
    assert_eq!(points.len(), 12);
    assert!(points.iter().all(|v| v.is_finite()));
}
