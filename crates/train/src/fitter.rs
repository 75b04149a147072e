//! Chronological split and deadline-bounded model fitting.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use helios_arimax::{ArimaxFit, ArimaxSpec, Order};
use helios_evaluate::{accuracy, diagnostics};
use helios_series::AlignedDataset;

use crate::error::TrainError;
use crate::run::{DatasetSummary, SplitSummary, TrainingRun};

/// Split discipline: ratio plus hard floors on both windows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitSpec {
    /// Fraction of rows assigned to the training window.
    pub ratio: f64,
    /// Minimum training rows.
    pub min_train: usize,
    /// Minimum held-out rows.
    pub min_test: usize,
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            ratio: 0.8,
            min_train: 8,
            min_test: 2,
        }
    }
}

/// Fits one candidate configuration.
///
/// The dataset is split chronologically — never shuffled — at
/// `floor(n * ratio)`. The evaluation fit sees only the training window
/// and is scored by forecasting the held-out years against their actual
/// exogenous values; a second fit over the full dataset (same order)
/// produces the artifact that will be served if the run is promoted.
/// Both fits run with relaxed stationarity/invertibility constraints and
/// are bounded by `deadline`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`TrainError::InvalidSplitRatio`] | ratio outside (0, 1) |
/// | [`TrainError::SplitTooSmall`] | a window violates its floor |
/// | [`TrainError::Estimation`] | the engine fails on either fit |
/// | [`TrainError::EstimationTimeout`] | a fit exceeds `deadline` |
pub fn fit(
    aligned: &AlignedDataset,
    order: Order,
    split: &SplitSpec,
    deadline: Duration,
) -> Result<TrainingRun, TrainError> {
    if !split.ratio.is_finite() || split.ratio <= 0.0 || split.ratio >= 1.0 {
        return Err(TrainError::InvalidSplitRatio { ratio: split.ratio });
    }

    let n = aligned.len();
    let train_size = (n as f64 * split.ratio).floor() as usize;
    let test_size = n - train_size;
    if train_size < split.min_train || test_size < split.min_test {
        return Err(TrainError::SplitTooSmall {
            train_size,
            test_size,
            min_train: split.min_train,
            min_test: split.min_test,
        });
    }
    debug!(n, train_size, test_size, ratio = split.ratio, "chronological split");

    let (y_train, y_test) = aligned.target().split_at(train_size);
    let (x_train, x_test) = aligned.exogenous().split_at(train_size);

    // Evaluation fit: train window only.
    let eval_fit = fit_with_deadline(order, y_train.to_vec(), x_train.to_vec(), deadline)?;
    let test_predicted = eval_fit.forecast(test_size, x_test).map_err(TrainError::Estimation)?;

    let metrics = accuracy(y_test, &test_predicted)?;
    let diag = diagnostics(eval_fit.residuals(), None)?;
    info!(
        %order,
        mape = metrics.mape,
        rmse = metrics.rmse,
        r2 = metrics.r2,
        "held-out evaluation complete"
    );
    if diag.ljung_box_pass == Some(false) || diag.jarque_bera_pass == Some(false) {
        warn!(
            ljung_box = ?diag.ljung_box_pvalue,
            jarque_bera = ?diag.jarque_bera_pvalue,
            "residual diagnostics flagged this configuration (advisory)"
        );
    }

    // Serving fit: the full dataset at the same order.
    let fit = fit_with_deadline(
        order,
        aligned.target().to_vec(),
        aligned.exogenous().to_vec(),
        deadline,
    )?;

    Ok(TrainingRun {
        order,
        split: SplitSummary {
            train_size,
            test_size,
            split_ratio: split.ratio,
        },
        metrics,
        diagnostics: diag,
        dataset: DatasetSummary {
            rows: n,
            year_range: aligned.year_range(),
            target: aligned.target_stats(),
            exogenous: aligned.exog_stats(),
        },
        years: aligned.years().to_vec(),
        test_years: aligned.years()[train_size..].to_vec(),
        test_actual: y_test.to_vec(),
        test_predicted,
        fit,
    })
}

/// Runs one estimation on a worker thread with a wall-clock budget.
///
/// On timeout the worker is detached and its eventual result discarded;
/// the caller sees [`TrainError::EstimationTimeout`].
fn fit_with_deadline(
    order: Order,
    target: Vec<f64>,
    exog: Vec<f64>,
    deadline: Duration,
) -> Result<ArimaxFit, TrainError> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = ArimaxSpec::new(order)
            .relax_constraints(true)
            .fit(&target, &exog);
        // The receiver may have given up; nothing to do then.
        let _ = tx.send(result);
    });

    match rx.recv_timeout(deadline) {
        Ok(result) => Ok(result?),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(TrainError::EstimationTimeout {
            limit_secs: deadline.as_secs(),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(TrainError::Estimation(helios_arimax::ArimaxError::OptimizationFailed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    use helios_series::{align, ObservationSeries};

    fn yearly_dataset(n: usize, seed: u64) -> AlignedDataset {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let years: Vec<i32> = (0..n as i32).map(|i| 1965 + i).collect();
        let mut exog = vec![100.0];
        for _ in 1..n {
            let last = *exog.last().unwrap();
            exog.push(last * 1.05 + noise.sample(&mut rng));
        }
        let mut target = vec![500.0];
        for t in 1..n {
            let dx = exog[t] - exog[t - 1];
            let last = *target.last().unwrap();
            target.push(last + 0.3 * dx + noise.sample(&mut rng));
        }
        let target = ObservationSeries::new("energy", years.clone(), target).unwrap();
        let exog = ObservationSeries::new("gdp", years, exog).unwrap();
        align(&target, &exog, 10).unwrap()
    }

    #[test]
    fn split_sizes_match_ratio() {
        let aligned = yearly_dataset(60, 1);
        let run = fit(
            &aligned,
            Order::new(1, 1, 0),
            &SplitSpec::default(),
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(run.split.train_size, 48);
        assert_eq!(run.split.test_size, 12);
        assert_eq!(run.test_actual.len(), 12);
        assert_eq!(run.test_predicted.len(), 12);
        assert_eq!(run.test_years.first(), Some(&2013));
        assert_eq!(run.test_years.last(), Some(&2024));
    }

    #[test]
    fn serving_fit_uses_all_rows() {
        let aligned = yearly_dataset(40, 2);
        let run = fit(
            &aligned,
            Order::new(0, 1, 0),
            &SplitSpec::default(),
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(run.fit.n_obs(), 40);
        assert_eq!(run.dataset.rows, 40);
    }

    #[test]
    fn invalid_ratio_fails() {
        let aligned = yearly_dataset(30, 3);
        for ratio in [0.0, 1.0, 1.2, -0.5, f64::NAN] {
            let spec = SplitSpec {
                ratio,
                ..SplitSpec::default()
            };
            let err = fit(&aligned, Order::new(0, 1, 0), &spec, Duration::from_secs(60))
                .unwrap_err();
            assert!(matches!(err, TrainError::InvalidSplitRatio { .. }), "ratio {ratio}");
        }
    }

    #[test]
    fn tiny_test_window_fails() {
        let aligned = yearly_dataset(20, 4);
        let spec = SplitSpec {
            ratio: 0.99,
            ..SplitSpec::default()
        };
        let err = fit(&aligned, Order::new(0, 1, 0), &spec, Duration::from_secs(60)).unwrap_err();
        assert!(matches!(
            err,
            TrainError::SplitTooSmall {
                test_size: 1,
                min_test: 2,
                ..
            }
        ));
    }

    #[test]
    fn tiny_train_window_fails() {
        let aligned = yearly_dataset(12, 5);
        let spec = SplitSpec {
            ratio: 0.5,
            ..SplitSpec::default()
        };
        let err = fit(&aligned, Order::new(0, 1, 0), &spec, Duration::from_secs(60)).unwrap_err();
        assert!(matches!(err, TrainError::SplitTooSmall { train_size: 6, .. }));
    }

    #[test]
    fn engine_failure_propagates() {
        // A constant target cannot be fitted; the error carries through.
        let years: Vec<i32> = (1990..2020).collect();
        let target =
            ObservationSeries::new("energy", years.clone(), vec![7.0; years.len()]).unwrap();
        let exog = ObservationSeries::new(
            "gdp",
            years.clone(),
            years.iter().map(|&y| y as f64).collect(),
        )
        .unwrap();
        let aligned = align(&target, &exog, 10).unwrap();
        let err = fit(
            &aligned,
            Order::new(1, 0, 0),
            &SplitSpec::default(),
            Duration::from_secs(60),
        )
        .unwrap_err();
        assert!(matches!(err, TrainError::Estimation(_)));
    }
}
