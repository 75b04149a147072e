//! Stepwise AIC order search.

use std::collections::HashSet;

use tracing::{debug, trace};

use helios_arimax::{ArimaxSpec, Order};

use crate::bounds::OrderBounds;
use crate::error::SelectError;

/// Result of a successful automatic search.
#[derive(Clone, Copy, Debug)]
pub struct Selection {
    /// The winning order.
    pub order: Order,
    /// Its Akaike Information Criterion.
    pub aic: f64,
    /// Number of candidate orders fitted (including failures).
    pub evaluated: usize,
}

/// Chooses the differencing order when none is fixed: the smallest
/// `d <= max_d` whose d-times differenced target has the lowest sample
/// variance. Over-differencing inflates the variance again, so the
/// minimum is a cheap, serviceable estimate.
pub fn derive_d(target: &[f64], max_d: usize) -> usize {
    let mut best_d = 0;
    let mut best_var = f64::INFINITY;
    let mut series = target.to_vec();
    for d in 0..=max_d {
        if series.len() < 3 {
            break;
        }
        let var = helios_stats::variance(&series);
        if var < best_var {
            best_var = var;
            best_d = d;
        }
        series = series.windows(2).map(|w| w[1] - w[0]).collect();
    }
    best_d
}

/// Bounded stepwise search over (p, q) at a fixed or derived `d`,
/// minimizing AIC.
///
/// Starts from the classic candidate set {(2,2), (0,0), (1,0), (0,1)}
/// clipped to the bounds, then repeatedly tries the neighbours of the
/// incumbent (p±1, q±1 and the diagonal) until no move improves the AIC.
/// Candidates that fail to fit are skipped and counted.
///
/// # Errors
///
/// Returns [`SelectError::SearchFailed`] when every attempted candidate
/// fails to fit. There is no fallback order: the caller chooses whether
/// to retry manually.
pub fn select_auto(
    target: &[f64],
    exog: &[f64],
    bounds: &OrderBounds,
    fixed_d: Option<usize>,
) -> Result<Selection, SelectError> {
    let d = fixed_d.unwrap_or_else(|| derive_d(target, bounds.max_d));
    debug!(d, fixed = fixed_d.is_some(), "differencing order for search");

    let mut visited: HashSet<(usize, usize)> = HashSet::new();
    let mut evaluated = 0usize;
    let mut best: Option<(Order, f64)> = None;

    let try_candidate =
        |p: usize, q: usize, visited: &mut HashSet<(usize, usize)>, evaluated: &mut usize| {
            if p > bounds.max_p || q > bounds.max_q || !visited.insert((p, q)) {
                return None;
            }
            *evaluated += 1;
            let order = Order::new(p, d, q);
            match ArimaxSpec::new(order)
                .relax_constraints(true)
                .fit(target, exog)
            {
                Ok(fit) => {
                    let aic = fit.aic();
                    trace!(%order, aic, "candidate fitted");
                    aic.is_finite().then_some((order, aic))
                }
                Err(e) => {
                    trace!(%order, error = %e, "candidate failed");
                    None
                }
            }
        };

    let initial = [(2, 2), (0, 0), (1, 0), (0, 1)];
    for (p, q) in initial {
        if let Some((order, aic)) = try_candidate(p, q, &mut visited, &mut evaluated) {
            if best.map_or(true, |(_, best_aic)| aic < best_aic) {
                best = Some((order, aic));
            }
        }
    }

    // Neighbourhood moves from the incumbent until the AIC stops
    // improving.
    loop {
        let Some((incumbent, incumbent_aic)) = best else {
            break;
        };
        let (p, q) = (incumbent.p, incumbent.q);
        let neighbours = [
            (p.wrapping_sub(1), q),
            (p + 1, q),
            (p, q.wrapping_sub(1)),
            (p, q + 1),
            (p.wrapping_sub(1), q.wrapping_sub(1)),
            (p + 1, q + 1),
        ];
        let mut improved = false;
        for (np, nq) in neighbours {
            if np == usize::MAX || nq == usize::MAX {
                continue;
            }
            if let Some((order, aic)) = try_candidate(np, nq, &mut visited, &mut evaluated) {
                if aic < incumbent_aic {
                    best = Some((order, aic));
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }

    match best {
        Some((order, aic)) => {
            debug!(%order, aic, evaluated, "stepwise search selected order");
            Ok(Selection {
                order,
                aic,
                evaluated,
            })
        }
        None => Err(SelectError::SearchFailed { tried: evaluated }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn ar1_with_exog(phi: f64, n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let exog: Vec<f64> = (0..n).map(|i| 10.0 + i as f64 * 0.5 + noise.sample(&mut rng)).collect();
        let mut e = vec![0.0; n];
        for t in 1..n {
            e[t] = phi * e[t - 1] + noise.sample(&mut rng);
        }
        let target: Vec<f64> = exog.iter().zip(e.iter()).map(|(&x, &et)| 2.0 * x + et).collect();
        (target, exog)
    }

    #[test]
    fn derive_d_zero_for_stationary() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let data: Vec<f64> = (0..200).map(|_| noise.sample(&mut rng)).collect();
        assert_eq!(derive_d(&data, 2), 0);
    }

    #[test]
    fn derive_d_one_for_random_walk() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut data = vec![0.0];
        for _ in 1..300 {
            let last = *data.last().unwrap();
            data.push(last + 1.0 + noise.sample(&mut rng));
        }
        assert_eq!(derive_d(&data, 2), 1);
    }

    #[test]
    fn select_auto_finds_a_finite_aic_order() {
        let (target, exog) = ar1_with_exog(0.6, 200, 3);
        let selection = select_auto(&target, &exog, &OrderBounds::default(), Some(0)).unwrap();
        assert!(selection.aic.is_finite());
        assert!(selection.evaluated >= 4);
        assert!(selection.order.p <= 5 && selection.order.q <= 5);
        assert_eq!(selection.order.d, 0);
    }

    #[test]
    fn select_auto_respects_tight_bounds() {
        let (target, exog) = ar1_with_exog(0.5, 150, 4);
        let bounds = OrderBounds {
            max_p: 1,
            max_q: 0,
            max_d: 0,
        };
        let selection = select_auto(&target, &exog, &bounds, Some(0)).unwrap();
        assert!(selection.order.p <= 1);
        assert_eq!(selection.order.q, 0);
    }

    #[test]
    fn select_auto_fails_on_degenerate_data() {
        // Too short for any candidate to fit.
        let target = vec![1.0, 2.0];
        let exog = vec![1.0, 1.1];
        let err = select_auto(&target, &exog, &OrderBounds::default(), Some(0)).unwrap_err();
        assert!(matches!(err, SelectError::SearchFailed { .. }));
    }
}
