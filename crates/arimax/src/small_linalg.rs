//! Dense linear algebra for the small systems the filter needs.
//!
//! The state dimension is `max(p, q+1)` and never grows past single
//! digits, so plain Gaussian elimination with partial pivoting is enough.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};

const PIVOT_TOL: f64 = 1e-12;

/// Solves `A x = b`. Returns `None` when `A` is (numerically) singular.
pub(crate) fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    debug_assert_eq!(a.shape(), &[n, n]);

    let mut m = a.clone();
    let mut rhs = b.clone();

    for col in 0..n {
        // Partial pivot.
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                m[[i, col]]
                    .abs()
                    .partial_cmp(&m[[j, col]].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("non-empty pivot range");
        if m[[pivot_row, col]].abs() < PIVOT_TOL {
            return None;
        }
        if pivot_row != col {
            for k in 0..n {
                m.swap([col, k], [pivot_row, k]);
            }
            rhs.swap(col, pivot_row);
        }

        let pivot = m[[col, col]];
        for row in (col + 1)..n {
            let factor = m[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                m[[row, k]] -= factor * m[[col, k]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution.
    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for k in (row + 1)..n {
            acc -= m[[row, k]] * x[k];
        }
        x[row] = acc / m[[row, row]];
        if !x[row].is_finite() {
            return None;
        }
    }
    Some(x)
}

/// Inverts `A` column by column. Returns `None` when singular.
pub(crate) fn invert(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    let mut inv = Array2::zeros((n, n));
    for col in 0..n {
        let mut e = Array1::zeros(n);
        e[col] = 1.0;
        let x = solve(a, &e)?;
        for row in 0..n {
            inv[[row, col]] = x[row];
        }
    }
    Some(inv)
}
