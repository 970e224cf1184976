//! Cholesky factorization `A = L·Lᵀ` for symmetric positive definite systems.
//!
//! Only the lower triangle of the input is read. If the factorization breaks
//! down the solve falls back to an all-zero vector.

use super::{vector_bytes, SolveOutcome, SolverConfig, PIVOT_TOLERANCE};
use crate::dense::DenseMatrix;
use crate::error::{Error, Result};
use log::warn;

/// Factor and solve `a·x = b`.
///
/// # Panics
///
/// `a` must be square with `b.len()` rows. Smaller matrices index out of
/// bounds and larger ones are read only partially; go through
/// [`SolverKind::solve`](crate::solver::SolverKind::solve) to get an error instead.
pub fn solve(mut a: DenseMatrix, b: Vec<f64>, _config: &SolverConfig) -> SolveOutcome {
    let n = b.len();
    let working_set_bytes = vector_bytes(n, n);

    if let Err(e) = decompose(&mut a) {
        warn!("Cholesky decomposition failed ({}), returning zero solution", e);
        return SolveOutcome {
            solution: vec![0.0; n],
            iterations: 0,
            converged: false,
            working_set_bytes,
        };
    }

    SolveOutcome {
        solution: solve_cholesky(&a, &b),
        iterations: 0,
        converged: true,
        working_set_bytes,
    }
}

/// Overwrite the lower triangle of `a` with `L`.
///
/// # Errors
///
/// Returns [`Error::NotPositiveDefinite`] with the offending row when a
/// diagonal accumulator is not positive or a pivot is negligible.
pub fn decompose(a: &mut DenseMatrix) -> Result<()> {
    let n = a.nrows();

    for i in 0..n {
        for j in 0..=i {
            let sum = a[(i, j)] - (0..j).map(|k| a[(i, k)] * a[(j, k)]).sum::<f64>();

            if i == j {
                if sum <= 0.0 {
                    return Err(Error::NotPositiveDefinite { row: i });
                }
                a[(i, j)] = sum.sqrt();
            } else {
                let ljj = a[(j, j)];
                if ljj.abs() < PIVOT_TOLERANCE {
                    return Err(Error::NotPositiveDefinite { row: j });
                }
                a[(i, j)] = sum / ljj;
            }
        }
    }

    Ok(())
}

/// Solve with a factor from [`decompose`]: `L·y = b`, then `Lᵀ·x = y`.
pub fn solve_cholesky(l: &DenseMatrix, b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut y = vec![0.0; n];
    let mut x = vec![0.0; n];

    for i in 0..n {
        let row = l.row(i);
        let sum = b[i] - (0..i).map(|j| row[j] * y[j]).sum::<f64>();
        y[i] = sum / row[i];
    }

    for i in (0..n).rev() {
        let sum = y[i] - (i + 1..n).map(|j| l[(j, i)] * x[j]).sum::<f64>();
        x[i] = sum / l[(i, i)];
    }

    x
}
