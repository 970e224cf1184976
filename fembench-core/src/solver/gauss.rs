//! Naive Gaussian elimination with partial pivoting.
//!
//! A column whose best pivot is below [`PIVOT_TOLERANCE`] is skipped: its rows
//! below the diagonal are left unmodified and elimination moves on. This can
//! silently produce a wrong answer for singular or nearly singular systems.
//! Back substitution sets an unknown to 0 when its diagonal is negligible.

use super::{vector_bytes, SolveOutcome, SolverConfig, PIVOT_TOLERANCE};
use crate::dense::DenseMatrix;
use log::warn;

/// Solve `a·x = b` by elimination on the owned copies.
///
/// # Panics
///
/// `a` must be square with `b.len()` rows. Smaller matrices index out of
/// bounds and larger ones are read only partially; go through
/// [`SolverKind::solve`](crate::solver::SolverKind::solve) to get an error instead.
pub fn solve(mut a: DenseMatrix, mut b: Vec<f64>, _config: &SolverConfig) -> SolveOutcome {
    let n = b.len();
    let skipped = forward_elimination(&mut a, &mut b);
    let (solution, zeroed) = back_substitution(&a, &b);

    SolveOutcome {
        solution,
        iterations: 0,
        converged: skipped == 0 && zeroed == 0,
        working_set_bytes: vector_bytes(n, n),
    }
}

/// Reduce `a` to upper-triangular form, applying the same row operations to
/// `b`. Returns the number of columns skipped for a negligible pivot.
pub fn forward_elimination(a: &mut DenseMatrix, b: &mut [f64]) -> usize {
    let n = b.len();
    let mut skipped = 0;

    for k in 0..n.saturating_sub(1) {
        let mut max_row = k;
        let mut max_val = a[(k, k)].abs();
        for i in (k + 1)..n {
            if a[(i, k)].abs() > max_val {
                max_val = a[(i, k)].abs();
                max_row = i;
            }
        }
        if max_row != k {
            a.swap_rows(k, max_row);
            b.swap(k, max_row);
        }

        let pivot = a[(k, k)];
        if pivot.abs() < PIVOT_TOLERANCE {
            warn!("Near-singular pivot at row {}, column skipped", k);
            skipped += 1;
            continue;
        }

        for i in (k + 1)..n {
            let factor = a[(i, k)] / pivot;
            b[i] -= factor * b[k];
            for j in k..n {
                let akj = a[(k, j)];
                a[(i, j)] -= factor * akj;
            }
        }
    }

    skipped
}

/// Solve an upper-triangular system. Returns the solution and how many
/// unknowns were set to 0 for a negligible diagonal.
pub fn back_substitution(a: &DenseMatrix, b: &[f64]) -> (Vec<f64>, usize) {
    let n = b.len();
    let mut x = vec![0.0; n];
    let mut zeroed = 0;

    for i in (0..n).rev() {
        let row = a.row(i);
        let sum = b[i] - (i + 1..n).map(|j| row[j] * x[j]).sum::<f64>();

        if row[i].abs() < PIVOT_TOLERANCE {
            warn!("Near-zero diagonal at row {} in back substitution", i);
            zeroed += 1;
            x[i] = 0.0;
        } else {
            x[i] = sum / row[i];
        }
    }

    (x, zeroed)
}
