//! LU decomposition with partial pivoting.
//!
//! The factorization is stored in place: the strict lower triangle holds the
//! unit-lower multipliers, the upper triangle holds `U`. A permutation vector
//! records which original row ended up in each position, so one factorization
//! serves any number of right-hand sides.

use super::{vector_bytes, SolveOutcome, SolverConfig, PIVOT_TOLERANCE};
use crate::dense::DenseMatrix;
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
    let perm = decompose(&mut a);
    let solution = solve_lu(&a, &perm, &b);
    let converged = solution.iter().all(|v| v.is_finite());

    SolveOutcome {
        solution,
        iterations: 0,
        converged,
        working_set_bytes: vector_bytes(n, n),
    }
}

/// Factor `a` in place and return the row permutation.
///
/// A negligible pivot skips the update of the rows below it; the zero is
/// left on the diagonal of `U` and surfaces as a division in [`solve_lu`].
pub fn decompose(a: &mut DenseMatrix) -> Vec<usize> {
    let n = a.nrows();
    let mut perm: Vec<usize> = (0..n).collect();

    for k in 0..n {
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
            perm.swap(k, max_row);
        }

        let pivot = a[(k, k)];
        if pivot.abs() <= PIVOT_TOLERANCE {
            warn!("Near-singular pivot at row {} in LU decomposition", k);
            continue;
        }

        for i in (k + 1)..n {
            let l = a[(i, k)] / pivot;
            a[(i, k)] = l;
            for j in (k + 1)..n {
                let akj = a[(k, j)];
                a[(i, j)] -= l * akj;
            }
        }
    }

    perm
}

/// Solve with a factorization from [`decompose`].
///
/// Forward substitution reads `b` through the permutation; back substitution
/// divides by `U`'s diagonal without a guard.
pub fn solve_lu(lu: &DenseMatrix, perm: &[usize], b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut y = vec![0.0; n];
    let mut x = vec![0.0; n];

    for i in 0..n {
        let row = lu.row(i);
        y[i] = b[perm[i]] - (0..i).map(|j| row[j] * y[j]).sum::<f64>();
    }

    for i in (0..n).rev() {
        let row = lu.row(i);
        let sum = y[i] - (i + 1..n).map(|j| row[j] * x[j]).sum::<f64>();
        x[i] = sum / row[i];
    }

    x
}
