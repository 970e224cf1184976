//! Gauss-Seidel relaxation.
//!
//! Each sweep updates `x_i` in row order using the already updated values for
//! `j < i` and the previous iterate for `j > i`. Rows with a negligible
//! diagonal keep their previous value. Convergence is only guaranteed for
//! diagonally dominant or SPD systems.

use super::{vector_bytes, SolveOutcome, SolverConfig, PIVOT_TOLERANCE};
use crate::dense::DenseMatrix;
use log::{debug, warn};

/// Sweep until `‖x − x_old‖₂ < tolerance` or the iteration budget runs out.
///
/// # Panics
///
/// `a` must be square with `b.len()` rows. Smaller matrices index out of
/// bounds and larger ones are read only partially; go through
/// [`SolverKind::solve`](crate::solver::SolverKind::solve) to get an error instead.
pub fn solve(a: DenseMatrix, b: Vec<f64>, config: &SolverConfig) -> SolveOutcome {
    let n = b.len();
    let mut x = vec![0.0; n];
    let mut x_old = vec![0.0; n];
    let mut change = f64::INFINITY;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        x_old.copy_from_slice(&x);

        for i in 0..n {
            let row = a.row(i);
            let lower: f64 = (0..i).map(|j| row[j] * x[j]).sum();
            let upper: f64 = (i + 1..n).map(|j| row[j] * x_old[j]).sum();
            if row[i].abs() > PIVOT_TOLERANCE {
                x[i] = (b[i] - lower - upper) / row[i];
            }
        }

        change = x
            .iter()
            .zip(&x_old)
            .map(|(xi, xo)| (xi - xo) * (xi - xo))
            .sum::<f64>()
            .sqrt();

        if iterations % 100 == 0 {
            debug!("Gauss-Seidel iteration {}, change {:.3e}", iterations, change);
        }
        iterations += 1;

        if change < config.tolerance {
            converged = true;
            debug!("Gauss-Seidel converged after {} iterations", iterations);
            break;
        }
    }

    if !converged {
        warn!(
            "Gauss-Seidel reached {} iterations without converging (change {:.3e})",
            config.max_iterations, change
        );
    }

    SolveOutcome {
        solution: x,
        iterations,
        converged,
        working_set_bytes: vector_bytes(2, n),
    }
}
