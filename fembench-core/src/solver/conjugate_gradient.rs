//! Conjugate Gradient over dense or CSR storage.
//!
//! Zero initial guess, `r = F`, `p = r`, and the textbook recurrence
//! `α = rᵀr / pᵀAp`, `x += αp`, `r -= αAp`, `β = r'ᵀr' / rᵀr`, `p = r' + βp`.
//! Iteration stops once `‖r‖₂ < tolerance`; running out of iterations returns
//! the last iterate with a warning.

use super::{dot, norm, vector_bytes, SolveOutcome, SolverConfig};
use crate::dense::DenseMatrix;
use crate::sparse::{convert_to_sparse, sparse_mul_vec_into, storage_bytes, CsrMatrix};
use log::{debug, warn};

/// CG using dense matrix-vector products.
///
/// # Panics
///
/// `a` must be square with `b.len()` rows. Smaller matrices index out of
/// bounds and larger ones are read only partially; go through
/// [`SolverKind::solve`](crate::solver::SolverKind::solve) to get an error instead.
pub fn solve(a: DenseMatrix, b: Vec<f64>, config: &SolverConfig) -> SolveOutcome {
    let n = b.len();
    let (solution, iterations, converged) = iterate(|p, ap| a.mul_vec_into(p, ap), b, config);

    SolveOutcome {
        solution,
        iterations,
        converged,
        working_set_bytes: vector_bytes(3, n),
    }
}

/// CG on the CSR view of `a`, dropping entries at or below
/// `config.sparse_threshold`.
///
/// # Panics
///
/// `a` must be square with `b.len()` rows. Smaller matrices index out of
/// bounds and larger ones are read only partially; go through
/// [`SolverKind::solve`](crate::solver::SolverKind::solve) to get an error instead.
pub fn solve_sparse(a: DenseMatrix, b: Vec<f64>, config: &SolverConfig) -> SolveOutcome {
    let csr = convert_to_sparse(&a, config.sparse_threshold);
    drop(a);
    solve_csr(&csr, b, config)
}

/// CG on an already converted CSR matrix.
pub fn solve_csr(a: &CsrMatrix, b: Vec<f64>, config: &SolverConfig) -> SolveOutcome {
    let n = b.len();
    let (solution, iterations, converged) =
        iterate(|p, ap| sparse_mul_vec_into(a, p, ap), b, config);

    SolveOutcome {
        solution,
        iterations,
        converged,
        working_set_bytes: storage_bytes(a) + vector_bytes(3, n),
    }
}

/// Shared recurrence. `matvec(p, ap)` must write `A·p` into `ap`.
///
/// Returns the iterate, the number of iterations run and whether the
/// tolerance was met.
fn iterate<M>(mut matvec: M, b: Vec<f64>, config: &SolverConfig) -> (Vec<f64>, usize, bool)
where
    M: FnMut(&[f64], &mut [f64]),
{
    let n = b.len();
    let mut x = vec![0.0; n];
    let mut r = b;
    let mut p = r.clone();
    let mut ap = vec![0.0; n];

    let mut rs_old = dot(&r, &r);
    if rs_old.sqrt() < config.tolerance {
        return (x, 0, true);
    }

    for iter in 0..config.max_iterations {
        matvec(&p, &mut ap);

        let p_ap = dot(&p, &ap);
        if p_ap == 0.0 {
            warn!("CG breakdown at iteration {}: pᵀAp = 0", iter);
            return (x, iter, false);
        }
        let alpha = rs_old / p_ap;

        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * ap[i];
        }

        let rs_new = dot(&r, &r);
        let residual = rs_new.sqrt();

        if iter % 100 == 0 {
            debug!("CG iteration {}, residual {:.3e}", iter, residual);
        }

        if residual < config.tolerance {
            debug!("CG converged after {} iterations", iter + 1);
            return (x, iter + 1, true);
        }

        let beta = rs_new / rs_old;
        for i in 0..n {
            p[i] = r[i] + beta * p[i];
        }
        rs_old = rs_new;
    }

    warn!(
        "CG reached {} iterations without converging (residual {:.3e})",
        config.max_iterations,
        norm(&r)
    );
    (x, config.max_iterations, false)
}
