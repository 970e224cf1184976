//! Linear system solvers.
//!
//! Six independent strategies for `K·U = F`, selected through [`SolverKind`].
//!
//! # Solver Backends
//!
//! - [`gauss`]: Forward elimination with partial pivoting and back substitution.
//! - [`lu`]: In-place LU with a row permutation, reusable across right-hand sides.
//! - [`cholesky`]: `A = L·Lᵀ` for symmetric positive definite input.
//! - [`conjugate_gradient`]: Krylov iteration over dense or CSR storage.
//! - [`gauss_seidel`]: Relaxation sweeps until successive iterates agree.
//!
//! Every solver takes ownership of private copies of `K` and `F` and always
//! returns a vector of length `n`. Numerical trouble (a vanishing pivot, a
//! matrix that is not positive definite, an exhausted iteration budget) is
//! logged and reflected in [`SolveOutcome::converged`], never raised.

pub mod cholesky;
pub mod conjugate_gradient;
pub mod gauss;
pub mod gauss_seidel;
pub mod lu;

use crate::dense::DenseMatrix;
use crate::error::{Error, Result};
use log::debug;

/// Pivot or diagonal magnitude below which elimination treats a value as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-15;

/// Solver configuration shared by the iterative methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Stopping threshold on `‖r‖₂` (CG) or `‖x − x_old‖₂` (Gauss-Seidel).
    pub tolerance: f64,
    /// Iteration budget before giving up with a best-effort iterate.
    pub max_iterations: usize,
    /// Entries with `|a_ij|` at or below this are dropped from CSR storage.
    pub sparse_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 10000,
            sparse_threshold: crate::sparse::DEFAULT_DROP_THRESHOLD,
        }
    }
}

/// Result of a single solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Solution vector, always of the system dimension.
    pub solution: Vec<f64>,
    /// Iterations performed (0 for direct methods).
    pub iterations: usize,
    /// False when a direct method failed or an iterative one ran out of budget.
    pub converged: bool,
    /// Estimated bytes held by the solver's working storage.
    pub working_set_bytes: usize,
}

impl SolveOutcome {
    /// Working set in MiB, as reported in benchmark tables.
    pub fn memory_mb(&self) -> f64 {
        self.working_set_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Uniform entry point shared by all solvers.
///
/// These functions expect a square matrix matching the right-hand side and
/// index out of bounds otherwise; [`SolverKind::solve`] checks this first.
pub type SolveFn = fn(DenseMatrix, Vec<f64>, &SolverConfig) -> SolveOutcome;

/// Available solving strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    NaiveGauss,
    Lu,
    Cholesky,
    ConjugateGradient,
    SparseConjugateGradient,
    GaussSeidel,
}

impl SolverKind {
    /// All solvers in benchmark order. The first one provides the reference
    /// solution for error comparisons.
    pub const ALL: [SolverKind; 6] = [
        SolverKind::NaiveGauss,
        SolverKind::Lu,
        SolverKind::Cholesky,
        SolverKind::ConjugateGradient,
        SolverKind::SparseConjugateGradient,
        SolverKind::GaussSeidel,
    ];

    /// Display name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::NaiveGauss => "Naive Gaussian Elimination",
            SolverKind::Lu => "LU Decomposition",
            SolverKind::Cholesky => "Cholesky Decomposition",
            SolverKind::ConjugateGradient => "Conjugate Gradient",
            SolverKind::SparseConjugateGradient => "Sparse Matrix CG",
            SolverKind::GaussSeidel => "Gauss-Seidel",
        }
    }

    /// Whitespace-free identifier for tabular output.
    pub fn id(&self) -> &'static str {
        match self {
            SolverKind::NaiveGauss => "NaiveGauss",
            SolverKind::Lu => "LU",
            SolverKind::Cholesky => "Cholesky",
            SolverKind::ConjugateGradient => "CG",
            SolverKind::SparseConjugateGradient => "SparseCG",
            SolverKind::GaussSeidel => "GaussSeidel",
        }
    }

    /// Solve function backing this variant.
    pub fn solve_fn(&self) -> SolveFn {
        match self {
            SolverKind::NaiveGauss => gauss::solve,
            SolverKind::Lu => lu::solve,
            SolverKind::Cholesky => cholesky::solve,
            SolverKind::ConjugateGradient => conjugate_gradient::solve,
            SolverKind::SparseConjugateGradient => conjugate_gradient::solve_sparse,
            SolverKind::GaussSeidel => gauss_seidel::solve,
        }
    }

    /// Solve `k·u = f`, consuming the private copies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Assembly`] if `k` is not square and
    /// [`Error::DimensionMismatch`] if `f` does not match its size.
    pub fn solve(&self, k: DenseMatrix, f: Vec<f64>, config: &SolverConfig) -> Result<SolveOutcome> {
        if !k.is_square() {
            return Err(Error::Assembly(format!(
                "{} needs a square matrix, got {}x{}",
                self.name(),
                k.nrows(),
                k.ncols()
            )));
        }
        if f.len() != k.nrows() {
            return Err(Error::DimensionMismatch {
                expected: k.nrows(),
                found: f.len(),
            });
        }
        Ok((self.solve_fn())(k, f, config))
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rough condition estimate: largest over smallest non-negligible `|k_ii|`.
///
/// Returns 0 when every diagonal entry is negligible.
pub fn diagonal_condition_estimate(k: &DenseMatrix) -> f64 {
    let n = k.nrows().min(k.ncols());
    let mut max_diag = 0.0_f64;
    let mut min_diag = f64::INFINITY;

    for i in 0..n {
        let v = k[(i, i)].abs();
        max_diag = max_diag.max(v);
        if v > PIVOT_TOLERANCE {
            min_diag = min_diag.min(v);
        }
    }

    if !min_diag.is_finite() {
        return 0.0;
    }
    let estimate = max_diag / min_diag;
    debug!("Diagonal condition estimate: {:.3e}", estimate);
    estimate
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Bytes of `count` vectors of length `n`.
pub(crate) fn vector_bytes(count: usize, n: usize) -> usize {
    count * n * std::mem::size_of::<f64>()
}
