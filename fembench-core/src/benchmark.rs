//! Solver benchmarking.
//!
//! Each solver runs on its own clone of `(K, F)`. Residuals are measured
//! against the caller's unmodified system, and relative errors against the
//! first solver's solution.

use crate::assembly::LinearSystem;
use crate::dense::DenseMatrix;
use crate::error::{Error, Result};
use crate::solver::{SolverConfig, SolverKind};
use log::info;
use std::time::Instant;

/// Reference norms below this fall back to absolute error.
const REFERENCE_NORM_FLOOR: f64 = 1e-15;

/// Monotonic wall-clock timer.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start timing now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds since [`Stopwatch::start`].
    pub fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

/// Measurements for one solver on one system.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub solver: SolverKind,
    pub elapsed_seconds: f64,
    /// Estimated working set in MiB.
    pub memory_mb: f64,
    pub iterations: usize,
    /// `‖K·U − F‖₂` against the original system.
    pub residual: f64,
    pub converged: bool,
    pub solution: Vec<f64>,
}

impl BenchmarkResult {
    /// Display name of the solver.
    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }
}

/// Time one solver on a private copy of `system`.
pub fn benchmark_solver(
    kind: SolverKind,
    system: &LinearSystem,
    config: &SolverConfig,
) -> Result<BenchmarkResult> {
    let k = system.stiffness.clone();
    let f = system.rhs.clone();

    let timer = Stopwatch::start();
    let outcome = kind.solve(k, f, config)?;
    let elapsed_seconds = timer.elapsed_seconds();

    let residual = compute_residual(&system.stiffness, &outcome.solution, &system.rhs)?;
    info!(
        "{}: {:.6} s, {} iterations, residual {:.3e}",
        kind.name(),
        elapsed_seconds,
        outcome.iterations,
        residual
    );

    Ok(BenchmarkResult {
        solver: kind,
        elapsed_seconds,
        memory_mb: outcome.memory_mb(),
        iterations: outcome.iterations,
        residual,
        converged: outcome.converged,
        solution: outcome.solution,
    })
}

/// Run `kinds` in order on `system`.
pub fn run_solvers(
    kinds: &[SolverKind],
    system: &LinearSystem,
    config: &SolverConfig,
) -> Result<Vec<BenchmarkResult>> {
    kinds
        .iter()
        .map(|&kind| benchmark_solver(kind, system, config))
        .collect()
}

/// Run every solver in [`SolverKind::ALL`] order.
pub fn run_benchmark(system: &LinearSystem, config: &SolverConfig) -> Result<Vec<BenchmarkResult>> {
    run_solvers(&SolverKind::ALL, system, config)
}

/// `‖K·U − F‖₂`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `u` or `f` does not match `k`.
pub fn compute_residual(k: &DenseMatrix, u: &[f64], f: &[f64]) -> Result<f64> {
    for len in [u.len(), f.len()] {
        if len != k.nrows() || len != k.ncols() {
            return Err(Error::DimensionMismatch {
                expected: k.nrows(),
                found: len,
            });
        }
    }
    let ku = k.mul_vec(u);
    Ok(ku
        .iter()
        .zip(f)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt())
}

/// Euclidean distance between two solutions.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] for vectors of unequal length.
pub fn compare_solutions(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

/// Euclidean norm.
pub fn solution_norm(u: &[f64]) -> f64 {
    u.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// `‖computed − reference‖₂ / ‖reference‖₂`, or the absolute difference when
/// the reference is essentially zero.
pub fn relative_error(computed: &[f64], reference: &[f64]) -> Result<f64> {
    let error = compare_solutions(computed, reference)?;
    let ref_norm = solution_norm(reference);
    if ref_norm < REFERENCE_NORM_FLOOR {
        return Ok(error);
    }
    Ok(error / ref_norm)
}

/// One row of the ranked comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub solver: SolverKind,
    pub elapsed_seconds: f64,
    /// Slowest time divided by this solver's time.
    pub speedup: f64,
    pub residual: f64,
    /// Relative error against the first result's solution.
    pub relative_error: f64,
    /// Set on the minimum-time entry only.
    pub fastest: bool,
}

/// Rank results against the slowest run and the first solver's solution.
///
/// Rows keep the order of `results`.
pub fn compare(results: &[BenchmarkResult]) -> Result<Vec<Comparison>> {
    let Some(first) = results.first() else {
        return Ok(Vec::new());
    };
    let reference = &first.solution;
    let slowest = slowest_time(results);
    let fastest_idx = fastest_index(results);

    results
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            Ok(Comparison {
                solver: r.solver,
                elapsed_seconds: r.elapsed_seconds,
                speedup: speedup(slowest, r.elapsed_seconds),
                residual: r.residual,
                relative_error: relative_error(&r.solution, reference)?,
                fastest: Some(idx) == fastest_idx,
            })
        })
        .collect()
}

/// How much faster the fastest solver was than the slowest, in percent.
pub fn improvement_percent(results: &[BenchmarkResult]) -> Option<f64> {
    let fastest = &results[fastest_index(results)?];
    Some((speedup(slowest_time(results), fastest.elapsed_seconds) - 1.0) * 100.0)
}

fn slowest_time(results: &[BenchmarkResult]) -> f64 {
    results
        .iter()
        .map(|r| r.elapsed_seconds)
        .fold(0.0, f64::max)
}

fn fastest_index(results: &[BenchmarkResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.elapsed_seconds.total_cmp(&b.elapsed_seconds))
        .map(|(idx, _)| idx)
}

/// A zero-duration run counts as matching the slowest.
fn speedup(slowest: f64, elapsed: f64) -> f64 {
    if elapsed > 0.0 {
        slowest / elapsed
    } else {
        1.0
    }
}
