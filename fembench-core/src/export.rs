//! Whitespace-delimited text tables.
//!
//! Lines starting with `#` are comments; every data row is a single line of
//! space-separated fields, so the tables load directly into plotting tools.

use crate::benchmark::{BenchmarkResult, Comparison};
use crate::error::Result;
use crate::stress::StressField;
use std::io::Write;

/// Write one row per solver: `id time memory iterations residual`.
///
/// The solver column uses [`SolverKind::id`](crate::solver::SolverKind::id)
/// so that it never contains whitespace.
pub fn write_benchmark_table<W: Write>(writer: &mut W, results: &[BenchmarkResult]) -> Result<()> {
    writeln!(writer, "# Solver benchmark results")?;
    writeln!(writer, "# Solver Time(s) Memory(MB) Iterations Residual")?;
    for r in results {
        writeln!(
            writer,
            "{} {:.6} {:.6} {} {:.6e}",
            r.solver.id(),
            r.elapsed_seconds,
            r.memory_mb,
            r.iterations,
            r.residual
        )?;
    }
    Ok(())
}

/// Write one row per element with centroid, strain, stress and von Mises.
pub fn write_stress_table<W: Write>(writer: &mut W, field: &StressField) -> Result<()> {
    writeln!(writer, "# Element stress/strain results")?;
    writeln!(
        writer,
        "# ElemID CenterX CenterY StrainX StrainY ShearXY StressX StressY ShearXY VonMises"
    )?;
    for e in &field.elements {
        writeln!(
            writer,
            "{} {} {} {:e} {:e} {:e} {:e} {:e} {:e} {:e}",
            e.element_id,
            e.centroid.x,
            e.centroid.y,
            e.strain.xx(),
            e.strain.yy(),
            e.strain.xy(),
            e.stress.xx(),
            e.stress.yy(),
            e.stress.xy(),
            e.von_mises
        )?;
    }
    Ok(())
}

/// Write a fixed-width ranking of solvers, fastest marked with `*`.
pub fn write_comparison_table<W: Write>(
    writer: &mut W,
    rows: &[Comparison],
    improvement_percent: Option<f64>,
) -> Result<()> {
    let rule = "=".repeat(90);
    writeln!(writer, "{}", rule)?;
    writeln!(writer, "SOLVER PERFORMANCE COMPARISON")?;
    writeln!(writer, "{}", rule)?;
    writeln!(
        writer,
        "{:<30}{:>15}{:>15}{:>15}{:>15}",
        "Solver", "Time (s)", "Speedup", "Residual", "Error"
    )?;
    writeln!(writer, "{}", "-".repeat(90))?;

    for row in rows {
        writeln!(
            writer,
            "{:<30}{:>15.6}{:>14.2}x{:>15.3e}{:>15.3e}",
            row.solver.name(),
            row.elapsed_seconds,
            row.speedup,
            row.residual,
            row.relative_error
        )?;
    }
    writeln!(writer, "{}", rule)?;

    if let Some(fastest) = rows.iter().find(|r| r.fastest) {
        writeln!(
            writer,
            "* Fastest solver: {} ({:.6} seconds)",
            fastest.solver.name(),
            fastest.elapsed_seconds
        )?;
    }
    if let Some(pct) = improvement_percent {
        writeln!(writer, "* Performance improvement: {:.1}% faster than slowest method", pct)?;
    }
    Ok(())
}
