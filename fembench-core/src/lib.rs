//! fembench core - plane-stress FEM assembly and solver benchmarking
//!
//! Builds the stiffness system of a rectangular plate meshed with bilinear
//! quadrilaterals and times six linear solvers against it:
//! - Quad4 plane-stress element with 2×2 Gauss quadrature
//! - Dense global assembly and clamped-edge boundary conditions
//! - Direct (Gauss, LU, Cholesky) and iterative (CG, sparse CG, Gauss-Seidel) solvers
//! - Residual/error metrics, ranking and text-table export
//!
//! # Architecture
//!
//! - [`Mesh`]: Connectivity and nodal coordinates
//! - [`Material`]: Plane-stress material with thickness
//! - [`Quad4`]: Element shape functions, B matrix and stiffness
//! - [`DenseMatrix`] / [`CsrMatrix`]: Row-major and compressed-row storage
//! - [`SolverKind`]: Registry of solving strategies sharing one entry point
//! - [`PlateModel`]: Assembled plate driving per-load-case benchmarks
//!
//! # Example
//!
//! ```
//! use fembench_core::{analyze_load_case, LoadCase, PlateConfig, PlateModel, SolverConfig};
//!
//! let model = PlateModel::new(&PlateConfig { nx: 4, ny: 2, ..PlateConfig::default() }).unwrap();
//! let report = analyze_load_case(&model, &LoadCase::Concentrated15kN, &SolverConfig::default()).unwrap();
//! assert_eq!(report.results.len(), 6);
//! ```

pub mod analysis;
pub mod assembly;
pub mod benchmark;
pub mod dense;
pub mod element;
pub mod error;
pub mod export;
pub mod loads;
pub mod material;
pub mod mesh;
pub mod solver;
pub mod sparse;
pub mod stress;
pub mod types;

pub use analysis::{analyze_load_case, analyze_standard_cases, LoadCaseReport, PlateConfig, PlateModel};
pub use assembly::{apply_fixed_nodes, assemble_global_stiffness, LinearSystem};
pub use benchmark::{BenchmarkResult, Comparison, Stopwatch};
pub use dense::DenseMatrix;
pub use element::Quad4;
pub use error::{Error, Result};
pub use loads::LoadCase;
pub use material::Material;
pub use mesh::Mesh;
pub use solver::{SolveOutcome, SolverConfig, SolverKind};
pub use sparse::CsrMatrix;
pub use stress::{recover_stresses, StressField};
pub use types::{StrainTensor, StressTensor};
