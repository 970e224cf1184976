//! Plate analysis driver.
//!
//! A [`PlateModel`] owns the mesh, the material and the assembled global
//! stiffness. The stiffness is never modified after assembly; every load case
//! works on its own copy with the left edge clamped.

use crate::assembly::{assemble_global_stiffness, LinearSystem};
use crate::benchmark::{compare, improvement_percent, run_benchmark, BenchmarkResult, Comparison};
use crate::dense::DenseMatrix;
use crate::element::{ElementStiffness, Quad4, StrainDisplacement};
use crate::error::{Error, Result};
use crate::loads::LoadCase;
use crate::material::{ConstitutiveMatrix, Material};
use crate::mesh::Mesh;
use crate::solver::{diagonal_condition_estimate, SolverConfig};
use crate::stress::{recover_stresses, StressField};
use log::info;

/// Geometry, resolution and material of a rectangular plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateConfig {
    /// Elements along x.
    pub nx: usize,
    /// Elements along y.
    pub ny: usize,
    pub width: f64,
    pub height: f64,
    pub material: Material,
}

impl Default for PlateConfig {
    /// 20 × 10 elements on a 1.0 m × 0.5 m steel plate.
    fn default() -> Self {
        Self {
            nx: 20,
            ny: 10,
            width: 1.0,
            height: 0.5,
            material: Material::steel(),
        }
    }
}

/// Meshed plate with its assembled stiffness.
#[derive(Debug, Clone)]
pub struct PlateModel {
    mesh: Mesh,
    material: Material,
    global_stiffness: DenseMatrix,
}

impl PlateModel {
    /// Mesh the plate and assemble `K`.
    pub fn new(config: &PlateConfig) -> Result<Self> {
        let mesh = Mesh::rectangular(config.nx, config.ny, config.width, config.height)?;
        Self::from_mesh(mesh, config.material)
    }

    /// Assemble `K` for an existing mesh.
    pub fn from_mesh(mesh: Mesh, material: Material) -> Result<Self> {
        let global_stiffness = assemble_global_stiffness(&mesh, &material)?;
        Ok(Self {
            mesh,
            material,
            global_stiffness,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// The assembled, unconstrained global stiffness.
    pub fn global_stiffness(&self) -> &DenseMatrix {
        &self.global_stiffness
    }

    pub fn n_dofs(&self) -> usize {
        self.mesh.n_dofs()
    }

    /// Plane-stress constitutive matrix D.
    pub fn constitutive(&self) -> ConstitutiveMatrix {
        self.material.constitutive_plane_stress()
    }

    /// 8×8 stiffness of element `elem_id`.
    pub fn element_stiffness(&self, elem_id: usize) -> Result<ElementStiffness> {
        Ok(Quad4::stiffness(&self.coords(elem_id)?, &self.material))
    }

    /// Strain-displacement matrix B of element `elem_id` at (ξ, η).
    pub fn strain_displacement(&self, xi: f64, eta: f64, elem_id: usize) -> Result<StrainDisplacement> {
        Ok(Quad4::strain_displacement(&self.coords(elem_id)?, xi, eta))
    }

    /// Copy of `K` with the load vector of `case` and the left edge fixed.
    pub fn build_system(&self, case: &LoadCase) -> Result<LinearSystem> {
        let f = case.load_vector(&self.mesh)?;
        let mut system = LinearSystem::new(self.global_stiffness.clone(), f)?;
        system.fix_nodes(&self.mesh.left_edge_nodes())?;
        Ok(system)
    }

    fn coords(&self, elem_id: usize) -> Result<[crate::mesh::Point2; 4]> {
        self.mesh.element_coords(elem_id).ok_or_else(|| {
            Error::Mesh(format!(
                "element {} out of range ({} elements)",
                elem_id,
                self.mesh.n_elements()
            ))
        })
    }
}

/// Everything computed for one load case.
#[derive(Debug, Clone)]
pub struct LoadCaseReport {
    pub case: LoadCase,
    pub description: String,
    /// Diagonal ratio of the constrained stiffness.
    pub condition_estimate: f64,
    /// One entry per solver, reference solver first.
    pub results: Vec<BenchmarkResult>,
    pub comparison: Vec<Comparison>,
    pub improvement_percent: Option<f64>,
    /// Stresses recovered from the reference solution.
    pub stresses: StressField,
}

/// Benchmark all solvers on one load case and recover stresses.
pub fn analyze_load_case(
    model: &PlateModel,
    case: &LoadCase,
    config: &SolverConfig,
) -> Result<LoadCaseReport> {
    let description = case.description();
    info!("Analyzing load case: {}", description);

    let system = model.build_system(case)?;
    let condition_estimate = diagonal_condition_estimate(&system.stiffness);

    let results = run_benchmark(&system, config)?;
    let comparison = compare(&results)?;
    let improvement = improvement_percent(&results);

    let reference = results
        .first()
        .map(|r| r.solution.as_slice())
        .ok_or_else(|| Error::Assembly("no solver results".into()))?;
    let stresses = recover_stresses(model.mesh(), model.material(), reference)?;

    Ok(LoadCaseReport {
        case: *case,
        description,
        condition_estimate,
        results,
        comparison,
        improvement_percent: improvement,
        stresses,
    })
}

/// Run [`LoadCase::STANDARD`] one after another.
pub fn analyze_standard_cases(
    model: &PlateModel,
    config: &SolverConfig,
) -> Result<Vec<LoadCaseReport>> {
    LoadCase::STANDARD
        .iter()
        .map(|case| analyze_load_case(model, case, config))
        .collect()
}
