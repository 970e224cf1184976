//! Stress recovery from displacement solution.
//!
//! After solving `K·U = F` for displacements, this module computes one
//! strain/stress state per element:
//! 1. Extract element nodal displacements from the global solution
//! 2. Compute strain at the element centre (ξ = η = 0): ε = B·u_e
//! 3. Compute stress: σ = D·ε
//! 4. Compute the plane-stress von Mises equivalent

use crate::element::{element_dofs, ElementDisplacements, Quad4};
use crate::error::{Error, Result};
use crate::material::Material;
use crate::mesh::{Mesh, Point2};
use crate::types::{StrainTensor, StressTensor};
use log::info;

/// Centroid results for a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStressStrain {
    /// Element index in the mesh.
    pub element_id: usize,
    /// Average of the element's nodal coordinates.
    pub centroid: Point2,
    pub strain: StrainTensor,
    pub stress: StressTensor,
    pub von_mises: f64,
}

/// Extremes over all elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressStatistics {
    pub min_stress_x: f64,
    pub max_stress_x: f64,
    pub min_stress_y: f64,
    pub max_stress_y: f64,
    pub max_von_mises: f64,
}

/// Stress recovery results for the entire mesh.
#[derive(Debug, Clone, Default)]
pub struct StressField {
    /// Element results indexed by element ID.
    pub elements: Vec<ElementStressStrain>,
}

impl StressField {
    /// Get results for a specific element.
    pub fn element(&self, elem_id: usize) -> Option<&ElementStressStrain> {
        self.elements.get(elem_id)
    }

    /// Number of elements with stress data.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Maximum von Mises stress across all elements (0 for an empty field).
    pub fn max_von_mises(&self) -> f64 {
        self.elements.iter().map(|e| e.von_mises).fold(0.0, f64::max)
    }

    /// Min/max normal stresses and the peak von Mises stress.
    pub fn statistics(&self) -> Option<StressStatistics> {
        let first = self.elements.first()?;
        let mut stats = StressStatistics {
            min_stress_x: first.stress.xx(),
            max_stress_x: first.stress.xx(),
            min_stress_y: first.stress.yy(),
            max_stress_y: first.stress.yy(),
            max_von_mises: first.von_mises,
        };

        for e in &self.elements[1..] {
            stats.min_stress_x = stats.min_stress_x.min(e.stress.xx());
            stats.max_stress_x = stats.max_stress_x.max(e.stress.xx());
            stats.min_stress_y = stats.min_stress_y.min(e.stress.yy());
            stats.max_stress_y = stats.max_stress_y.max(e.stress.yy());
            stats.max_von_mises = stats.max_von_mises.max(e.von_mises);
        }

        Some(stats)
    }
}

/// Recover centroid strains and stresses from a displacement solution.
///
/// # Arguments
///
/// * `mesh` - The finite element mesh
/// * `material` - Material properties (uniform for all elements)
/// * `displacements` - Global displacement vector from solver (`2·n_nodes`)
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `displacements` does not have one
/// entry per DOF.
pub fn recover_stresses(
    mesh: &Mesh,
    material: &Material,
    displacements: &[f64],
) -> Result<StressField> {
    if displacements.len() != mesh.n_dofs() {
        return Err(Error::DimensionMismatch {
            expected: mesh.n_dofs(),
            found: displacements.len(),
        });
    }

    let d = material.constitutive_plane_stress();
    let mut elements = Vec::with_capacity(mesh.n_elements());

    for (elem_idx, connectivity) in mesh.elements().iter().enumerate() {
        let coords = mesh
            .element_coords(elem_idx)
            .ok_or_else(|| Error::Mesh(format!("element {} references a missing node", elem_idx)))?;

        let dofs = element_dofs(&connectivity.nodes);
        let ue = ElementDisplacements::from_fn(|i, _| displacements[dofs[i]]);

        let strain = StrainTensor(Quad4::strain(&coords, &ue, 0.0, 0.0));
        let stress = StressTensor::from_strain(&strain, &d);
        let centroid = coords.iter().fold(Point2::zeros(), |acc, p| acc + p) / 4.0;

        elements.push(ElementStressStrain {
            element_id: elem_idx,
            centroid,
            strain,
            stress,
            von_mises: stress.von_mises(),
        });
    }

    let field = StressField { elements };
    info!(
        "Recovered stresses for {} elements, max von Mises {:.3} MPa",
        field.n_elements(),
        field.max_von_mises() / 1e6
    );
    Ok(field)
}
