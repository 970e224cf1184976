//! Isoparametric element formulation.
//!
//! # Submodules
//!
//! - [`gauss`] - Gauss quadrature rules for numerical integration
//! - [`quad4`] - Bilinear plane-stress quadrilateral

pub mod gauss;
pub mod quad4;

pub use gauss::{gauss_1d, gauss_quad, GaussPoint};
pub use quad4::{ElementDisplacements, ElementStiffness, Quad4, StrainDisplacement};

/// Global DOF indices of a 4-node element, in local order
/// `[2n0, 2n0+1, 2n1, 2n1+1, ...]`.
pub fn element_dofs(nodes: &[usize; 4]) -> [usize; 8] {
    let mut dofs = [0; 8];
    for (local, &node) in nodes.iter().enumerate() {
        dofs[2 * local] = 2 * node;
        dofs[2 * local + 1] = 2 * node + 1;
    }
    dofs
}
