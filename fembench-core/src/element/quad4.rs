//! 4-node bilinear quadrilateral in plane stress.
//!
//! # Shape Functions
//!
//! In natural coordinates (ξ, η) ∈ [-1, 1]²:
//! ```text
//! N_i = (1 + ξ_i*ξ)(1 + η_i*η) / 4
//! ```
//! where (ξ_i, η_i) = (±1, ±1) for node i.
//!
//! # Node Numbering
//!
//! ```text
//! 3 --- 2
//! |     |
//! 0 --- 1
//! ```
//!
//! # Degenerate Geometry
//!
//! The Jacobian determinant is not checked. A collapsed or inverted element
//! yields infinite or NaN entries in B (and therefore in the stiffness) rather
//! than an error.

use crate::element::gauss::gauss_quad;
use crate::material::Material;
use crate::mesh::Point2;
use nalgebra::{Matrix2, SMatrix, SVector, Vector3};

/// 3x8 strain-displacement matrix.
pub type StrainDisplacement = SMatrix<f64, 3, 8>;

/// 8x8 element stiffness matrix.
pub type ElementStiffness = SMatrix<f64, 8, 8>;

/// Element nodal displacements [u0, v0, u1, v1, u2, v2, u3, v3].
pub type ElementDisplacements = SVector<f64, 8>;

/// Number of points per direction of the stiffness integration rule.
const GAUSS_ORDER: usize = 2;

/// Bilinear plane-stress quadrilateral.
///
/// - 4 nodes at corners
/// - 2 DOFs per node (u, v displacements)
/// - 8 total DOFs
/// - 2×2 Gauss quadrature (4 integration points)
#[derive(Debug, Clone, Copy, Default)]
pub struct Quad4;

impl Quad4 {
    pub const N_NODES: usize = 4;
    pub const DOFS_PER_NODE: usize = 2;
    pub const N_DOFS: usize = 8;

    /// Node positions in natural coordinates.
    pub const NODE_COORDS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    /// Evaluate shape functions at natural coordinates (ξ, η).
    pub fn shape_functions(xi: f64, eta: f64) -> [f64; 4] {
        [
            0.25 * (1.0 - xi) * (1.0 - eta),
            0.25 * (1.0 + xi) * (1.0 - eta),
            0.25 * (1.0 + xi) * (1.0 + eta),
            0.25 * (1.0 - xi) * (1.0 + eta),
        ]
    }

    /// Shape function derivatives with respect to natural coordinates.
    ///
    /// Returns (dN/dξ, dN/dη).
    pub fn shape_derivatives(xi: f64, eta: f64) -> ([f64; 4], [f64; 4]) {
        let dn_dxi = [
            -0.25 * (1.0 - eta),
            0.25 * (1.0 - eta),
            0.25 * (1.0 + eta),
            -0.25 * (1.0 + eta),
        ];
        let dn_deta = [
            -0.25 * (1.0 - xi),
            -0.25 * (1.0 + xi),
            0.25 * (1.0 + xi),
            0.25 * (1.0 - xi),
        ];
        (dn_dxi, dn_deta)
    }

    /// Jacobian of the natural-to-physical map at (ξ, η).
    ///
    /// ```text
    /// J = [[∂x/∂ξ, ∂y/∂ξ],
    ///      [∂x/∂η, ∂y/∂η]]
    /// ```
    pub fn jacobian(coords: &[Point2; 4], xi: f64, eta: f64) -> Matrix2<f64> {
        let (dn_dxi, dn_deta) = Self::shape_derivatives(xi, eta);

        let mut j = Matrix2::zeros();
        for (i, p) in coords.iter().enumerate() {
            j[(0, 0)] += dn_dxi[i] * p.x;
            j[(0, 1)] += dn_dxi[i] * p.y;
            j[(1, 0)] += dn_deta[i] * p.x;
            j[(1, 1)] += dn_deta[i] * p.y;
        }
        j
    }

    /// Strain-displacement matrix B at (ξ, η), so that ε = B·u_e.
    ///
    /// Per node i the column pair is `[dN/dx, 0; 0, dN/dy; dN/dy, dN/dx]`.
    pub fn strain_displacement(coords: &[Point2; 4], xi: f64, eta: f64) -> StrainDisplacement {
        let (dn_dxi, dn_deta) = Self::shape_derivatives(xi, eta);
        let j = Self::jacobian(coords, xi, eta);

        // Explicit 2x2 inverse; det(J) = 0 propagates inf/NaN into B
        let det_j = j[(0, 0)] * j[(1, 1)] - j[(0, 1)] * j[(1, 0)];
        let j_inv = Matrix2::new(
            j[(1, 1)] / det_j,
            -j[(0, 1)] / det_j,
            -j[(1, 0)] / det_j,
            j[(0, 0)] / det_j,
        );

        let mut b = StrainDisplacement::zeros();
        for i in 0..4 {
            let dn_dx = j_inv[(0, 0)] * dn_dxi[i] + j_inv[(0, 1)] * dn_deta[i];
            let dn_dy = j_inv[(1, 0)] * dn_dxi[i] + j_inv[(1, 1)] * dn_deta[i];

            let col = 2 * i;
            b[(0, col)] = dn_dx;
            b[(1, col + 1)] = dn_dy;
            b[(2, col)] = dn_dy;
            b[(2, col + 1)] = dn_dx;
        }
        b
    }

    /// Element stiffness by 2×2 Gauss quadrature.
    ///
    /// `Ke = Σ Bᵀ·D·B · det(J) · w · t`
    pub fn stiffness(coords: &[Point2; 4], material: &Material) -> ElementStiffness {
        let d = material.constitutive_plane_stress();
        let mut k = ElementStiffness::zeros();

        for gp in gauss_quad(GAUSS_ORDER) {
            let b = Self::strain_displacement(coords, gp.xi(), gp.eta());
            let det_j = Self::jacobian(coords, gp.xi(), gp.eta()).determinant();

            k += b.transpose() * (d * b) * (det_j * gp.weight * material.thickness);
        }

        k
    }

    /// Strain [ε_xx, ε_yy, γ_xy] at (ξ, η) for the given nodal displacements.
    pub fn strain(
        coords: &[Point2; 4],
        displacements: &ElementDisplacements,
        xi: f64,
        eta: f64,
    ) -> Vector3<f64> {
        Self::strain_displacement(coords, xi, eta) * displacements
    }

    /// Element area by 2×2 Gauss quadrature of det(J).
    pub fn area(coords: &[Point2; 4]) -> f64 {
        gauss_quad(GAUSS_ORDER)
            .iter()
            .map(|gp| gp.weight * Self::jacobian(coords, gp.xi(), gp.eta()).determinant())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> [Point2; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    fn rectangle(w: f64, h: f64) -> [Point2; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }

    #[test]
    fn test_shape_functions_sum_to_one() {
        for (xi, eta) in [(0.0, 0.0), (0.5, 0.5), (-0.5, 0.3), (0.0, 1.0), (-1.0, -1.0)] {
            let n = Quad4::shape_functions(xi, eta);
            let sum: f64 = n.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_shape_functions_at_nodes() {
        for (i, &(xi_i, eta_i)) in Quad4::NODE_COORDS.iter().enumerate() {
            let n = Quad4::shape_functions(xi_i, eta_i);
            for (j, &nj) in n.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(nj, expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_shape_derivatives_sum_to_zero() {
        let (dxi, deta) = Quad4::shape_derivatives(0.3, -0.7);
        assert_relative_eq!(dxi.iter().sum::<f64>(), 0.0, epsilon = 1e-15);
        assert_relative_eq!(deta.iter().sum::<f64>(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_jacobian_of_rectangle() {
        // x = w(1+ξ)/2, y = h(1+η)/2, so J = diag(w/2, h/2) everywhere
        let coords = rectangle(2.0, 0.5);
        let j = Quad4::jacobian(&coords, 0.2, -0.4);
        assert_relative_eq!(j[(0, 0)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(j[(1, 1)], 0.25, epsilon = 1e-14);
        assert_relative_eq!(j[(0, 1)], 0.0, epsilon = 1e-14);
        assert_relative_eq!(j[(1, 0)], 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_b_matrix_pattern() {
        let b = Quad4::strain_displacement(&unit_square(), 0.0, 0.0);
        for i in 0..4 {
            let col = 2 * i;
            assert_eq!(b[(0, col + 1)], 0.0);
            assert_eq!(b[(1, col)], 0.0);
            assert_relative_eq!(b[(2, col)], b[(1, col + 1)]);
            assert_relative_eq!(b[(2, col + 1)], b[(0, col)]);
        }
        // At the centre of the unit square dN0/dx = -0.5
        assert_relative_eq!(b[(0, 0)], -0.5, epsilon = 1e-14);
    }

    #[test]
    fn test_degenerate_element_gives_non_finite_b() {
        let collapsed = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ];
        let b = Quad4::strain_displacement(&collapsed, 0.0, 0.0);
        assert!(b.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_stiffness_symmetric() {
        let k = Quad4::stiffness(&unit_square(), &Material::steel());
        let scale = k.amax();
        for i in 0..8 {
            for j in 0..8 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-12 * scale, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_stiffness_positive_diagonal() {
        let k = Quad4::stiffness(&unit_square(), &Material::steel());
        for i in 0..8 {
            assert!(k[(i, i)] > 0.0, "K[{0},{0}] = {1} should be positive", i, k[(i, i)]);
        }
    }

    #[test]
    fn test_stiffness_rigid_body_modes() {
        let mat = Material::new(1.0, 0.3, 1.0).unwrap();
        let k = Quad4::stiffness(&unit_square(), &mat);

        let u_x = ElementDisplacements::from_column_slice(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_relative_eq!((k * u_x).norm(), 0.0, epsilon = 1e-12);

        let u_y = ElementDisplacements::from_column_slice(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        assert_relative_eq!((k * u_y).norm(), 0.0, epsilon = 1e-12);

        // Infinitesimal rotation about the origin: u = -y, v = x
        let coords = unit_square();
        let mut rot = ElementDisplacements::zeros();
        for (i, p) in coords.iter().enumerate() {
            rot[2 * i] = -p.y;
            rot[2 * i + 1] = p.x;
        }
        assert_relative_eq!((k * rot).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stiffness_scales_with_thickness() {
        let thin = Material::new(1e6, 0.25, 0.01).unwrap();
        let thick = Material::new(1e6, 0.25, 0.02).unwrap();
        let k1 = Quad4::stiffness(&unit_square(), &thin);
        let k2 = Quad4::stiffness(&unit_square(), &thick);
        for i in 0..8 {
            assert_relative_eq!(k2[(i, i)], 2.0 * k1[(i, i)], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_constant_strain_patch() {
        let coords = rectangle(2.0, 1.0);

        // u = 0.001 x  ->  ε_xx = 0.001 everywhere
        let mut u = ElementDisplacements::zeros();
        for (i, p) in coords.iter().enumerate() {
            u[2 * i] = 0.001 * p.x;
        }

        for (xi, eta) in [(0.0, 0.0), (0.5, -0.5), (-0.9, 0.9)] {
            let eps = Quad4::strain(&coords, &u, xi, eta);
            assert_relative_eq!(eps[0], 0.001, epsilon = 1e-14);
            assert_relative_eq!(eps[1], 0.0, epsilon = 1e-14);
            assert_relative_eq!(eps[2], 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_area() {
        assert_relative_eq!(Quad4::area(&rectangle(2.0, 0.5)), 1.0, epsilon = 1e-14);

        let parallelogram = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.5, 1.0),
            Point2::new(0.5, 1.0),
        ];
        assert_relative_eq!(Quad4::area(&parallelogram), 1.0, epsilon = 1e-14);
    }
}
