//! Plane-stress tensor types.
//!
//! Both tensors use Voigt notation with three components, shear last.

use crate::material::ConstitutiveMatrix;
use nalgebra::{Matrix2, Vector3};

/// In-plane stress in Voigt notation: [σ_xx, σ_yy, τ_xy].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressTensor(pub Vector3<f64>);

impl StressTensor {
    pub fn new(components: [f64; 3]) -> Self {
        Self(Vector3::from_row_slice(&components))
    }

    /// Zero stress state.
    pub fn zero() -> Self {
        Self(Vector3::zeros())
    }

    /// Stress from engineering strain: σ = D·ε.
    pub fn from_strain(strain: &StrainTensor, d: &ConstitutiveMatrix) -> Self {
        Self(d * strain.0)
    }

    #[inline]
    pub fn xx(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn yy(&self) -> f64 {
        self.0[1]
    }

    #[inline]
    pub fn xy(&self) -> f64 {
        self.0[2]
    }

    /// Von Mises equivalent stress under plane stress (σ_zz = 0).
    pub fn von_mises(&self) -> f64 {
        let (sx, sy, txy) = (self.xx(), self.yy(), self.xy());
        (sx * sx - sx * sy + sy * sy + 3.0 * txy * txy).sqrt()
    }

    /// The 2x2 symmetric stress matrix.
    pub fn to_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.xx(), self.xy(), self.xy(), self.yy())
    }
}

/// In-plane strain in Voigt notation: [ε_xx, ε_yy, γ_xy].
///
/// γ_xy is the engineering shear strain, 2ε_xy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrainTensor(pub Vector3<f64>);

impl StrainTensor {
    pub fn new(components: [f64; 3]) -> Self {
        Self(Vector3::from_row_slice(&components))
    }

    /// Zero strain state.
    pub fn zero() -> Self {
        Self(Vector3::zeros())
    }

    #[inline]
    pub fn xx(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn yy(&self) -> f64 {
        self.0[1]
    }

    #[inline]
    pub fn xy(&self) -> f64 {
        self.0[2]
    }

    /// The 2x2 symmetric strain matrix (off-diagonal γ/2).
    pub fn to_matrix(&self) -> Matrix2<f64> {
        let half = self.xy() / 2.0;
        Matrix2::new(self.xx(), half, half, self.yy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use approx::assert_relative_eq;

    #[test]
    fn test_von_mises_uniaxial() {
        let stress = StressTensor::new([100.0, 0.0, 0.0]);
        assert_relative_eq!(stress.von_mises(), 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_von_mises_pure_shear() {
        // von Mises = √3·τ
        let stress = StressTensor::new([0.0, 0.0, 100.0]);
        assert_relative_eq!(stress.von_mises(), 100.0 * 3.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_von_mises_equibiaxial() {
        let stress = StressTensor::new([50.0, 50.0, 0.0]);
        assert_relative_eq!(stress.von_mises(), 50.0, epsilon = 1e-10);
    }

    #[test]
    fn test_stress_from_strain() {
        let material = Material::new(1000.0, 0.25, 1.0).unwrap();
        let d = material.constitutive_plane_stress();
        let strain = StrainTensor::new([0.001, 0.0, 0.002]);
        let stress = StressTensor::from_strain(&strain, &d);

        let factor = 1000.0 / (1.0 - 0.0625);
        assert_relative_eq!(stress.xx(), factor * 0.001, epsilon = 1e-12);
        assert_relative_eq!(stress.yy(), factor * 0.25 * 0.001, epsilon = 1e-12);
        assert_relative_eq!(stress.xy(), factor * 0.375 * 0.002, epsilon = 1e-12);
    }

    #[test]
    fn test_strain_matrix_halves_shear() {
        let m = StrainTensor::new([0.1, 0.2, 0.4]).to_matrix();
        assert_relative_eq!(m[(0, 1)], 0.2);
        assert_relative_eq!(m[(1, 0)], 0.2);
        assert_eq!(StrainTensor::zero().0, Vector3::zeros());
    }
}
