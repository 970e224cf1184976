//! Material property definitions.
//!
//! Only isotropic linear elastic plates in plane stress are modelled, so the
//! thickness travels with the material rather than with the element.

use crate::error::{Error, Result};
use nalgebra::Matrix3;

/// Plane-stress constitutive matrix mapping [ε_xx, ε_yy, γ_xy] to [σ_xx, σ_yy, τ_xy].
pub type ConstitutiveMatrix = Matrix3<f64>;

/// Material properties for a plate in plane stress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Young's modulus E (Pa).
    pub youngs_modulus: f64,
    /// Poisson's ratio ν (dimensionless).
    pub poissons_ratio: f64,
    /// Plate thickness t (m).
    pub thickness: f64,
}

impl Material {
    /// Create a new isotropic plane-stress material.
    ///
    /// # Arguments
    ///
    /// * `youngs_modulus` - Young's modulus E (Pa)
    /// * `poissons_ratio` - Poisson's ratio ν (0 ≤ ν < 0.5)
    /// * `thickness` - Plate thickness t (m)
    ///
    /// # Errors
    ///
    /// Returns error if material properties are physically invalid.
    pub fn new(youngs_modulus: f64, poissons_ratio: f64, thickness: f64) -> Result<Self> {
        if !(youngs_modulus > 0.0) {
            return Err(Error::InvalidMaterial(
                "Young's modulus must be positive".into(),
            ));
        }
        if !(0.0..0.5).contains(&poissons_ratio) {
            return Err(Error::InvalidMaterial(
                "Poisson's ratio must be in range [0, 0.5)".into(),
            ));
        }
        if !(thickness > 0.0) {
            return Err(Error::InvalidMaterial("Thickness must be positive".into()));
        }
        Ok(Self {
            youngs_modulus,
            poissons_ratio,
            thickness,
        })
    }

    /// Structural steel plate, 5 mm thick (E = 210 GPa, ν = 0.3).
    pub fn steel() -> Self {
        Self {
            youngs_modulus: 210e9,
            poissons_ratio: 0.3,
            thickness: 0.005,
        }
    }

    /// Shear modulus G = E / (2(1 + ν)).
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poissons_ratio))
    }

    /// Plane stress constitutive matrix D.
    ///
    /// With `factor = E / (1 - ν²)`:
    /// ```text
    /// D = factor * [1  ν  0        ]
    ///              [ν  1  0        ]
    ///              [0  0  (1 - ν)/2]
    /// ```
    pub fn constitutive_plane_stress(&self) -> ConstitutiveMatrix {
        let e = self.youngs_modulus;
        let nu = self.poissons_ratio;

        let factor = e / (1.0 - nu * nu);

        Matrix3::new(
            factor,      factor * nu, 0.0,
            factor * nu, factor,      0.0,
            0.0,         0.0,         factor * (1.0 - nu) / 2.0,
        )
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
