//! Gauss quadrature rules for numerical integration.
//!
//! Standard Gauss-Legendre rules on `[-1, 1]` and their tensor product on the
//! reference square `[-1, 1]²` used by the quadrilateral element.
//!
//! # Usage
//!
//! ```
//! use fembench_core::element::gauss::gauss_quad;
//!
//! // 2x2 rule: points at ±1/√3, unit weights
//! let area: f64 = gauss_quad(2).iter().map(|gp| gp.weight).sum();
//! assert!((area - 4.0).abs() < 1e-14);
//! ```

/// A Gauss quadrature point on the reference square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussPoint {
    /// Natural coordinates [ξ, η].
    pub coords: [f64; 2],
    /// Integration weight.
    pub weight: f64,
}

impl GaussPoint {
    pub fn new(xi: f64, eta: f64, weight: f64) -> Self {
        Self {
            coords: [xi, eta],
            weight,
        }
    }

    #[inline]
    pub fn xi(&self) -> f64 {
        self.coords[0]
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.coords[1]
    }
}

/// 1D Gauss-Legendre quadrature points and weights.
///
/// Returns (point, weight) pairs for integration on [-1, 1].
///
/// # Arguments
///
/// * `n` - Number of integration points (1, 2, or 3)
///
/// # Panics
///
/// Panics if `n` is not in 1..=3.
pub fn gauss_1d(n: usize) -> Vec<(f64, f64)> {
    match n {
        1 => vec![(0.0, 2.0)],
        2 => {
            let p = 1.0 / 3.0_f64.sqrt();
            vec![(-p, 1.0), (p, 1.0)]
        }
        3 => {
            let p = (3.0 / 5.0_f64).sqrt();
            vec![(-p, 5.0 / 9.0), (0.0, 8.0 / 9.0), (p, 5.0 / 9.0)]
        }
        _ => panic!("gauss_1d: n must be 1, 2, or 3, got {}", n),
    }
}

/// Quadrilateral Gauss quadrature points.
///
/// Tensor product of the 1D rule, ξ varying slowest. Returns n² points.
///
/// # Panics
///
/// Panics if `n` is not in 1..=3.
pub fn gauss_quad(n: usize) -> Vec<GaussPoint> {
    let rule_1d = gauss_1d(n);
    let mut points = Vec::with_capacity(n * n);

    for &(xi, w_xi) in &rule_1d {
        for &(eta, w_eta) in &rule_1d {
            points.push(GaussPoint::new(xi, eta, w_xi * w_eta));
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gauss_1d_integrates_polynomials() {
        // 2-point rule is exact up to degree 3
        let rule = gauss_1d(2);
        let cubic: f64 = rule.iter().map(|&(x, w)| x.powi(3) * w).sum();
        assert_relative_eq!(cubic, 0.0, epsilon = 1e-14);

        let quadratic: f64 = rule.iter().map(|&(x, w)| x.powi(2) * w).sum();
        assert_relative_eq!(quadratic, 2.0 / 3.0, epsilon = 1e-14);

        // 3-point rule is exact up to degree 5: ∫x⁴ = 2/5
        let rule = gauss_1d(3);
        let quartic: f64 = rule.iter().map(|&(x, w)| x.powi(4) * w).sum();
        assert_relative_eq!(quartic, 0.4, epsilon = 1e-14);
    }

    #[test]
    fn test_gauss_1d_weights_sum() {
        for n in 1..=3 {
            let sum: f64 = gauss_1d(n).iter().map(|&(_, w)| w).sum();
            assert_relative_eq!(sum, 2.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_gauss_quad_2x2_points() {
        let p = 1.0 / 3.0_f64.sqrt();
        let rule = gauss_quad(2);
        assert_eq!(rule.len(), 4);
        for gp in &rule {
            assert_relative_eq!(gp.xi().abs(), p, epsilon = 1e-15);
            assert_relative_eq!(gp.eta().abs(), p, epsilon = 1e-15);
            assert_relative_eq!(gp.weight, 1.0);
        }
    }

    #[test]
    fn test_gauss_quad_weights_sum() {
        for n in 1..=3 {
            let sum: f64 = gauss_quad(n).iter().map(|gp| gp.weight).sum();
            assert_relative_eq!(sum, 4.0, epsilon = 1e-14);
        }
    }

    #[test]
    #[should_panic(expected = "gauss_1d: n must be")]
    fn test_gauss_1d_invalid_n() {
        gauss_1d(4);
    }
}
