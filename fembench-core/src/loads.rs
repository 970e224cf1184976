//! Nodal load cases on the right edge of a plate.
//!
//! Every case produces a global load vector of length `2·n_nodes` with the
//! x-component of node `i` at `2i` and the y-component at `2i+1`.

use crate::error::{Error, Result};
use crate::mesh::Mesh;

/// Load case applied to a plate mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadCase {
    /// 5 kN tension spread over the right edge.
    Uniform5kN,
    /// 10 kN tension spread over the right edge.
    Uniform10kN,
    /// Tension growing linearly from 0 at the bottom to 10 kN at the top.
    LinearlyVarying,
    /// 15 kN in x at the middle right-edge node.
    Concentrated15kN,
    /// 10 kN at 30° from the x axis at the top-right node.
    Angled10kN,
    /// Arbitrary force on a single node.
    PointLoad { node: usize, fx: f64, fy: f64 },
}

impl LoadCase {
    /// The five right-edge cases run by a full analysis.
    pub const STANDARD: [LoadCase; 5] = [
        LoadCase::Uniform5kN,
        LoadCase::Uniform10kN,
        LoadCase::LinearlyVarying,
        LoadCase::Concentrated15kN,
        LoadCase::Angled10kN,
    ];

    /// Human-readable description used in reports.
    pub fn description(&self) -> String {
        match self {
            LoadCase::Uniform5kN => "5 kN Uniform Tensile Load".into(),
            LoadCase::Uniform10kN => "10 kN Uniform Tensile Load".into(),
            LoadCase::LinearlyVarying => "Linearly Varying Load (0 to 10 kN)".into(),
            LoadCase::Concentrated15kN => "15 kN Concentrated Load at Midpoint".into(),
            LoadCase::Angled10kN => "10 kN Load at 30° (Top-Right Node)".into(),
            LoadCase::PointLoad { node, fx, fy } => {
                format!("Point Load ({} N, {} N) at Node {}", fx, fy, node)
            }
        }
    }

    /// Build the global load vector for `mesh`.
    ///
    /// Distributed cases give each right-edge node `total / n_edge` and the
    /// two end nodes half of that.
    ///
    /// # Errors
    ///
    /// Returns error if the mesh has no nodes, no right edge can be found, or
    /// a point load names a node that does not exist.
    pub fn load_vector(&self, mesh: &Mesh) -> Result<Vec<f64>> {
        let mut f = vec![0.0; mesh.n_dofs()];

        let edge = mesh.right_edge_nodes();
        let (_, max) = mesh
            .bounds()
            .ok_or_else(|| Error::Mesh("cannot load an empty mesh".into()))?;
        if edge.is_empty() {
            return Err(Error::Mesh("mesh has no right-edge nodes".into()));
        }
        let n_edge = edge.len();
        let end_weight = |k: usize| if k == 0 || k == n_edge - 1 { 0.5 } else { 1.0 };

        match *self {
            LoadCase::Uniform5kN | LoadCase::Uniform10kN => {
                let total = if *self == LoadCase::Uniform5kN { 5000.0 } else { 10000.0 };
                let per_node = total / n_edge as f64;
                for (k, &node) in edge.iter().enumerate() {
                    f[2 * node] += per_node * end_weight(k);
                }
            }
            LoadCase::LinearlyVarying => {
                let height = max.y;
                for (k, &node) in edge.iter().enumerate() {
                    let y = mesh.nodes()[node].y;
                    let ratio = if height > 0.0 { y / height } else { 0.0 };
                    f[2 * node] += 10000.0 * ratio / n_edge as f64 * end_weight(k);
                }
            }
            LoadCase::Concentrated15kN => {
                let node = edge[n_edge / 2];
                f[2 * node] += 15000.0;
            }
            LoadCase::Angled10kN => {
                let node = edge[n_edge - 1];
                let angle = 30.0_f64.to_radians();
                f[2 * node] += 10000.0 * angle.cos();
                f[2 * node + 1] += 10000.0 * angle.sin();
            }
            LoadCase::PointLoad { node, fx, fy } => {
                if node >= mesh.n_nodes() {
                    return Err(Error::Mesh(format!(
                        "load applied to node {} but mesh has {} nodes",
                        node,
                        mesh.n_nodes()
                    )));
                }
                f[2 * node] += fx;
                f[2 * node + 1] += fy;
            }
        }

        Ok(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plate() -> Mesh {
        // 2 x 4 elements, right edge nodes 2, 5, 8, 11, 14
        Mesh::rectangular(2, 4, 1.0, 0.5).unwrap()
    }

    #[test]
    fn test_uniform_half_weight_ends() {
        let mesh = plate();
        let f = LoadCase::Uniform5kN.load_vector(&mesh).unwrap();
        let edge = mesh.right_edge_nodes();
        assert_eq!(edge, vec![2, 5, 8, 11, 14]);

        assert_relative_eq!(f[2 * 2], 500.0);
        assert_relative_eq!(f[2 * 8], 1000.0);
        assert_relative_eq!(f[2 * 14], 500.0);
        assert!(f.iter().skip(1).step_by(2).all(|&fy| fy == 0.0));

        let total: f64 = f.iter().sum();
        assert_relative_eq!(total, 4000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uniform_10kn_doubles_5kn() {
        let mesh = plate();
        let f5 = LoadCase::Uniform5kN.load_vector(&mesh).unwrap();
        let f10 = LoadCase::Uniform10kN.load_vector(&mesh).unwrap();
        for (a, b) in f5.iter().zip(&f10) {
            assert_relative_eq!(2.0 * a, *b);
        }
    }

    #[test]
    fn test_linear_varying() {
        let mesh = plate();
        let f = LoadCase::LinearlyVarying.load_vector(&mesh).unwrap();
        assert_eq!(f[2 * 2], 0.0);
        // y = 0.25 of 0.5: 10000 * 0.5 / 5
        assert_relative_eq!(f[2 * 8], 1000.0, epsilon = 1e-9);
        // top node, half weight: 10000 * 1 / 5 * 0.5
        assert_relative_eq!(f[2 * 14], 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_concentrated_at_middle_node() {
        let mesh = plate();
        let f = LoadCase::Concentrated15kN.load_vector(&mesh).unwrap();
        assert_eq!(f[2 * 8], 15000.0);
        let total: f64 = f.iter().sum();
        assert_eq!(total, 15000.0);
    }

    #[test]
    fn test_angled_at_top_right() {
        let mesh = plate();
        let f = LoadCase::Angled10kN.load_vector(&mesh).unwrap();
        assert_relative_eq!(f[2 * 14], 10000.0 * 3.0_f64.sqrt() / 2.0, epsilon = 1e-9);
        assert_relative_eq!(f[2 * 14 + 1], 5000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_load() {
        let mesh = plate();
        let f = LoadCase::PointLoad { node: 3, fx: 1.0, fy: -2.0 }
            .load_vector(&mesh)
            .unwrap();
        assert_eq!(f.len(), mesh.n_dofs());
        assert_eq!(f[6], 1.0);
        assert_eq!(f[7], -2.0);

        assert!(LoadCase::PointLoad { node: 99, fx: 1.0, fy: 0.0 }
            .load_vector(&mesh)
            .is_err());
    }

    #[test]
    fn test_empty_mesh_is_error() {
        assert!(LoadCase::Uniform5kN.load_vector(&Mesh::new()).is_err());
    }

    #[test]
    fn test_no_right_edge_is_error() {
        let mut mesh = Mesh::new();
        mesh.add_node(f64::NAN, 0.0);
        for case in LoadCase::STANDARD {
            assert!(matches!(case.load_vector(&mesh), Err(Error::Mesh(_))), "{:?}", case);
        }
    }

    #[test]
    fn test_negative_x_mesh_loads_right_edge() {
        // One element spanning x in [-2, -1]; right edge is nodes 1 (bottom), 2 (top)
        let mut mesh = Mesh::new();
        mesh.add_node(-2.0, 0.0);
        mesh.add_node(-1.0, 0.0);
        mesh.add_node(-1.0, 1.0);
        mesh.add_node(-2.0, 1.0);
        mesh.add_element([0, 1, 2, 3]).unwrap();

        let f = LoadCase::Concentrated15kN.load_vector(&mesh).unwrap();
        assert_relative_eq!(f[2 * 2], 15000.0);
        assert_relative_eq!(f.iter().sum::<f64>(), 15000.0);

        let f = LoadCase::Angled10kN.load_vector(&mesh).unwrap();
        assert_relative_eq!(f[2 * 2 + 1], 5000.0, max_relative = 1e-12);

        let f = LoadCase::Uniform5kN.load_vector(&mesh).unwrap();
        assert_relative_eq!(f[2], 1250.0);
        assert_relative_eq!(f[2 * 2], 1250.0);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(LoadCase::Uniform5kN.description(), "5 kN Uniform Tensile Load");
        assert_eq!(
            LoadCase::Angled10kN.description(),
            "10 kN Load at 30° (Top-Right Node)"
        );
        assert_eq!(LoadCase::STANDARD.len(), 5);
    }
}
