//! Global finite element assembly.
//!
//! Scatters every element stiffness into a dense global matrix and pairs it
//! with a load vector to form the linear system `K·U = F`.

use crate::dense::DenseMatrix;
use crate::element::Quad4;
use crate::error::{Error, Result};
use crate::material::Material;
use crate::mesh::Mesh;
use crate::sparse::{convert_to_sparse, CsrMatrix};
use log::info;

/// Assemble the global stiffness matrix of a quadrilateral mesh.
///
/// For every element the 8×8 stiffness is split into 4×4 node pairs, and each
/// 2×2 displacement-coupling block is added at rows `2a, 2a+1` and columns
/// `2b, 2b+1` of the global matrix. The result is `2·n_nodes` square.
///
/// # Example
///
/// ```
/// use fembench_core::assembly::assemble_global_stiffness;
/// use fembench_core::material::Material;
/// use fembench_core::mesh::Mesh;
///
/// let mesh = Mesh::rectangular(2, 1, 1.0, 1.0).unwrap();
/// let k = assemble_global_stiffness(&mesh, &Material::steel()).unwrap();
/// assert_eq!(k.nrows(), 12);
/// ```
pub fn assemble_global_stiffness(mesh: &Mesh, material: &Material) -> Result<DenseMatrix> {
    let n_dofs = mesh.n_dofs();
    let mut k = DenseMatrix::zeros(n_dofs, n_dofs);

    for (elem_idx, element) in mesh.elements().iter().enumerate() {
        let coords = mesh.element_coords(elem_idx).ok_or_else(|| {
            Error::Assembly(format!("element {} references a missing node", elem_idx))
        })?;
        let ke = Quad4::stiffness(&coords, material);

        for (a, &node_a) in element.nodes.iter().enumerate() {
            for (b, &node_b) in element.nodes.iter().enumerate() {
                for r in 0..Quad4::DOFS_PER_NODE {
                    for c in 0..Quad4::DOFS_PER_NODE {
                        k[(2 * node_a + r, 2 * node_b + c)] += ke[(2 * a + r, 2 * b + c)];
                    }
                }
            }
        }
    }

    info!(
        "Assembled global stiffness: {} elements, {}x{} matrix",
        mesh.n_elements(),
        n_dofs,
        n_dofs
    );

    Ok(k)
}

/// Fix nodes by replacing their equations with `u = 0`.
///
/// Both rows and both columns of every listed node are zeroed, the diagonal
/// set to 1 and the matching load entries cleared, which keeps the matrix
/// symmetric.
pub fn apply_fixed_nodes(k: &mut DenseMatrix, f: &mut [f64], nodes: &[usize]) -> Result<()> {
    let n = k.nrows();
    if !k.is_square() {
        return Err(Error::Assembly(format!(
            "stiffness matrix must be square, got {}x{}",
            k.nrows(),
            k.ncols()
        )));
    }
    if f.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: f.len(),
        });
    }

    for &node in nodes {
        if node >= n / 2 {
            return Err(Error::Assembly(format!(
                "fixed node {} is outside a system with {} DOFs",
                node, n
            )));
        }
        for dof in [2 * node, 2 * node + 1] {
            k.row_mut(dof).fill(0.0);
            for i in 0..n {
                k[(i, dof)] = 0.0;
            }
            k[(dof, dof)] = 1.0;
            f[dof] = 0.0;
        }
    }

    Ok(())
}

/// Assembled system `K·U = F` ready for solving.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// Global stiffness matrix.
    pub stiffness: DenseMatrix,
    /// Right-hand side (load) vector.
    pub rhs: Vec<f64>,
}

impl LinearSystem {
    /// Pair a square stiffness matrix with a load vector of matching length.
    pub fn new(stiffness: DenseMatrix, rhs: Vec<f64>) -> Result<Self> {
        if !stiffness.is_square() {
            return Err(Error::Assembly(format!(
                "stiffness matrix must be square, got {}x{}",
                stiffness.nrows(),
                stiffness.ncols()
            )));
        }
        if rhs.len() != stiffness.nrows() {
            return Err(Error::DimensionMismatch {
                expected: stiffness.nrows(),
                found: rhs.len(),
            });
        }
        Ok(Self { stiffness, rhs })
    }

    /// Number of unknowns.
    pub fn n_dofs(&self) -> usize {
        self.rhs.len()
    }

    /// Constrain the listed nodes in place. See [`apply_fixed_nodes`].
    pub fn fix_nodes(&mut self, nodes: &[usize]) -> Result<()> {
        apply_fixed_nodes(&mut self.stiffness, &mut self.rhs, nodes)
    }

    /// Compressed-row view of the stiffness, dropping `|k_ij| <= threshold`.
    pub fn sparse_view(&self, threshold: f64) -> CsrMatrix {
        convert_to_sparse(&self.stiffness, threshold)
    }
}
