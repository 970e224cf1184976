//! Structured quadrilateral mesh for rectangular plates.
//!
//! Stores nodal coordinates and 4-node element connectivity. Identifiers are
//! dense and 0-based; nothing is removed once the mesh is built.

use crate::error::{Error, Result};
use log::info;
use nalgebra::Vector2;

/// A point in the plane.
pub type Point2 = Vector2<f64>;

/// Tolerance used to decide whether a node lies on a plate edge.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Node index (0-based, equal to its position in the mesh).
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Coordinates as a point.
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// 4-node quadrilateral connectivity, counter-clockwise.
///
/// ```text
/// 3 --- 2
/// |     |
/// 0 --- 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadElement {
    /// Element index (0-based).
    pub id: usize,
    /// Node indices.
    pub nodes: [usize; 4],
}

/// Finite element mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    nodes: Vec<Node>,
    elements: Vec<QuadElement>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a regular `nx × ny` grid of quads over `[0, width] × [0, height]`.
    ///
    /// Nodes are numbered row by row from the bottom-left corner, so node
    /// `(i, j)` has id `j * (nx + 1) + i`.
    ///
    /// # Errors
    ///
    /// Returns error if either division count is zero or an extent is not positive.
    pub fn rectangular(nx: usize, ny: usize, width: f64, height: f64) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(Error::Mesh(format!(
                "Element counts must be positive, got {} x {}",
                nx, ny
            )));
        }
        if !(width > 0.0) || !(height > 0.0) {
            return Err(Error::Mesh(format!(
                "Plate extents must be positive, got {} x {}",
                width, height
            )));
        }

        let dx = width / nx as f64;
        let dy = height / ny as f64;
        let mut mesh = Self::with_capacity((nx + 1) * (ny + 1), nx * ny);

        for j in 0..=ny {
            for i in 0..=nx {
                mesh.add_node(i as f64 * dx, j as f64 * dy);
            }
        }

        for j in 0..ny {
            for i in 0..nx {
                let n0 = j * (nx + 1) + i;
                mesh.add_element([n0, n0 + 1, n0 + nx + 2, n0 + nx + 1])?;
            }
        }

        info!(
            "Mesh generated: {} nodes, {} elements, {} DOFs",
            mesh.n_nodes(),
            mesh.n_elements(),
            mesh.n_dofs()
        );

        Ok(mesh)
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(n_nodes: usize, n_elements: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n_nodes),
            elements: Vec::with_capacity(n_elements),
        }
    }

    /// Add a node to the mesh, returning its index.
    pub fn add_node(&mut self, x: f64, y: f64) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node { id, x, y });
        id
    }

    /// Add a quadrilateral element, returning its index.
    pub fn add_element(&mut self, nodes: [usize; 4]) -> Result<usize> {
        for &node_idx in &nodes {
            if node_idx >= self.nodes.len() {
                return Err(Error::Mesh(format!(
                    "Node index {} out of bounds (mesh has {} nodes)",
                    node_idx,
                    self.nodes.len()
                )));
            }
        }

        let id = self.elements.len();
        self.elements.push(QuadElement { id, nodes });
        Ok(id)
    }

    /// Number of nodes in the mesh.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements in the mesh.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of degrees of freedom (two displacements per node).
    pub fn n_dofs(&self) -> usize {
        2 * self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    pub fn elements(&self) -> &[QuadElement] {
        &self.elements
    }

    pub fn element(&self, idx: usize) -> Option<&QuadElement> {
        self.elements.get(idx)
    }

    /// Get coordinates for an element's nodes.
    pub fn element_coords(&self, elem_idx: usize) -> Option<[Point2; 4]> {
        let elem = self.elements.get(elem_idx)?;
        Some(elem.nodes.map(|i| self.nodes[i].point()))
    }

    /// Nodes on the left edge (x = min x), in id order.
    pub fn left_edge_nodes(&self) -> Vec<usize> {
        match self.bounds() {
            Some((min, _)) => self
                .nodes
                .iter()
                .filter(|n| (n.x - min.x).abs() < EDGE_TOLERANCE)
                .map(|n| n.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nodes on the right edge (x = max x), sorted bottom to top.
    pub fn right_edge_nodes(&self) -> Vec<usize> {
        let Some((_, max)) = self.bounds() else {
            return Vec::new();
        };
        let mut edge: Vec<&Node> = self
            .nodes
            .iter()
            .filter(|n| (n.x - max.x).abs() < EDGE_TOLERANCE)
            .collect();
        edge.sort_by(|a, b| a.y.total_cmp(&b.y));
        edge.into_iter().map(|n| n.id).collect()
    }

    /// Compute mesh bounding box.
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        let first = self.nodes.first()?.point();
        let mut min = first;
        let mut max = first;

        for node in &self.nodes[1..] {
            min.x = min.x.min(node.x);
            min.y = min.y.min(node.y);
            max.x = max.x.max(node.x);
            max.y = max.y.max(node.y);
        }

        Some((min, max))
    }
}
