/// Mesh primitives: index triangles over a homogeneous vertex matrix
use std::collections::HashSet;

use crate::error::{GeometryError, Result};
use crate::matrix::Matrix;

/// A homogeneous vertex `(x, y, z, w)`
pub type Node = [f64; 4];

/// Homogeneous node for a Euclidean point (`w = 1`)
pub fn node(x: f64, y: f64, z: f64) -> Node {
    [x, y, z, 1.0]
}

/// A triangular face referencing three rows of the vertex matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
}

impl Triangle {
    pub const fn new(p1: usize, p2: usize, p3: usize) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// The three edges in drawing order: p1-p2, p2-p3, p3-p1
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.p1, self.p2), (self.p2, self.p3), (self.p3, self.p1)]
    }
}

/// A mesh: an N×4 vertex matrix plus triangles indexing into it
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub nodes: Matrix,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(nodes: Matrix, triangles: Vec<Triangle>) -> Self {
        Self { nodes, triangles }
    }

    /// Build a mesh from a deduplicated node list
    pub fn from_nodes(nodes: NodeList, triangles: Vec<Triangle>) -> Self {
        Self {
            nodes: nodes.into_matrix(),
            triangles,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.nodes.rows()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for triangle in &self.triangles {
            for (a, b) in triangle.edges() {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.len()
    }

    /// Homogeneous coordinates of vertex `i`
    pub fn node(&self, i: usize) -> Option<Node> {
        if i >= self.nodes.rows() || self.nodes.cols() != 4 {
            return None;
        }
        Some([
            self.nodes[(i, 0)],
            self.nodes[(i, 1)],
            self.nodes[(i, 2)],
            self.nodes[(i, 3)],
        ])
    }

    /// Check that the vertex matrix is N×4 and every triangle index is in range
    pub fn validate(&self) -> Result<()> {
        if self.nodes.cols() != 4 {
            return Err(GeometryError::DimensionMismatch {
                operation: "mesh",
                left: self.nodes.shape(),
                right: (self.nodes.rows(), 4),
            });
        }
        let vertex_count = self.vertex_count();
        for (t, triangle) in self.triangles.iter().enumerate() {
            if let Some(&index) = triangle.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(GeometryError::InvalidTriangle {
                    triangle: t,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// Growable vertex list that reuses an existing node on exact coordinate match
#[derive(Debug, Clone, Default)]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert `node` unless an equal one exists; returns its index.
    ///
    /// Equality is IEEE `==` on all four coordinates with no tolerance, so
    /// `0.0` and `-0.0` match and NaN never does.
    pub fn add(&mut self, node: Node) -> usize {
        if let Some(i) = self.nodes.iter().position(|n| *n == node) {
            return i;
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, i: usize) -> Option<Node> {
        self.nodes.get(i).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_matrix(self) -> Matrix {
        Matrix::from_rows(&self.nodes)
    }
}

impl From<&Matrix> for NodeList {
    fn from(matrix: &Matrix) -> Self {
        let nodes = (0..matrix.rows())
            .map(|r| {
                [
                    matrix[(r, 0)],
                    matrix[(r, 1)],
                    matrix[(r, 2)],
                    matrix[(r, 3)],
                ]
            })
            .collect();
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_list_reuses_exact_matches() {
        let mut list = NodeList::new();
        assert_eq!(list.add(node(1.0, 2.0, 3.0)), 0);
        assert_eq!(list.add(node(4.0, 5.0, 6.0)), 1);
        assert_eq!(list.add(node(1.0, 2.0, 3.0)), 0);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_node_list_has_no_tolerance() {
        let mut list = NodeList::new();
        list.add(node(1.0, 0.0, 0.0));
        assert_eq!(list.add(node(1.0 + f64::EPSILON, 0.0, 0.0)), 1);
        // w participates in the comparison
        assert_eq!(list.add([1.0, 0.0, 0.0, 2.0]), 2);
    }

    #[test]
    fn test_node_list_signed_zero_and_nan() {
        let mut list = NodeList::new();
        list.add(node(0.0, 0.0, 150.0));
        assert_eq!(list.add(node(-0.0, 0.0, 150.0)), 0);

        let nan = node(f64::NAN, 0.0, 0.0);
        let first = list.add(nan);
        assert_ne!(list.add(nan), first);
    }

    #[test]
    fn test_edge_count_shares_edges() {
        let mut list = NodeList::new();
        for n in [
            node(0.0, 0.0, 0.0),
            node(1.0, 0.0, 0.0),
            node(0.0, 1.0, 0.0),
            node(1.0, 1.0, 0.0),
        ] {
            list.add(n);
        }
        let mesh = Mesh::from_nodes(
            list,
            vec![Triangle::new(0, 1, 2), Triangle::new(1, 3, 2)],
        );
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.node(3), Some([1.0, 1.0, 0.0, 1.0]));
        assert_eq!(mesh.node(4), None);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let nodes = Matrix::from_rows(&[node(0.0, 0.0, 0.0), node(1.0, 0.0, 0.0)]);
        let mesh = Mesh::new(nodes, vec![Triangle::new(0, 1, 2)]);
        match mesh.validate() {
            Err(GeometryError::InvalidTriangle {
                triangle,
                index,
                vertex_count,
            }) => {
                assert_eq!((triangle, index, vertex_count), (0, 2, 2));
            }
            other => panic!("expected invalid triangle, got {:?}", other),
        }
    }
}
