/// Roberts-style back-face determination
///
/// Every triangle becomes a plane `ax + by + cz + d = 0`, stored as one
/// column of a 4×M body matrix. Planes are flipped so that the reference
/// interior point evaluates to `<= 0`, which makes `(a, b, c)` point out of
/// the solid. Evaluating the oriented planes at the viewpoint then gives one
/// scalar per face: negative means the viewpoint is behind the face.
///
/// The orientation step, the viewpoint and `is_visible` only make sense
/// together; changing one of them inverts the culling.

use crate::error::{GeometryError, Result};
use crate::geometry::{Node, Triangle};
use crate::matrix::{Matrix, Vector};

/// Far point on +Z standing in for the camera
pub const VIEWPOINT: [f64; 4] = [0.0, 0.0, 30000.0, 1.0];

/// Plane through three points, unoriented.
///
/// The normal is `(p2 - p1) × (p3 - p1)`; collinear points give all zeros.
pub fn face_plane(p1: Node, p2: Node, p3: Node) -> [f64; 4] {
    let (dx12, dy12, dz12) = (p2[0] - p1[0], p2[1] - p1[1], p2[2] - p1[2]);
    let (dx13, dy13, dz13) = (p3[0] - p1[0], p3[1] - p1[1], p3[2] - p1[2]);

    let a = dy12 * dz13 - dz12 * dy13;
    let b = -(dx12 * dz13 - dz12 * dx13);
    let c = dx12 * dy13 - dy12 * dx13;
    let d = -(a * p1[0] + b * p1[1] + c * p1[2]);

    [a, b, c, d]
}

/// Build the 4×M body matrix, one plane column per triangle
pub fn body_matrix(nodes: &Matrix, triangles: &[Triangle]) -> Result<Matrix> {
    if nodes.cols() != 4 {
        return Err(GeometryError::DimensionMismatch {
            operation: "body_matrix",
            left: nodes.shape(),
            right: (nodes.rows(), 4),
        });
    }

    let vertex_count = nodes.rows();
    let corner = |t: usize, index: usize| -> Result<Node> {
        if index >= vertex_count {
            return Err(GeometryError::InvalidTriangle {
                triangle: t,
                index,
                vertex_count,
            });
        }
        Ok([
            nodes[(index, 0)],
            nodes[(index, 1)],
            nodes[(index, 2)],
            nodes[(index, 3)],
        ])
    };

    let mut body = Matrix::zeros(4, triangles.len());
    for (t, triangle) in triangles.iter().enumerate() {
        let plane = face_plane(
            corner(t, triangle.p1)?,
            corner(t, triangle.p2)?,
            corner(t, triangle.p3)?,
        );
        body.set_column(t, &Vector::from(plane))?;
    }
    Ok(body)
}

/// Negate every plane for which `interior` evaluates positive
pub fn orient(body: &mut Matrix, interior: &Vector) -> Result<()> {
    let sides = body.pre_multiply(interior)?;
    for (t, side) in sides.iter().enumerate() {
        if side > 0.0 {
            let flipped = body.column(t)?.scaled(-1.0);
            body.set_column(t, &flipped)?;
        }
    }
    Ok(())
}

/// A face is hidden only when the viewpoint is strictly behind it.
///
/// Zero (degenerate triangle, or viewpoint in the plane) and NaN count as
/// visible.
pub fn is_visible(scalar: f64) -> bool {
    !(scalar < 0.0)
}

/// Evaluates oriented face planes at a fixed viewpoint
#[derive(Debug, Clone)]
pub struct VisibilityEngine {
    viewpoint: Vector,
}

impl VisibilityEngine {
    pub fn new(viewpoint: [f64; 4]) -> Self {
        Self {
            viewpoint: Vector::from(viewpoint),
        }
    }

    pub fn viewpoint(&self) -> &Vector {
        &self.viewpoint
    }

    /// One scalar per triangle: the oriented plane evaluated at the viewpoint
    pub fn face_scalars(
        &self,
        nodes: &Matrix,
        triangles: &[Triangle],
        interior: &Vector,
    ) -> Result<Vector> {
        let mut body = body_matrix(nodes, triangles)?;
        orient(&mut body, interior)?;
        body.pre_multiply(&self.viewpoint)
    }

    /// Visibility flag per triangle
    pub fn visible_faces(
        &self,
        nodes: &Matrix,
        triangles: &[Triangle],
        interior: &Vector,
    ) -> Result<Vec<bool>> {
        let scalars = self.face_scalars(nodes, triangles, interior)?;
        Ok(scalars.iter().map(is_visible).collect())
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new(VIEWPOINT)
    }
}
