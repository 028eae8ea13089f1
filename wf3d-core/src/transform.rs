/// Homogeneous affine and projective transforms over row-vector vertex matrices
///
/// Every operation builds one 4×4 matrix and right-multiplies the N×4 vertex
/// matrix with it (`nodes' = nodes * M`). Inputs are never modified.
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::matrix::Matrix;

/// Focal constant of the perspective matrix
pub const FOCAL_DISTANCE: f64 = 300.0;

/// What the homogeneous divide does when a row has `w == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividePolicy {
    /// Return `DegenerateProjection` before touching any row
    #[default]
    FailFast,
    /// Divide anyway and let Inf/NaN flow into the result
    Propagate,
}

/// Coordinate axis, also naming the mirror plane perpendicular to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One named transform with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineOp {
    /// Move in the XY plane (device units)
    Translate { dx: f64, dy: f64 },
    /// Uniform scale through the homogeneous weight
    Scale(f64),
    /// Rotate about an axis (radians)
    Rotate { axis: Axis, angle: f64 },
    /// Negate one coordinate
    Mirror(Axis),
    /// Perspective projection onto the z = 0 plane
    Perspective,
}

impl AffineOp {
    /// The 4×4 matrix for this operation
    pub fn matrix(&self) -> Matrix {
        match *self {
            AffineOp::Translate { dx, dy } => Transform::translation_matrix(dx, dy),
            AffineOp::Scale(factor) => Transform::scale_matrix(factor),
            AffineOp::Rotate { axis, angle } => Transform::rotation_matrix(axis, angle),
            AffineOp::Mirror(axis) => Transform::mirror_matrix(axis),
            AffineOp::Perspective => Transform::perspective_matrix(),
        }
    }

    /// Whether the result needs a homogeneous divide
    pub fn normalizes(&self) -> bool {
        matches!(self, AffineOp::Scale(_) | AffineOp::Perspective)
    }
}

/// Transform matrix builders
pub struct Transform;

impl Transform {
    pub fn translation_matrix(dx: f64, dy: f64) -> Matrix {
        Matrix::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [dx, dy, 0.0, 1.0],
        ])
    }

    /// Scale is encoded as a weight of `1 / factor`
    pub fn scale_matrix(factor: f64) -> Matrix {
        Matrix::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0 / factor],
        ])
    }

    pub fn rotation_matrix(axis: Axis, angle: f64) -> Matrix {
        let (s, c) = angle.sin_cos();
        match axis {
            Axis::X => Matrix::from_rows(&[
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Y => Matrix::from_rows(&[
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Z => Matrix::from_rows(&[
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    pub fn mirror_matrix(axis: Axis) -> Matrix {
        let mut m = Matrix::identity(4);
        m[(axis.index(), axis.index())] = -1.0;
        m
    }

    pub fn perspective_matrix() -> Matrix {
        let mut m = Matrix::identity(4);
        m[(2, 3)] = -1.0 / FOCAL_DISTANCE;
        m
    }
}

/// Divide x, y, z of every row by its w and reset w to 1.
///
/// Under `FailFast` every weight is checked before any row is divided.
pub fn normalize(mut nodes: Matrix, policy: DividePolicy) -> Result<Matrix> {
    if nodes.cols() != 4 {
        return Err(GeometryError::DimensionMismatch {
            operation: "normalize",
            left: nodes.shape(),
            right: (nodes.rows(), 4),
        });
    }

    if policy == DividePolicy::FailFast {
        if let Some(row) = (0..nodes.rows()).find(|&r| nodes[(r, 3)] == 0.0) {
            return Err(GeometryError::DegenerateProjection { row });
        }
    }

    let mut non_finite = 0usize;
    for r in 0..nodes.rows() {
        let w = nodes[(r, 3)];
        for c in 0..3 {
            nodes[(r, c)] /= w;
            if !nodes[(r, c)].is_finite() {
                non_finite += 1;
            }
        }
        nodes[(r, 3)] = 1.0;
    }

    if non_finite > 0 {
        warn!("homogeneous divide produced {} non-finite coordinates", non_finite);
    }

    Ok(nodes)
}

/// Applies named transforms with a fixed divide policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AffineOperations {
    policy: DividePolicy,
}

impl AffineOperations {
    pub fn new(policy: DividePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DividePolicy {
        self.policy
    }

    /// Apply `op` to an N×4 vertex matrix, returning the new matrix
    pub fn apply(&self, op: AffineOp, nodes: &Matrix) -> Result<Matrix> {
        trace!("applying {:?} to {} rows", op, nodes.rows());
        let result = nodes.multiply(&op.matrix())?;
        if op.normalizes() {
            normalize(result, self.policy)
        } else {
            Ok(result)
        }
    }

    pub fn translate(&self, dx: f64, dy: f64, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Translate { dx, dy }, nodes)
    }

    pub fn scale(&self, factor: f64, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Scale(factor), nodes)
    }

    pub fn rotate_x(&self, angle: f64, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Rotate { axis: Axis::X, angle }, nodes)
    }

    pub fn rotate_y(&self, angle: f64, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Rotate { axis: Axis::Y, angle }, nodes)
    }

    pub fn rotate_z(&self, angle: f64, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Rotate { axis: Axis::Z, angle }, nodes)
    }

    pub fn mirror_x(&self, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Mirror(Axis::X), nodes)
    }

    pub fn mirror_y(&self, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Mirror(Axis::Y), nodes)
    }

    pub fn mirror_z(&self, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Mirror(Axis::Z), nodes)
    }

    pub fn perspective(&self, nodes: &Matrix) -> Result<Matrix> {
        self.apply(AffineOp::Perspective, nodes)
    }
}
