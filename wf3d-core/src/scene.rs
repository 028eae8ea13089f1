/// The viewer session: active mesh, reference point and display switches
use std::f64::consts::FRAC_PI_2;

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalogue::Solid;
use crate::error::Result;
use crate::geometry::Mesh;
use crate::matrix::Matrix;
use crate::projection::{Frame, ProjectionMode};
use crate::transform::{AffineOp, AffineOperations, Axis, DividePolicy};
use crate::visibility::VisibilityEngine;

/// Startup state of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    pub initial_solid: Solid,
    pub perspective: bool,
    pub culling: bool,
    pub divide_policy: DividePolicy,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            initial_solid: Solid::Pyramid,
            perspective: false,
            culling: true,
            divide_policy: DividePolicy::FailFast,
        }
    }
}

/// How pointer gestures map onto transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gestures {
    /// Rotation per dragged pixel, in degrees
    pub drag_degrees_per_pixel: f64,
    /// A twist of `angle` rotates by `angle / rotate_divisor` radians
    pub rotate_divisor: f64,
}

impl Default for Gestures {
    fn default() -> Self {
        Self {
            drag_degrees_per_pixel: 0.5,
            rotate_divisor: 20.0,
        }
    }
}

fn origin() -> Matrix {
    Matrix::from_rows(&[[0.0, 0.0, 0.0, 1.0]])
}

/// Owns the active mesh and the interior point that moves with it.
///
/// Every transform goes through `apply`, which updates both or neither.
#[derive(Debug, Clone)]
pub struct Scene {
    solid: Option<Solid>,
    label: String,
    mesh: Mesh,
    interior: Matrix,
    projection: ProjectionMode,
    culling: bool,
    ops: AffineOperations,
    engine: VisibilityEngine,
    gestures: Gestures,
}

impl Scene {
    pub fn new(options: &SceneOptions) -> Result<Self> {
        let mut scene = Self {
            solid: None,
            label: String::new(),
            mesh: Mesh::new(Matrix::zeros(0, 4), Vec::new()),
            interior: origin(),
            projection: if options.perspective {
                ProjectionMode::Perspective
            } else {
                ProjectionMode::Parallel
            },
            culling: options.culling,
            ops: AffineOperations::new(options.divide_policy),
            engine: VisibilityEngine::default(),
            gestures: Gestures::default(),
        };
        scene.select(options.initial_solid)?;
        Ok(scene)
    }

    pub fn with_gestures(mut self, gestures: Gestures) -> Self {
        self.gestures = gestures;
        self
    }

    /// Replace the mesh with a freshly generated solid
    pub fn select(&mut self, solid: Solid) -> Result<()> {
        let mut mesh = solid.mesh();
        if solid == Solid::SphereWithPoles {
            // stand the lat/long sphere upright; the interior point is unaffected
            mesh.nodes = self.ops.rotate_x(FRAC_PI_2, &mesh.nodes)?;
        }

        info!("selected {}", solid);
        self.solid = Some(solid);
        self.label = solid.name().to_string();
        self.mesh = mesh;
        self.interior = origin();
        Ok(())
    }

    /// Adopt a mesh that did not come from the catalogue
    pub fn load(&mut self, label: &str, mesh: Mesh) -> Result<()> {
        mesh.validate()?;
        info!(
            "loaded {}: {} vertices, {} triangles",
            label,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.solid = label.parse().ok();
        self.label = label.to_string();
        self.mesh = mesh;
        self.interior = origin();
        Ok(())
    }

    /// Apply one transform to the mesh and the interior point in lock-step
    pub fn apply(&mut self, op: AffineOp) -> Result<()> {
        self.apply_all(&[op])
    }

    /// Apply transforms in order; on error nothing changes
    pub fn apply_all(&mut self, ops: &[AffineOp]) -> Result<()> {
        let mut nodes = self.mesh.nodes.clone();
        let mut interior = self.interior.clone();
        for &op in ops {
            nodes = self.ops.apply(op, &nodes)?;
            interior = self.ops.apply(op, &interior)?;
        }
        self.mesh.nodes = nodes;
        self.interior = interior;
        Ok(())
    }

    /// Pointer drag by `(dx, dy)` pixels: vertical motion tilts about X,
    /// horizontal motion turns about Y
    pub fn drag(&mut self, dx: f64, dy: f64) -> Result<()> {
        let per_pixel = self.gestures.drag_degrees_per_pixel;
        self.apply_all(&[
            AffineOp::Rotate {
                axis: Axis::X,
                angle: (-dy * per_pixel).to_radians(),
            },
            AffineOp::Rotate {
                axis: Axis::Y,
                angle: (dx * per_pixel).to_radians(),
            },
        ])
    }

    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        self.apply(AffineOp::Scale(factor))
    }

    pub fn scroll(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.apply(AffineOp::Translate { dx, dy })
    }

    pub fn twist(&mut self, angle: f64) -> Result<()> {
        self.apply(AffineOp::Rotate {
            axis: Axis::Z,
            angle: angle / self.gestures.rotate_divisor,
        })
    }

    pub fn mirror(&mut self, axis: Axis) -> Result<()> {
        self.apply(AffineOp::Mirror(axis))
    }

    pub fn set_projection(&mut self, mode: ProjectionMode) {
        self.projection = mode;
    }

    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    pub fn set_culling(&mut self, enabled: bool) {
        self.culling = enabled;
    }

    pub fn culling(&self) -> bool {
        self.culling
    }

    pub fn solid(&self) -> Option<Solid> {
        self.solid
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn interior(&self) -> &Matrix {
        &self.interior
    }

    /// Projected vertices and visibility for the current state
    pub fn frame(&self) -> Result<Frame> {
        Frame::build(
            &self.mesh,
            &self.interior,
            self.projection,
            self.culling,
            &self.ops,
            &self.engine,
        )
    }
}
