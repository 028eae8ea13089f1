/// Projection mode and the per-redraw frame handed to renderers
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Mesh, Triangle};
use crate::matrix::{Matrix, Vector};
use crate::transform::AffineOperations;
use crate::visibility::{is_visible, VisibilityEngine};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Drop z; vertices are drawn as stored
    #[default]
    Parallel,
    /// Apply the perspective matrix before drawing
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Parallel => ProjectionMode::Perspective,
            ProjectionMode::Perspective => ProjectionMode::Parallel,
        }
    }
}

/// Everything a renderer needs for one redraw.
///
/// Projection is applied to copies; the scene's stored vertices stay in
/// model space.
#[derive(Debug, Clone)]
pub struct Frame {
    pub nodes: Matrix,
    pub triangles: Vec<Triangle>,
    pub scalars: Vector,
    pub visible: Vec<bool>,
}

impl Frame {
    pub fn build(
        mesh: &Mesh,
        interior: &Matrix,
        mode: ProjectionMode,
        culling: bool,
        ops: &AffineOperations,
        engine: &VisibilityEngine,
    ) -> Result<Self> {
        let (nodes, interior) = match mode {
            ProjectionMode::Parallel => (mesh.nodes.clone(), interior.clone()),
            ProjectionMode::Perspective => (ops.perspective(&mesh.nodes)?, ops.perspective(interior)?),
        };

        let scalars = engine.face_scalars(&nodes, &mesh.triangles, &interior.row(0)?)?;
        let visible = if culling {
            scalars.iter().map(is_visible).collect()
        } else {
            vec![true; mesh.triangles.len()]
        };

        Ok(Self {
            nodes,
            triangles: mesh.triangles.clone(),
            scalars,
            visible,
        })
    }

    /// Canvas position of vertex `i`, with the model origin at the canvas centre
    pub fn to_screen(&self, i: usize, width: f64, height: f64) -> Option<(f64, f64)> {
        let x = self.nodes.get(i, 0)?;
        let y = self.nodes.get(i, 1)?;
        Some((x + width / 2.0, y + height / 2.0))
    }

    pub fn visible_triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles
            .iter()
            .zip(&self.visible)
            .filter_map(|(triangle, &visible)| visible.then_some(triangle))
    }

    /// Three edges per visible triangle, in drawing order
    pub fn visible_edges(&self) -> Vec<(usize, usize)> {
        self.visible_triangles()
            .flat_map(|triangle| triangle.edges())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Solid;
    use crate::transform::DividePolicy;

    fn origin() -> Matrix {
        Matrix::from_rows(&[[0.0, 0.0, 0.0, 1.0]])
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ProjectionMode::Parallel.toggled(), ProjectionMode::Perspective);
        assert_eq!(ProjectionMode::default(), ProjectionMode::Parallel);
    }

    #[test]
    fn test_cube_shows_front_face() {
        let mesh = Solid::Cube.mesh();
        let frame = Frame::build(
            &mesh,
            &origin(),
            ProjectionMode::Parallel,
            true,
            &AffineOperations::default(),
            &VisibilityEngine::default(),
        )
        .unwrap();

        // only the two triangles of the z = +117 face; the viewpoint lies
        // inside the x and y slabs, so it is behind every side face
        assert_eq!(frame.visible, {
            let mut expected = vec![false; 12];
            expected[4] = true;
            expected[5] = true;
            expected
        });
        assert_eq!(frame.visible_edges().len(), 6);
    }

    #[test]
    fn test_culling_off_draws_everything() {
        let mesh = Solid::Icosahedron.mesh();
        let frame = Frame::build(
            &mesh,
            &origin(),
            ProjectionMode::Parallel,
            false,
            &AffineOperations::default(),
            &VisibilityEngine::default(),
        )
        .unwrap();
        assert!(frame.visible.iter().all(|v| *v));
        assert_eq!(frame.visible_edges().len(), 60);
    }

    #[test]
    fn test_perspective_does_not_touch_mesh() {
        let mesh = Solid::Pyramid.mesh();
        let frame = Frame::build(
            &mesh,
            &origin(),
            ProjectionMode::Perspective,
            true,
            &AffineOperations::new(DividePolicy::FailFast),
            &VisibilityEngine::default(),
        )
        .unwrap();
        assert_ne!(frame.nodes, mesh.nodes);
        assert_eq!(mesh, Solid::Pyramid.mesh());
    }

    #[test]
    fn test_to_screen_centres_origin() {
        let mesh = Solid::Octahedron.mesh();
        let frame = Frame::build(
            &mesh,
            &origin(),
            ProjectionMode::Parallel,
            true,
            &AffineOperations::default(),
            &VisibilityEngine::default(),
        )
        .unwrap();
        // vertex 1 is (150, 0, 0)
        assert_eq!(frame.to_screen(1, 700.0, 500.0), Some((500.0, 250.0)));
        assert_eq!(frame.to_screen(99, 700.0, 500.0), None);
    }
}
