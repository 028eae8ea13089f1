/// The fixed catalogue of solids and their mesh generators
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{node, Mesh, Triangle};
use crate::matrix::Matrix;
use crate::sphere;

/// Half edge of the cube, also the corner offset of the dodecahedron
pub const CUBE_HALF_EDGE: f64 = 117.0;

/// Ring radius of the icosahedron
pub const ICOSAHEDRON_RADIUS: f64 = 150.0;

/// Every solid the viewer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solid {
    Pyramid,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
    SphereWithPoles,
    SphereWithoutPoles,
}

impl Solid {
    pub const ALL: [Solid; 7] = [
        Solid::Pyramid,
        Solid::Cube,
        Solid::Octahedron,
        Solid::Icosahedron,
        Solid::Dodecahedron,
        Solid::SphereWithPoles,
        Solid::SphereWithoutPoles,
    ];

    /// Upper-case name, as written on the first line of a mesh file
    pub fn name(self) -> &'static str {
        match self {
            Solid::Pyramid => "PYRAMID",
            Solid::Cube => "CUBE",
            Solid::Octahedron => "OCTAHEDRON",
            Solid::Icosahedron => "ICOSAHEDRON",
            Solid::Dodecahedron => "DODECAHEDRON",
            Solid::SphereWithPoles => "SPHERE_WITH_POLES",
            Solid::SphereWithoutPoles => "SPHERE_WITHOUT_POLES",
        }
    }

    /// Generate a fresh mesh for this solid
    pub fn mesh(self) -> Mesh {
        let mesh = match self {
            Solid::Pyramid => pyramid(),
            Solid::Cube => cube(),
            Solid::Octahedron => octahedron(),
            Solid::Icosahedron => icosahedron(),
            Solid::Dodecahedron => dodecahedron(),
            Solid::SphereWithPoles => sphere::sphere_with_poles(),
            Solid::SphereWithoutPoles => sphere::sphere_without_poles(),
        };
        debug!(
            "generated {}: {} vertices, {} triangles",
            self,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        mesh
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Solid {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_").to_ascii_uppercase();
        Solid::ALL
            .into_iter()
            .find(|solid| solid.name() == wanted)
            .ok_or_else(|| GeometryError::UnknownSolid(s.to_string()))
    }
}

fn triangles(indices: &[[usize; 3]]) -> Vec<Triangle> {
    indices
        .iter()
        .map(|&[p1, p2, p3]| Triangle::new(p1, p2, p3))
        .collect()
}

pub fn pyramid() -> Mesh {
    let nodes = Matrix::from_rows(&[
        node(0.0, -167.0, 0.0),
        node(-150.0, 93.0, 87.0),
        node(150.0, 93.0, 87.0),
        node(0.0, 93.0, -173.0),
    ]);
    Mesh::new(nodes, triangles(&[[0, 1, 2], [0, 2, 3], [0, 1, 3], [1, 2, 3]]))
}

pub fn cube() -> Mesh {
    let a = CUBE_HALF_EDGE;
    let nodes = Matrix::from_rows(&[
        node(-a, -a, -a),
        node(a, -a, -a),
        node(-a, a, -a),
        node(a, a, -a),
        node(-a, -a, a),
        node(a, -a, a),
        node(-a, a, a),
        node(a, a, a),
    ]);
    Mesh::new(
        nodes,
        triangles(&[
            [0, 1, 2],
            [1, 2, 3],
            [1, 3, 7],
            [1, 5, 7],
            [4, 5, 6],
            [5, 6, 7],
            [0, 2, 6],
            [0, 4, 6],
            [0, 1, 5],
            [0, 4, 5],
            [2, 6, 7],
            [2, 3, 7],
        ]),
    )
}

pub fn octahedron() -> Mesh {
    let r = 150.0;
    let nodes = Matrix::from_rows(&[
        node(0.0, -r, 0.0),
        node(r, 0.0, 0.0),
        node(-r, 0.0, 0.0),
        node(0.0, 0.0, r),
        node(0.0, 0.0, -r),
        node(0.0, r, 0.0),
    ]);
    Mesh::new(
        nodes,
        triangles(&[
            [0, 1, 3],
            [0, 2, 3],
            [0, 2, 4],
            [0, 1, 4],
            [5, 1, 3],
            [5, 2, 3],
            [5, 2, 4],
            [5, 1, 4],
        ]),
    )
}

/// Pentagonal antiprism ring of ten vertices capped by two poles.
///
/// Ring vertex `i` sits at `(unit_radian * i + 5) * 36` radians, which keeps
/// the 36° spacing but offsets the whole ring by 180 rad.
pub fn icosahedron() -> Mesh {
    const UPPER_POLE: usize = 10;
    const LOWER_POLE: usize = 11;

    let unit_radian = PI * 2.0 / 360.0;
    let mut rows = [[0.0; 4]; 12];
    let mut faces = Vec::with_capacity(20);

    for i in 0..10 {
        let angle = (unit_radian * i as f64 + 5.0) * 36.0;
        let y = if i % 2 == 0 { 75.0 } else { -75.0 };
        rows[i] = node(
            ICOSAHEDRON_RADIUS * angle.cos(),
            y,
            ICOSAHEDRON_RADIUS * angle.sin(),
        );

        if i > 1 {
            faces.push(Triangle::new(i - 2, i - 1, i));
        }
        if i < 8 {
            let pole = if i % 2 == 0 { UPPER_POLE } else { LOWER_POLE };
            faces.push(Triangle::new(i, i + 2, pole));
        }
    }

    // ring wrap-around
    faces.push(Triangle::new(8, 9, 0));
    faces.push(Triangle::new(9, 0, 1));
    faces.push(Triangle::new(9, 1, LOWER_POLE));
    faces.push(Triangle::new(8, 0, UPPER_POLE));

    rows[UPPER_POLE] = node(0.0, 165.0, 0.0);
    rows[LOWER_POLE] = node(0.0, -165.0, 0.0);

    Mesh::new(Matrix::from_rows(&rows), faces)
}

/// Cube corners plus two ridge vertices pushed out of each cube face.
pub fn dodecahedron() -> Mesh {
    let a = CUBE_HALF_EDGE;
    let h = 70.0;
    let w = 70.0;

    let nodes = Matrix::from_rows(&[
        node(-a, -a, -a),
        node(a, -a, -a),
        node(-a, -a, a),
        node(a, -a, a),
        node(0.0, -a - h, -w),
        node(0.0, -a - h, w),
        node(-a - h, -w, 0.0),
        node(-a - h, w, 0.0),
        node(-80.0, 0.0, a + h),
        node(80.0, 0.0, a + h),
        node(a + h, -w, 0.0),
        node(a + h, w, 0.0),
        node(-w, 0.0, -a - h),
        node(w, 0.0, -a - h),
        node(-a, a, -a),
        node(a, a, -a),
        node(-a, a, a),
        node(a, a, a),
        node(0.0, a + h, -w),
        node(0.0, a + h, w),
    ]);

    Mesh::new(
        nodes,
        triangles(&[
            [0, 1, 4],
            [0, 4, 5],
            [1, 4, 5],
            [2, 3, 5],
            [0, 2, 6],
            [0, 6, 7],
            [2, 6, 7],
            [1, 3, 10],
            [1, 10, 11],
            [3, 10, 11],
            [14, 15, 18],
            [14, 18, 19],
            [15, 18, 19],
            [16, 17, 19],
            [14, 16, 7],
            [15, 17, 11],
            [2, 16, 8],
            [2, 8, 9],
            [16, 8, 9],
            [3, 17, 9],
            [0, 14, 12],
            [0, 12, 13],
            [14, 12, 13],
            [1, 15, 13],
            [0, 2, 5],
            [1, 3, 5],
            [3, 2, 9],
            [2, 7, 16],
            [3, 11, 17],
            [9, 16, 17],
            [14, 16, 19],
            [15, 17, 19],
            [0, 1, 13],
            [1, 15, 11],
            [0, 7, 14],
            [14, 15, 13],
        ]),
    )
}
