/// Sphere generators: latitude/longitude grid and subdivided icosahedron
use std::f64::consts::PI;

use crate::catalogue;
use crate::error::Result;
use crate::geometry::{node, Mesh, Node, NodeList, Triangle};

pub const SPHERE_RADIUS: f64 = 150.0;

/// Angular step of the lat/long grid (20°)
pub const GRID_STEP: f64 = PI * 2.0 / 360.0 * 20.0;

/// Subdivision passes applied to the icosahedron
pub const SUBDIVISION_DEPTH: usize = 2;

/// Midpoints are pushed out to `INFLATION * SPHERE_RADIUS`
pub const INFLATION: f64 = 1.13;

fn spherical(polar: f64, azimuth: f64) -> Node {
    node(
        SPHERE_RADIUS * polar.sin() * azimuth.cos(),
        SPHERE_RADIUS * polar.sin() * azimuth.sin(),
        SPHERE_RADIUS * polar.cos(),
    )
}

/// Lat/long sphere.
///
/// The polar angle sweeps `[0, 2π]` and the azimuth `[0, π)`, both by
/// accumulating `GRID_STEP`, so the cell count follows the floating-point
/// sums rather than an exact division.
pub fn sphere_with_poles() -> Mesh {
    let mut nodes = NodeList::new();
    let mut faces = Vec::new();

    let mut i = 0.0;
    while i <= PI * 2.0 {
        let mut j = 0.0;
        while j < PI {
            let p1 = nodes.add(spherical(i, j));
            let p2 = nodes.add(spherical(i + GRID_STEP, j));
            let p3 = nodes.add(spherical(i, j + GRID_STEP));
            let p4 = nodes.add(spherical(i + GRID_STEP, j + GRID_STEP));

            faces.push(Triangle::new(p1, p3, p4));
            faces.push(Triangle::new(p1, p2, p4));
            j += GRID_STEP;
        }
        i += GRID_STEP;
    }

    Mesh::from_nodes(nodes, faces)
}

/// Edge midpoint projected onto the inflated sphere
pub fn midpoint(a: Node, b: Node) -> Node {
    let x = (a[0] + b[0]) / 2.0;
    let y = (a[1] + b[1]) / 2.0;
    let z = (a[2] + b[2]) / 2.0;
    let length = (x * x + y * y + z * z).sqrt();

    node(
        x / length * INFLATION * SPHERE_RADIUS,
        y / length * INFLATION * SPHERE_RADIUS,
        z / length * INFLATION * SPHERE_RADIUS,
    )
}

/// Split every triangle into four, rebuilding the node list from scratch.
///
/// Corners and midpoints go through the same exact-match dedup, so an edge
/// shared by two triangles yields one midpoint. Fails on a triangle that
/// references a missing vertex.
pub fn subdivide(mesh: &Mesh) -> Result<Mesh> {
    mesh.validate()?;
    Ok(split_faces(mesh))
}

/// `mesh` must already be valid
fn split_faces(mesh: &Mesh) -> Mesh {
    let source = NodeList::from(&mesh.nodes);
    let mut nodes = NodeList::new();
    let mut faces = Vec::with_capacity(mesh.triangles.len() * 4);

    for triangle in &mesh.triangles {
        let (Some(a), Some(b), Some(c)) = (
            source.get(triangle.p1),
            source.get(triangle.p2),
            source.get(triangle.p3),
        ) else {
            continue;
        };

        let p1 = nodes.add(a);
        let p2 = nodes.add(b);
        let p3 = nodes.add(c);
        let m12 = nodes.add(midpoint(a, b));
        let m13 = nodes.add(midpoint(a, c));
        let m23 = nodes.add(midpoint(b, c));

        faces.push(Triangle::new(p1, m12, m13));
        faces.push(Triangle::new(p2, m12, m23));
        faces.push(Triangle::new(p3, m13, m23));
        faces.push(Triangle::new(m12, m13, m23));
    }

    Mesh::from_nodes(nodes, faces)
}

pub fn sphere_without_poles() -> Mesh {
    (0..SUBDIVISION_DEPTH).fold(catalogue::icosahedron(), |mesh, _| split_faces(&mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use approx::assert_relative_eq;

    fn radius(n: Node) -> f64 {
        (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
    }

    #[test]
    fn test_subdivision_recurrence() {
        let ico = catalogue::icosahedron();
        let once = subdivide(&ico).unwrap();
        assert_eq!(once.vertex_count(), ico.vertex_count() + ico.edge_count());
        assert_eq!(once.triangle_count(), ico.triangle_count() * 4);
        assert_eq!((once.vertex_count(), once.triangle_count()), (42, 80));

        let twice = subdivide(&once).unwrap();
        assert_eq!(twice.vertex_count(), once.vertex_count() + once.edge_count());
        assert_eq!((twice.vertex_count(), twice.triangle_count()), (162, 320));
    }

    #[test]
    fn test_subdivide_rejects_dangling_index() {
        let mut mesh = catalogue::octahedron();
        mesh.triangles.push(Triangle::new(0, 1, 6));
        assert!(matches!(
            subdivide(&mesh),
            Err(GeometryError::InvalidTriangle { triangle: 8, index: 6, vertex_count: 6 })
        ));
    }

    #[test]
    fn test_sphere_without_poles_is_closed() {
        let mesh = sphere_without_poles();
        mesh.validate().unwrap();
        assert_eq!(mesh.vertex_count(), 162);
        assert_eq!(mesh.triangle_count(), 320);
        assert_eq!(mesh.edge_count(), 480);
    }

    #[test]
    fn test_midpoint_lies_on_inflated_sphere() {
        let m = midpoint(node(150.0, 0.0, 0.0), node(0.0, 150.0, 0.0));
        assert_relative_eq!(radius(m), INFLATION * SPHERE_RADIUS, epsilon = 1e-9);
        assert_relative_eq!(m[0], m[1]);
        assert_eq!(m[3], 1.0);
    }

    #[test]
    fn test_midpoint_is_symmetric() {
        let a = node(12.5, -80.0, 33.0);
        let b = node(-140.0, 7.25, 61.0);
        assert_eq!(midpoint(a, b), midpoint(b, a));
    }

    #[test]
    fn test_sphere_with_poles_grid() {
        let mesh = sphere_with_poles();
        mesh.validate().unwrap();
        // 19 polar steps (0..=2π) by 9 azimuth steps (0..π), two triangles per cell
        assert_eq!(mesh.triangle_count(), 19 * 9 * 2);
        for i in 0..mesh.vertex_count() {
            let n = mesh.node(i).unwrap();
            assert_relative_eq!(radius(n), SPHERE_RADIUS, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sphere_with_poles_dedups_north_pole() {
        let mesh = sphere_with_poles();
        let poles = (0..mesh.vertex_count())
            .filter_map(|i| mesh.node(i))
            .filter(|n| n[0] == 0.0 && n[1] == 0.0 && n[2] == SPHERE_RADIUS)
            .count();
        assert_eq!(poles, 1);
    }

    #[test]
    fn test_sphere_with_poles_has_no_duplicate_nodes() {
        let mesh = sphere_with_poles();
        let nodes: Vec<Node> = (0..mesh.vertex_count())
            .filter_map(|i| mesh.node(i))
            .collect();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
