//! Slicing a `Mesh3d` at a horizontal Z plane into a `CompoundRegion`.

use crate::config::GeometryConfig;
use crate::float_types::Real;
use crate::geom2::compound_region::CompoundRegion;
use crate::geom2::path::Path;
use crate::geom2::point::Point2;
use crate::geom2::segment::Segment;
use crate::mesh::mesh3d::Mesh3d;
use crate::mesh::triangle::Triangle3;
use nalgebra::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Above,
    Below,
    On,
}

fn classify(z: Real, plane_z: Real, epsilon: Real) -> Side {
    if (z - plane_z).abs() <= epsilon {
        Side::On
    } else if z > plane_z {
        Side::Above
    } else {
        Side::Below
    }
}

fn project(p: Point3<Real>) -> Point2 {
    Point2::new(p.x, p.y)
}

/// Intersect an edge `(a, b)` with the plane `z = plane_z`, returning the
/// interpolated crossing point, or an exact vertex when one endpoint already lies
/// on the plane.
fn edge_crossing(a: Point3<Real>, b: Point3<Real>, plane_z: Real, epsilon: Real) -> Option<Point2> {
    let sa = classify(a.z, plane_z, epsilon);
    let sb = classify(b.z, plane_z, epsilon);
    match (sa, sb) {
        (Side::On, _) => Some(project(a)),
        (_, Side::On) => Some(project(b)),
        (Side::Above, Side::Below) | (Side::Below, Side::Above) => {
            let t = (plane_z - a.z) / (b.z - a.z);
            Some(Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t))
        }
        _ => None,
    }
}

/// The 0, 1, or 2 segment endpoints produced by intersecting one triangle's edges
/// with the plane. A triangle entirely above, entirely below, or entirely on the
/// plane contributes nothing (degenerate/coplanar triangles are represented by
/// their neighbours' cut edges instead).
fn triangle_crossing_points(tri: &Triangle3, plane_z: Real, epsilon: Real) -> Vec<Point2> {
    let classes = [
        classify(tri.v0.z, plane_z, epsilon),
        classify(tri.v1.z, plane_z, epsilon),
        classify(tri.v2.z, plane_z, epsilon),
    ];
    if classes.iter().all(|c| *c == Side::On) {
        return Vec::new();
    }
    if classes.iter().all(|c| *c == Side::Above) || classes.iter().all(|c| *c == Side::Below) {
        return Vec::new();
    }

    let mut points = Vec::new();
    for (a, b) in tri.edges() {
        if let Some(p) = edge_crossing(a, b, plane_z, epsilon) {
            if !points.iter().any(|q: &Point2| q.close_to(&p, epsilon)) {
                points.push(p);
            }
        }
    }
    points
}

/// Slice `mesh` at `z` into a `CompoundRegion`: produce cut segments per
/// straddling triangle, assemble them into closed paths (repairing any that fail
/// to close from floating-point slop), and group the result by nesting depth.
pub fn region_for_slice_at_z(mesh: &Mesh3d, z: Real, config: &GeometryConfig) -> CompoundRegion {
    let mut segments = Vec::new();

    for tri in mesh.triangles() {
        let points = triangle_crossing_points(tri, z, config.epsilon);
        if points.len() == 2 {
            segments.push(Segment::new(points[0], points[1]));
        }
        // 0 or 1 crossing points: a vertex-only touch or a triangle that doesn't
        // straddle the plane; contributes no segment (geometry-degenerate, skip).
    }

    let paths = Path::assemble_paths_from_segments(segments, config.epsilon);
    let paths = Path::repair_unclosed_paths(paths, config.epsilon);
    CompoundRegion::assemble_compound_region_from(paths, z, config)
}
