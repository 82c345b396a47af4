//! Property tests for the universal invariants: segment-equality symmetry, path
//! chaining, winding/area duality, simplify idempotence, boolean identities,
//! ray-cast robustness, and the mesh-slicing round trip.

use nalgebra::Point3;
use proptest::prelude::*;
use slicer_kernel::config::GeometryConfig;
use slicer_kernel::geom2::path::Path;
use slicer_kernel::geom2::point::Point2;
use slicer_kernel::geom2::segment::Segment;
use slicer_kernel::mesh::mesh3d::Mesh3d;
use slicer_kernel::mesh::slice::region_for_slice_at_z;
use slicer_kernel::mesh::triangle::Triangle3;

fn arb_point() -> impl Strategy<Value = Point2> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    (arb_point(), arb_point()).prop_map(|(a, b)| Segment::new(a, b))
}

fn arb_point_list(min: usize, max: usize) -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec(arb_point(), min..max)
}

fn axis_aligned_square(x0: f64, y0: f64, side: f64) -> Path {
    let pts = [
        Point2::new(x0, y0),
        Point2::new(x0 + side, y0),
        Point2::new(x0 + side, y0 + side),
        Point2::new(x0, y0 + side),
        Point2::new(x0, y0),
    ];
    Path::from_points(&pts)
}

proptest! {
    /// Segment equality symmetry: a segment always equals its own reversal.
    #[test]
    fn segment_equals_its_reversal(seg in arb_segment()) {
        prop_assert!(seg.close(&seg.reversed()));
    }

    /// Path chaining invariant: every assembled path's consecutive segments share
    /// an endpoint within epsilon.
    #[test]
    fn path_segments_chain(points in arb_point_list(3, 12)) {
        let path = Path::from_points(&points);
        let config = GeometryConfig::default();
        for pair in path.segments.windows(2) {
            prop_assert!(pair[0].end.close_to(&pair[1].start, config.epsilon));
        }
    }

    /// Winding area magnitude matches area(), and reversing a path flips the sign
    /// of its winding area.
    #[test]
    fn winding_area_matches_area_and_flips_sign_on_reversal(points in arb_point_list(4, 10)) {
        let mut pts = points;
        pts.push(pts[0]); // close the path
        let path = Path::from_points(&pts);
        if path.is_closed() {
            let area = path.area();
            let winding = path.winding_area();
            prop_assert!((winding.abs() - area).abs() < 1e-6);

            let reversed = path.reversed();
            prop_assert!((reversed.winding_area() + winding).abs() < 1e-6);
        }
    }

    /// `simplify` never changes a path's start/end endpoints and is idempotent.
    #[test]
    fn simplify_preserves_endpoints_and_is_idempotent(points in arb_point_list(3, 10)) {
        let mut path = Path::from_points(&points);
        let start_before = path.start();
        let end_before = path.end();

        path.simplify(1e-6);
        prop_assert_eq!(path.start().map(|p| (p.x, p.y)), start_before.map(|p| (p.x, p.y)));
        prop_assert_eq!(path.end().map(|p| (p.x, p.y)), end_before.map(|p| (p.x, p.y)));

        let once = path.segments.len();
        path.simplify(1e-6);
        prop_assert_eq!(path.segments.len(), once);
    }

    /// Boolean identities on closed, non-self-intersecting paths: `union(A, A) ≅ A`,
    /// `difference(A, A) ≅ ∅`, `intersection(A, B) ≅ intersection(B, A)` up to
    /// rotation, and the area-conservation identity
    /// `area(union(A,B)) + area(intersection(A,B)) == area(A) + area(B)`.
    #[test]
    fn boolean_identities_hold_for_axis_aligned_squares(
        ax in -10.0f64..10.0, ay in -10.0f64..10.0, aside in 0.5f64..5.0,
        bx in -10.0f64..10.0, by in -10.0f64..10.0, bside in 0.5f64..5.0,
    ) {
        let a = axis_aligned_square(ax, ay, aside);
        let b = axis_aligned_square(bx, by, bside);
        let config = GeometryConfig::default();

        let area_union_aa: f64 = a.union(&a, &config, None).iter().map(Path::area).sum();
        prop_assert!((area_union_aa - a.area()).abs() < 1e-6);

        let area_diff_aa: f64 = a.difference(&a, &config, None).iter().map(Path::area).sum();
        prop_assert!(area_diff_aa < 1e-6);

        let area_ab: f64 = a.intersection(&b, &config, None).iter().map(Path::area).sum();
        let area_ba: f64 = b.intersection(&a, &config, None).iter().map(Path::area).sum();
        prop_assert!((area_ab - area_ba).abs() < 1e-6);

        let area_union_ab: f64 = a.union(&b, &config, None).iter().map(Path::area).sum();
        prop_assert!((area_union_ab + area_ab - a.area() - b.area()).abs() < 1e-4);
    }

    /// Ray-cast robustness: translating a closed path by an arbitrary small vector
    /// does not flip `contains` for a query point that stays well clear (> 0.05 mm)
    /// of every edge of both the original and translated path.
    #[test]
    fn ray_cast_is_stable_under_small_translation(dx in -1e-3f64..1e-3, dy in -1e-3f64..1e-3) {
        let config = GeometryConfig::default();
        let base = axis_aligned_square(0.0, 0.0, 1.0);
        let translated = base.translated(dx, dy);

        let margin = 0.05;
        for &gx in &[-0.5, 0.3, 0.7, 1.5] {
            for &gy in &[-0.5, 0.3, 0.7, 1.5] {
                let p = Point2::new(gx, gy);
                let clear_of_edges = gx < -margin || gx > 1.0 + margin
                    || (gx > margin && gx < 1.0 - margin);
                if !clear_of_edges {
                    continue;
                }
                prop_assert_eq!(base.contains(&p, &config), translated.contains(&p, &config));
            }
        }
    }
}

/// Slicing a convex solid (tetrahedron) at a Z within its extent yields exactly
/// one closed path with no holes.
#[test]
fn tetrahedron_slice_yields_exactly_one_closed_path() {
    let v = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(0.0, 4.0, 0.0),
        Point3::new(0.0, 0.0, 4.0),
    ];
    let tris = vec![
        Triangle3::new(v[0], v[2], v[1]),
        Triangle3::new(v[0], v[1], v[3]),
        Triangle3::new(v[1], v[2], v[3]),
        Triangle3::new(v[2], v[0], v[3]),
    ];
    let mesh = Mesh3d::new(tris);
    let config = GeometryConfig::default();

    let region = region_for_slice_at_z(&mesh, 2.0, &config);
    assert_eq!(region.subregions.len(), 1);
    assert_eq!(region.subregions[0].holes.len(), 0);
    assert!(region.subregions[0].outer.is_closed_with_epsilon(config.epsilon));
}

/// Slicing a symmetric square pyramid above its centroid yields a monotonically
/// decreasing cross-sectional area as Z increases toward the apex.
#[test]
fn symmetric_pyramid_area_decreases_monotonically_above_centroid() {
    let base = [
        Point3::new(-5.0, -5.0, 0.0),
        Point3::new(5.0, -5.0, 0.0),
        Point3::new(5.0, 5.0, 0.0),
        Point3::new(-5.0, 5.0, 0.0),
    ];
    let apex = Point3::new(0.0, 0.0, 10.0);
    let tris = vec![
        Triangle3::new(base[0], base[2], base[1]),
        Triangle3::new(base[0], base[3], base[2]),
        Triangle3::new(base[0], base[1], apex),
        Triangle3::new(base[1], base[2], apex),
        Triangle3::new(base[2], base[3], apex),
        Triangle3::new(base[3], base[0], apex),
    ];
    let mesh = Mesh3d::new(tris);
    let config = GeometryConfig::default();

    // Volumetric centroid of a pyramid sits at height/4 above its base; sample
    // strictly above that.
    let zs = [3.0, 5.0, 7.0, 9.0];
    let areas: Vec<f64> = zs
        .iter()
        .map(|&z| {
            let region = region_for_slice_at_z(&mesh, z, &config);
            assert_eq!(region.subregions.len(), 1, "z={z}");
            region.subregions[0].area(&config)
        })
        .collect();

    for pair in areas.windows(2) {
        assert!(pair[0] > pair[1], "areas were not monotonically decreasing: {areas:?}");
    }
}
