//! Parallel-scanline infill raster generation, clipped to a `CompoundRegion`.

use crate::config::GeometryConfig;
use crate::float_types::Real;
use crate::geom2::compound_region::CompoundRegion;
use crate::geom2::point::{Bounds2, Point2};
use crate::geom2::segment::Segment;

/// Build a raster of parallel scan lines at orientation `theta`, spaced
/// `extrusion_width / density` apart in the rotated frame, clipped to every
/// subregion of `region`.
///
/// Degenerate inputs (`density <= 0`, `extrusion_width <= 0`, or an empty region)
/// yield an empty result rather than an error — infill generation sits on the
/// silently-degrading side of the error taxonomy, not the checked-constructor side.
pub fn generate(
    region: &CompoundRegion,
    density: Real,
    extrusion_width: Real,
    theta: Real,
    config: &GeometryConfig,
) -> Vec<Segment> {
    if density <= 0.0 || extrusion_width <= 0.0 || region.subregions.is_empty() {
        return Vec::new();
    }
    let spacing = extrusion_width / density;
    if spacing <= 0.0 {
        return Vec::new();
    }

    let mut bounds = Bounds2::empty();
    for r in &region.subregions {
        for seg in &r.outer.segments {
            bounds.expand_point(&seg.start);
            bounds.expand_point(&seg.end);
        }
    }
    if bounds.is_empty() {
        return Vec::new();
    }

    // Rotate the bounding box by -theta to find the span of scan-line offsets
    // (measured along the rotated Y axis) needed to cover it.
    let center = bounds.center();
    let corners = [
        bounds.min,
        Point2::new(bounds.max.x, bounds.min.y),
        bounds.max,
        Point2::new(bounds.min.x, bounds.max.y),
    ];
    let rotated: Vec<Point2> = corners.iter().map(|c| c.rotated_about(&center, -theta)).collect();
    let min_y = rotated.iter().map(|p| p.y).fold(Real::INFINITY, Real::min);
    let max_y = rotated.iter().map(|p| p.y).fold(Real::NEG_INFINITY, Real::max);
    let min_x = rotated.iter().map(|p| p.x).fold(Real::INFINITY, Real::min);
    let max_x = rotated.iter().map(|p| p.x).fold(Real::NEG_INFINITY, Real::max);

    let mut out = Vec::new();
    let mut y = min_y;
    while y <= max_y {
        let a = Point2::new(min_x - spacing, y).rotated_about(&center, theta);
        let b = Point2::new(max_x + spacing, y).rotated_about(&center, theta);
        let scan = Segment::new(a, b).with_extrusion_width(extrusion_width);
        out.extend(region.contained_segments_of_line(&scan, config));
        y += spacing;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::path::Path;
    use crate::geom2::simple_region::SimpleRegion;

    fn square(x0: Real, y0: Real, side: Real) -> Path {
        let pts = [
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
            Point2::new(x0, y0),
        ];
        Path::from_points(&pts)
    }

    #[test]
    fn non_positive_density_yields_no_infill() {
        let region = CompoundRegion::new(vec![SimpleRegion::new(square(0.0, 0.0, 10.0), Vec::new())], 0.0);
        let config = GeometryConfig::default();
        assert!(generate(&region, 0.0, 0.4, 0.0, &config).is_empty());
    }

    #[test]
    fn axis_aligned_raster_covers_square() {
        let region = CompoundRegion::new(vec![SimpleRegion::new(square(0.0, 0.0, 10.0), Vec::new())], 0.0);
        let config = GeometryConfig::default();
        let lines = generate(&region, 0.2, 0.4, 0.0, &config);
        assert!(!lines.is_empty());
        for seg in &lines {
            assert!(seg.start.y >= -1e-6 && seg.start.y <= 10.0 + 1e-6);
        }
    }
}
