//! SVG path-data emission: `M`/`L`/`Z` tokens only, no enclosing document.

use crate::config::GeometryConfig;
use crate::float_types::Real;
use crate::geom2::compound_region::CompoundRegion;
use crate::geom2::path::Path;
use crate::geom2::simple_region::SimpleRegion;
use std::fmt::Write as _;

/// Formats a geometry value as SVG path data (the contents of a `<path d="...">`
/// attribute), scaled from millimetres to SVG user units.
///
/// Coordinates are emitted fixed-point with three fractional digits in an
/// 8-character field, matching the reference implementation's `setw(8)` /
/// `precision(3)` stream formatting bit-for-bit. Each token after the first is
/// separated by a newline and four spaces, as the source does.
pub trait ToPathData {
    fn to_path_data(&self, dx: Real, dy: Real, config: &GeometryConfig) -> String;

    /// Convenience wrapper using [`GeometryConfig::default`] and no offset.
    fn to_path_data_default(&self) -> String {
        self.to_path_data(0.0, 0.0, &GeometryConfig::default())
    }
}

fn fmt_coord(out: &mut String, value: Real) {
    // `{:>8.3}` reproduces C++'s `setw(8)` with `precision(3)` fixed formatting:
    // right-aligned in an 8-character field, three fractional digits.
    let _ = write!(out, "{value:>8.3}");
}

impl ToPathData for Path {
    fn to_path_data(&self, dx: Real, dy: Real, config: &GeometryConfig) -> String {
        let mut out = String::new();
        if self.segments.is_empty() {
            return out;
        }

        let mult = config.svg_scale;
        let mut is_first = true;
        let mut sub_start = self.segments[0].start;
        let mut prev_end = sub_start;

        for (i, seg) in self.segments.iter().enumerate() {
            if i != 0 {
                out.push_str("\n    ");
            }
            if is_first || !prev_end.close_to(&seg.start, config.epsilon) {
                sub_start = seg.start;
                out.push('M');
                fmt_coord(&mut out, (seg.start.x + dx) * mult);
                out.push(',');
                fmt_coord(&mut out, (seg.start.y + dy) * mult);
                out.push_str("\n    ");
                is_first = false;
            }
            if seg.end.close_to(&sub_start, config.epsilon) {
                out.push('Z');
                is_first = true;
            } else {
                out.push('L');
                fmt_coord(&mut out, (seg.end.x + dx) * mult);
                out.push(',');
                fmt_coord(&mut out, (seg.end.y + dy) * mult);
            }
            prev_end = seg.end;
        }
        out
    }
}

impl ToPathData for SimpleRegion {
    fn to_path_data(&self, dx: Real, dy: Real, config: &GeometryConfig) -> String {
        let mut pieces = vec![self.outer.to_path_data(dx, dy, config)];
        pieces.extend(self.holes.iter().map(|h| h.to_path_data(dx, dy, config)));
        pieces.retain(|s| !s.is_empty());
        pieces.join("\n    ")
    }
}

impl ToPathData for CompoundRegion {
    fn to_path_data(&self, dx: Real, dy: Real, config: &GeometryConfig) -> String {
        let pieces: Vec<String> = self
            .subregions
            .iter()
            .map(|r| r.to_path_data(dx, dy, config))
            .filter(|s| !s.is_empty())
            .collect();
        pieces.join("\n    ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::point::Point2;

    #[test]
    fn empty_path_emits_nothing() {
        let p = Path::new();
        assert_eq!(p.to_path_data_default(), "");
    }

    #[test]
    fn unit_square_emits_move_three_lines_and_close() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        let p = Path::from_points(&pts);
        let data = p.to_path_data_default();
        assert!(data.starts_with('M'));
        assert!(data.trim_end().ends_with('Z'));
        assert_eq!(data.matches('L').count(), 3);
    }

    #[test]
    fn coordinates_are_scaled_by_svg_scale() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let p = Path::from_points(&pts);
        let config = GeometryConfig::default();
        let data = p.to_path_data(0.0, 0.0, &config);
        let expected = 1.0 * config.svg_scale;
        assert!(data.contains(&format!("{expected:>8.3}")));
    }
}
