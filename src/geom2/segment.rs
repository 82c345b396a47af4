//! Line segments and the tag lattice used by the boolean-operation algorithms.

use crate::config::GeometryConfig;
use crate::float_types::{PI, Real};
use crate::geom2::intersection::Intersection;
use crate::geom2::point::Point2;

/// Classification of a segment relative to a reference path, used by
/// [`crate::geom2::path::Path::tag_segments_relative_to_closed_path`] and the boolean
/// combinators built on top of it.
///
/// The source implementation folds `used`/`inside-outside-shared` into one bitflag
/// int; we keep the lattice (inside/outside/shared/unshared) as an enum and the
/// used/not-used axis as a separate bool, per the redesign note on overloaded flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    /// Never classified against any reference path.
    #[default]
    Untagged,
    /// Reset by [`crate::geom2::path::Path::untag`] ahead of a fresh classification
    /// pass; a distinct state from `Untagged` because the tag-composition table
    /// treats a freshly-reset segment differently from one that was simply never
    /// touched.
    Used,
    Inside,
    Outside,
    Shared,
    Unshared,
}

/// A directed segment of a path, carrying the per-segment attributes a slicer needs
/// downstream (extrusion width, temperature) plus the classification state used
/// during boolean assembly and offsetting.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
    pub tag: Tag,
    /// Set once a segment has been consumed during path assembly, independent of
    /// its `tag` classification.
    pub consumed: bool,
    /// Set by [`crate::geom2::path::Path::left_offset`] on offset segments whose
    /// direction reversed relative to the source segment.
    pub invalid: bool,
    pub temperature: Real,
    pub extrusion_width: Real,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            tag: Tag::Untagged,
            consumed: false,
            invalid: false,
            temperature: 0.0,
            extrusion_width: 0.0,
        }
    }

    pub fn with_extrusion_width(mut self, width: Real) -> Self {
        self.extrusion_width = width;
        self
    }

    /// Tolerance-based equality that ignores direction: a segment equals its own
    /// reversal.
    pub fn close_to(&self, other: &Segment, epsilon: Real) -> bool {
        (self.start.close_to(&other.start, epsilon) && self.end.close_to(&other.end, epsilon))
            || (self.start.close_to(&other.end, epsilon) && self.end.close_to(&other.start, epsilon))
    }

    pub fn close(&self, other: &Segment) -> bool {
        self.close_to(other, GeometryConfig::default().epsilon)
    }

    pub fn has_endpoint(&self, p: &Point2, epsilon: Real) -> bool {
        p.close_to(&self.start, epsilon) || p.close_to(&self.end, epsilon)
    }

    pub fn vector(&self) -> Point2 {
        self.end - self.start
    }

    pub fn length(&self) -> Real {
        self.vector().length()
    }

    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) * 0.5,
            (self.start.y + self.end.y) * 0.5,
        )
    }

    /// Angle of the segment's direction vector, in `(-pi, pi]`.
    pub fn angle(&self) -> Real {
        self.vector().angle()
    }

    /// Signed angular difference `other.angle() - self.angle()`, wrapped to `(-pi, pi]`.
    pub fn angle_delta(&self, other: &Segment) -> Real {
        let mut delta = other.angle() - self.angle();
        if delta < -PI {
            delta += 2.0 * PI;
        } else if delta > PI {
            delta -= 2.0 * PI;
        }
        delta
    }

    pub fn reversed(&self) -> Segment {
        Segment {
            start: self.end,
            end: self.start,
            ..*self
        }
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn translated(&self, dx: Real, dy: Real) -> Segment {
        Segment {
            start: self.start.translated(dx, dy),
            end: self.end.translated(dx, dy),
            ..*self
        }
    }

    pub fn scaled_about(&self, center: &Point2, factor: Real) -> Segment {
        Segment {
            start: self.start.scaled_about(center, factor),
            end: self.end.scaled_about(center, factor),
            ..*self
        }
    }

    pub fn rotated_about(&self, center: &Point2, angle: Real) -> Segment {
        Segment {
            start: self.start.rotated_about(center, angle),
            end: self.end.rotated_about(center, angle),
            ..*self
        }
    }

    /// True when `p` lies on the segment (not its extension), within `epsilon`.
    pub fn contains_point(&self, p: &Point2, epsilon: Real) -> bool {
        let closest = self.closest_point_on_segment(p);
        closest.close_to(p, epsilon)
    }

    pub fn closest_point_on_segment(&self, p: &Point2) -> Point2 {
        let v = self.vector();
        let len_sq = v.dot(&v);
        if len_sq <= Real::EPSILON {
            return self.start;
        }
        let t = ((*p - self.start).dot(&v) / len_sq).clamp(0.0, 1.0);
        self.start + v * t
    }

    pub fn closest_point_on_extended_line(&self, p: &Point2) -> Point2 {
        let v = self.vector();
        let len_sq = v.dot(&v);
        if len_sq <= Real::EPSILON {
            return self.start;
        }
        let t = (*p - self.start).dot(&v) / len_sq;
        self.start + v * t
    }

    pub fn minimum_segment_distance_from_point(&self, p: &Point2) -> Real {
        self.closest_point_on_segment(p).distance_to(p)
    }

    pub fn minimum_extended_line_distance_from_point(&self, p: &Point2) -> Real {
        self.closest_point_on_extended_line(p).distance_to(p)
    }

    /// Translate the segment perpendicular-left (relative to its direction) by
    /// `offset_by`.
    pub fn left_offset(&self, offset_by: Real) -> Segment {
        let perp = self.vector().normalized().perp();
        self.translated(perp.x * offset_by, perp.y * offset_by)
    }

    /// Intersect this segment (bounded to `[0,1]` on both parameters, within
    /// `epsilon`) with `other`.
    pub fn intersection_with_segment(&self, other: &Segment, epsilon: Real) -> Intersection {
        self.intersect(other, epsilon, true)
    }

    /// Intersect the infinite lines through `self` and `other`, unconstrained.
    pub fn intersection_with_extended_line(&self, other: &Segment, epsilon: Real) -> Intersection {
        self.intersect(other, epsilon, false)
    }

    fn intersect(&self, other: &Segment, epsilon: Real, bounded: bool) -> Intersection {
        let d1 = self.vector();
        let d2 = other.vector();
        let denom = d1.cross(&d2);

        if denom.abs() <= epsilon {
            return self.intersect_parallel(other, epsilon);
        }

        let diff = other.start - self.start;
        let t = diff.cross(&d2) / denom;
        let u = diff.cross(&d1) / denom;

        if bounded {
            let lo = -epsilon;
            let hi = 1.0 + epsilon;
            if t < lo || t > hi || u < lo || u > hi {
                return Intersection::None;
            }
        }

        Intersection::Point(self.start + d1 * t)
    }

    fn intersect_parallel(&self, other: &Segment, epsilon: Real) -> Intersection {
        let d1 = self.vector();
        let diff = other.start - self.start;
        // collinear iff diff is parallel to d1 too
        if diff.cross(&d1).abs() > epsilon * d1.length().max(1.0) {
            return Intersection::None;
        }

        let len_sq = d1.dot(&d1);
        if len_sq <= Real::EPSILON {
            return Intersection::None;
        }

        let project = |p: Point2| (p - self.start).dot(&d1) / len_sq;
        let (mut t0, mut t1) = (project(other.start), project(other.end));
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        let lo = t0.max(0.0);
        let hi = t1.min(1.0);

        if hi < lo - epsilon {
            return Intersection::None;
        }
        if (hi - lo).abs() <= epsilon {
            return Intersection::Point(self.start + d1 * lo.clamp(0.0, 1.0));
        }
        Intersection::Segment(self.start + d1 * lo, self.start + d1 * hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_segment_is_close_to_original() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert!(s.close(&s.reversed()));
    }

    #[test]
    fn angle_delta_handles_wraparound() {
        let a = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let b = Segment::new(Point2::new(0.0, 0.0), Point2::new(-1.0, 1e-9));
        let delta = a.angle_delta(&b);
        assert!(delta.abs() <= PI + 1e-6);
    }

    #[test]
    fn perpendicular_segments_intersect_at_a_point() {
        let a = Segment::new(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0));
        let b = Segment::new(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0));
        match a.intersection_with_segment(&b, 1e-9) {
            Intersection::Point(p) => assert!(p.close_to(&Point2::ORIGIN, 1e-9)),
            other => panic!("expected point intersection, got {other:?}"),
        }
    }

    #[test]
    fn parallel_non_collinear_segments_do_not_intersect() {
        let a = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let b = Segment::new(Point2::new(0.0, 1.0), Point2::new(1.0, 1.0));
        assert!(matches!(
            a.intersection_with_segment(&b, 1e-9),
            Intersection::None
        ));
    }

    #[test]
    fn collinear_overlap_reports_segment() {
        let a = Segment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0));
        let b = Segment::new(Point2::new(1.0, 0.0), Point2::new(3.0, 0.0));
        match a.intersection_with_segment(&b, 1e-9) {
            Intersection::Segment(p1, p2) => {
                assert!(p1.close_to(&Point2::new(1.0, 0.0), 1e-9));
                assert!(p2.close_to(&Point2::new(2.0, 0.0), 1e-9));
            }
            other => panic!("expected segment overlap, got {other:?}"),
        }
    }

    #[test]
    fn left_offset_translates_perpendicular() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let offset = s.left_offset(1.0);
        assert!(offset.start.close_to(&Point2::new(0.0, 1.0), 1e-9));
    }
}
