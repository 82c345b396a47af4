//! 2D point and axis-aligned bounds.

use crate::config::GeometryConfig;
use crate::float_types::Real;
use std::ops::{Add, Div, Mul, Sub};

/// A point in the XY plane, in millimetres.
///
/// Equality is tolerance-based (see [`Point2::close_to`]) rather than exact, which is
/// why this type does not derive `PartialEq`/`Eq`: two points built from slightly
/// different arithmetic paths that land within ε of each other are the same point as
/// far as every algorithm in this crate is concerned.
#[derive(Debug, Clone, Copy)]
pub struct Point2 {
    pub x: Real,
    pub y: Real,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// True when both coordinates differ from `other`'s by no more than `epsilon`.
    pub fn close_to(&self, other: &Point2, epsilon: Real) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Tolerance-based equality using the default [`GeometryConfig`] epsilon.
    pub fn close(&self, other: &Point2) -> bool {
        self.close_to(other, GeometryConfig::default().epsilon)
    }

    pub fn distance_to(&self, other: &Point2) -> Real {
        (*self - *other).length()
    }

    pub fn length(&self) -> Real {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle (radians, in `(-pi, pi]`) of the ray from the origin through this point
    /// when used as a direction vector, or from `self` to `other` via [`Point2::angle_to`].
    pub fn angle(&self) -> Real {
        self.y.atan2(self.x)
    }

    pub fn angle_to(&self, other: &Point2) -> Real {
        (*other - *self).angle()
    }

    pub fn dot(&self, other: &Point2) -> Real {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of `self` and `other` treated as vectors.
    pub fn cross(&self, other: &Point2) -> Real {
        self.x * other.y - self.y * other.x
    }

    /// Rotate this vector 90 degrees counter-clockwise.
    pub fn perp(&self) -> Point2 {
        Point2::new(-self.y, self.x)
    }

    pub fn normalized(&self) -> Point2 {
        let len = self.length();
        if len <= Real::EPSILON {
            *self
        } else {
            Point2::new(self.x / len, self.y / len)
        }
    }

    pub fn translated(&self, dx: Real, dy: Real) -> Point2 {
        Point2::new(self.x + dx, self.y + dy)
    }

    pub fn scaled(&self, factor: Real) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }

    pub fn scaled_about(&self, center: &Point2, factor: Real) -> Point2 {
        center.translated(
            (self.x - center.x) * factor,
            (self.y - center.y) * factor,
        )
    }

    /// Rotate this point by `angle` radians about `center`.
    pub fn rotated_about(&self, center: &Point2, angle: Real) -> Point2 {
        let (s, c) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point2::new(center.x + dx * c - dy * s, center.y + dx * s + dy * c)
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Real> for Point2 {
    type Output = Point2;
    fn mul(self, rhs: Real) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<Real> for Point2 {
    type Output = Point2;
    fn div(self, rhs: Real) -> Point2 {
        Point2::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned bounding rectangle in the XY plane.
///
/// An empty `Bounds2` is represented by `min = (+inf, +inf)`, `max = (-inf, -inf)`,
/// matching [`crate::mesh::Bounds3`] so the two types expand identically.
#[derive(Debug, Clone, Copy)]
pub struct Bounds2 {
    pub min: Point2,
    pub max: Point2,
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds2 {
    pub const fn empty() -> Self {
        Self {
            min: Point2::new(Real::INFINITY, Real::INFINITY),
            max: Point2::new(Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn expand_bounds(&mut self, other: &Bounds2) {
        if other.is_empty() {
            return;
        }
        self.expand_point(&other.min);
        self.expand_point(&other.max);
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Bounds2 {
        let mut bounds = Bounds2::empty();
        for p in points {
            bounds.expand_point(p);
        }
        bounds
    }

    pub fn width(&self) -> Real {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Real {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_to_respects_epsilon() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1e-6, -1e-6);
        assert!(a.close_to(&b, 1e-5));
        assert!(!a.close_to(&b, 1e-7));
    }

    #[test]
    fn cross_and_dot() {
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        assert_eq!(a.cross(&b), 1.0);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn bounds_expand_point() {
        let mut b = Bounds2::empty();
        assert!(b.is_empty());
        b.expand_point(&Point2::new(1.0, 2.0));
        b.expand_point(&Point2::new(-1.0, 5.0));
        assert!(!b.is_empty());
        assert_eq!(b.min.x, -1.0);
        assert_eq!(b.max.y, 5.0);
    }

    #[test]
    fn rotated_about_identity_at_zero_angle() {
        let p = Point2::new(3.0, 4.0);
        let center = Point2::new(1.0, 1.0);
        let r = p.rotated_about(&center, 0.0);
        assert!(r.close_to(&p, 1e-9));
    }
}
