//! A triangle soup with a cached axis-aligned bounding box.

use nalgebra::{Point3, Rotation3, Vector3};
use std::sync::OnceLock;

use crate::float_types::Real;
use crate::mesh::triangle::Triangle3;

/// Axis-aligned bounds in 3D; empty is represented by `min = +inf`, `max = -inf`
/// on every axis, matching [`crate::geom2::Bounds2`].
#[derive(Debug, Clone, Copy)]
pub struct Bounds3 {
    pub min: Point3<Real>,
    pub max: Point3<Real>,
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds3 {
    pub fn empty() -> Self {
        Self {
            min: Point3::new(Real::INFINITY, Real::INFINITY, Real::INFINITY),
            max: Point3::new(Real::NEG_INFINITY, Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_point(&mut self, p: &Point3<Real>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn expand_bounds(&mut self, other: &Bounds3) {
        if other.is_empty() {
            return;
        }
        self.expand_point(&other.min);
        self.expand_point(&other.max);
    }

    pub fn center(&self) -> Point3<Real> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }
}

/// A triangle soup, with a lazily-computed, invalidated-on-mutation bounding box.
///
/// The bounds cache uses [`OnceLock`] rather than eager recomputation so a caller
/// who only ever reads `bounds()` once after a batch of triangle pushes pays for
/// exactly one bounds pass, matching the grounding crate's own `Aabb` caching
/// pattern on its mesh types.
#[derive(Debug, Default)]
pub struct Mesh3d {
    triangles: Vec<Triangle3>,
    bounds: OnceLock<Bounds3>,
}

impl Clone for Mesh3d {
    fn clone(&self) -> Self {
        Self {
            triangles: self.triangles.clone(),
            bounds: OnceLock::new(),
        }
    }
}

impl Mesh3d {
    pub fn new(triangles: Vec<Triangle3>) -> Self {
        Self {
            triangles,
            bounds: OnceLock::new(),
        }
    }

    pub fn triangles(&self) -> &[Triangle3] {
        &self.triangles
    }

    pub fn push(&mut self, triangle: Triangle3) {
        self.triangles.push(triangle);
        self.invalidate_bounds();
    }

    fn invalidate_bounds(&mut self) {
        self.bounds = OnceLock::new();
    }

    pub fn bounds(&self) -> Bounds3 {
        *self.bounds.get_or_init(|| self.recalculate_bounds())
    }

    fn recalculate_bounds(&self) -> Bounds3 {
        let mut b = Bounds3::empty();
        for t in &self.triangles {
            b.expand_bounds(&t.bounds());
        }
        b
    }

    pub fn center_point(&self) -> Point3<Real> {
        self.bounds().center()
    }

    pub fn translate(&mut self, delta: Vector3<Real>) {
        for t in &mut self.triangles {
            t.v0 += delta;
            t.v1 += delta;
            t.v2 += delta;
        }
        self.invalidate_bounds();
    }

    pub fn scale(&mut self, factor: Vector3<Real>) {
        for t in &mut self.triangles {
            t.v0.coords.component_mul_assign(&factor);
            t.v1.coords.component_mul_assign(&factor);
            t.v2.coords.component_mul_assign(&factor);
        }
        self.invalidate_bounds();
    }

    pub fn scale_uniform(&mut self, factor: Real) {
        self.scale(Vector3::new(factor, factor, factor));
    }

    pub fn rotate(&mut self, rotation: Rotation3<Real>) {
        for t in &mut self.triangles {
            t.v0 = rotation * t.v0;
            t.v1 = rotation * t.v1;
            t.v2 = rotation * t.v2;
        }
        self.invalidate_bounds();
    }

    /// Translate so the mesh's bounds center maps onto `origin`'s XY and the
    /// bounds' minimum Z maps onto `origin.z` — the usual "drop onto the print bed"
    /// placement.
    pub fn translate_to_center_of_platform(&mut self, origin: Point3<Real>) {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return;
        }
        let center = bounds.center();
        let delta = Vector3::new(
            origin.x - center.x,
            origin.y - center.y,
            origin.z - bounds.min.z,
        );
        self.translate(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle3 {
        Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        )
    }

    #[test]
    fn bounds_recompute_after_translate() {
        let mut mesh = Mesh3d::new(vec![unit_triangle()]);
        let before = mesh.bounds();
        mesh.translate(Vector3::new(10.0, 0.0, 0.0));
        let after = mesh.bounds();
        assert!((after.min.x - before.min.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn translate_to_center_of_platform_sets_min_z_to_origin() {
        let mut mesh = Mesh3d::new(vec![unit_triangle()]);
        mesh.translate_to_center_of_platform(Point3::new(0.0, 0.0, 0.0));
        assert!(mesh.bounds().min.z.abs() < 1e-9);
    }
}
