//! A single mesh facet.

use crate::mesh::mesh3d::Bounds3;
use nalgebra::Point3;

use crate::float_types::Real;

/// Three vertices in an unspecified but fixed winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3 {
    pub v0: Point3<Real>,
    pub v1: Point3<Real>,
    pub v2: Point3<Real>,
}

impl Triangle3 {
    pub fn new(v0: Point3<Real>, v1: Point3<Real>, v2: Point3<Real>) -> Self {
        Self { v0, v1, v2 }
    }

    /// The triangle's three directed edges, in winding order.
    pub fn edges(&self) -> [(Point3<Real>, Point3<Real>); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    pub fn bounds(&self) -> Bounds3 {
        let mut b = Bounds3::empty();
        b.expand_point(&self.v0);
        b.expand_point(&self.v1);
        b.expand_point(&self.v2);
        b
    }

    pub fn vertices(&self) -> [Point3<Real>; 3] {
        [self.v0, self.v1, self.v2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_vertices() {
        let t = Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 2.0),
        );
        let b = t.bounds();
        assert_eq!(b.min.x, 0.0);
        assert_eq!(b.max.z, 2.0);
    }
}
