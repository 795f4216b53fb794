//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{DVec3, Interval, Ray};

use crate::shape::{LocalHit, Primitive};

/// A triangle primitive. The normal follows counter-clockwise winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
    /// Pre-computed face normal (unit length)
    normal: DVec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self { v0, v1, v2, normal }
    }
}

impl Primitive for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval, _find_closest: bool) -> Option<LocalHit> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-12 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(LocalHit {
            t,
            point: ray.at(t),
            normal: self.normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 3.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = unit_triangle().hit(&ray, Interval::beyond(1e-5), true).unwrap();

        assert!((hit.t - 3.0).abs() < 1e-12);
        assert!((hit.normal - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let ray = Ray::new(DVec3::new(2.0, 2.0, 3.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(unit_triangle().hit(&ray, Interval::beyond(1e-5), true).is_none());
    }

    #[test]
    fn test_triangle_parallel() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 3.0), DVec3::X);
        assert!(unit_triangle().hit(&ray, Interval::beyond(1e-5), true).is_none());
    }
}
