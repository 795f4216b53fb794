//! Infinite plane primitive.

use glint_math::{DVec3, Interval, Ray};

use crate::shape::{LocalHit, Primitive};

/// The plane of points `p` with `normal · p = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    offset: f64,
}

impl Plane {
    /// Create a new plane. The normal is normalized.
    pub fn new(normal: DVec3, offset: f64) -> Self {
        let length = normal.length();
        Self {
            normal: normal / length,
            offset: offset / length,
        }
    }

    /// The `y = 0` ground plane facing up.
    pub fn ground() -> Self {
        Self::new(DVec3::Y, 0.0)
    }
}

impl Primitive for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval, _find_closest: bool) -> Option<LocalHit> {
        let denom = self.normal.dot(ray.direction);
        // Parallel to the plane
        if denom.abs() < 1e-12 {
            return None;
        }

        let t = (self.offset - self.normal.dot(ray.origin)) / denom;
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

    #[test]
    fn test_plane_hit_from_above() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(0.0, -1.0, 0.0));
        let hit = Plane::ground().hit(&ray, Interval::beyond(1e-5), true).unwrap();

        assert!((hit.t - 2.0).abs() < 1e-12);
        assert_eq!(hit.normal, DVec3::Y);
    }

    #[test]
    fn test_plane_parallel_miss() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::X);
        assert!(Plane::ground().hit(&ray, Interval::beyond(1e-5), true).is_none());
    }

    #[test]
    fn test_plane_behind_origin_miss() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::Y);
        assert!(Plane::ground().hit(&ray, Interval::beyond(1e-5), true).is_none());
    }

    #[test]
    fn test_plane_offset_normalized() {
        // 2y = 4 is the plane y = 2
        let plane = Plane::new(DVec3::new(0.0, 2.0, 0.0), 4.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        let hit = plane.hit(&ray, Interval::beyond(1e-5), true).unwrap();

        assert!((hit.t - 2.0).abs() < 1e-12);
    }
}
