//! Sphere primitive.

use glint_math::{DVec3, Interval, Ray};

use crate::shape::{LocalHit, Primitive};

/// A sphere in local space. Placement comes from the shape transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// The unit sphere at the origin.
    pub fn unit() -> Self {
        Self::new(DVec3::ZERO, 1.0)
    }
}

impl Primitive for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, _find_closest: bool) -> Option<LocalHit> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // The near root is always the closest, so both modes take it first
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(LocalHit {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let hit = sphere.hit(&ray, Interval::beyond(1e-5), true).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-12);
        assert!((hit.normal - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);

        assert!(sphere.hit(&ray, Interval::beyond(1e-5), true).is_none());
    }

    #[test]
    fn test_sphere_inside_hits_far_side() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let hit = Sphere::unit().hit(&ray, Interval::beyond(1e-5), true).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-12);
        // Outward normal, same side as the ray direction
        assert!(hit.normal.dot(ray.direction) > 0.0);
    }

    #[test]
    fn test_sphere_respects_max() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        let ray_t = Interval::new(1e-5, 3.0);

        assert!(Sphere::unit().hit(&ray, ray_t, false).is_none());
    }
}
