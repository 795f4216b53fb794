//! Axis-aligned box primitive.

use glint_math::{DVec3, Interval, Ray};

use crate::shape::{LocalHit, Primitive};

/// An axis-aligned box between two corners in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    min: DVec3,
    max: DVec3,
}

impl Cuboid {
    /// Create a box from two opposite corners.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The box from -1 to 1 on every axis.
    pub fn unit() -> Self {
        Self::new(DVec3::NEG_ONE, DVec3::ONE)
    }
}

impl Primitive for Cuboid {
    /// Slab test. Reports the entry face, or the exit face when the ray
    /// starts inside the box.
    fn hit(&self, ray: &Ray, ray_t: Interval, _find_closest: bool) -> Option<LocalHit> {
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;

        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_axis = axis;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = axis;
            }
            if t_exit < t_enter {
                return None;
            }
        }

        let (t, axis, sign) = if ray_t.surrounds(t_enter) {
            (t_enter, enter_axis, -ray.direction[enter_axis].signum())
        } else if ray_t.surrounds(t_exit) {
            (t_exit, exit_axis, ray.direction[exit_axis].signum())
        } else {
            return None;
        };

        Some(LocalHit {
            t,
            point: ray.at(t),
            normal: DVec3::AXES[axis] * sign,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_entry_face() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = Cuboid::unit().hit(&ray, Interval::beyond(1e-5), true).unwrap();

        assert!((hit.t - 4.0).abs() < 1e-12);
        assert_eq!(hit.normal, DVec3::Z);
    }

    #[test]
    fn test_box_exit_face_from_inside() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
        let hit = Cuboid::unit().hit(&ray, Interval::beyond(1e-5), true).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-12);
        assert_eq!(hit.normal, DVec3::X);
    }

    #[test]
    fn test_box_miss() {
        let ray = Ray::new(DVec3::new(0.0, 3.0, 5.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(Cuboid::unit().hit(&ray, Interval::beyond(1e-5), true).is_none());
    }

    #[test]
    fn test_box_corners_sorted() {
        let cuboid = Cuboid::new(DVec3::ONE, DVec3::NEG_ONE);
        assert_eq!(cuboid, Cuboid::unit());
    }
}
