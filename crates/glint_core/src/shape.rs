//! Primitive trait and placed shapes.

use std::fmt;
use std::sync::Arc;

use glint_math::{DVec3, Interval, Ray, Transform};

use crate::Material;

/// A hit reported in a primitive's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    /// Ray parameter of the hit
    pub t: f64,
    /// Local-space hit point
    pub point: DVec3,
    /// Local-space outward normal (not necessarily unit length)
    pub normal: DVec3,
}

/// Geometry that can be hit by rays in its own local space.
pub trait Primitive: Send + Sync + fmt::Debug {
    /// Test a local-space ray against this primitive.
    ///
    /// Only hits with `ray_t.surrounds(t)` count. With `find_closest` the
    /// nearest such hit is reported; without it any hit will do (shadow
    /// queries only need to know that something is in the way).
    fn hit(&self, ray: &Ray, ray_t: Interval, find_closest: bool) -> Option<LocalHit>;
}

/// A primitive placed in the world with a material.
#[derive(Debug)]
pub struct Shape {
    primitive: Box<dyn Primitive>,
    transform: Transform,
    material: Arc<Material>,
}

impl Shape {
    /// Create a new shape.
    pub fn new(primitive: Box<dyn Primitive>, transform: Transform, material: Arc<Material>) -> Self {
        Self {
            primitive,
            transform,
            material,
        }
    }

    /// Material of this shape.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Local-to-world transform of this shape.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Test a world-space ray in this shape's local space.
    ///
    /// The caller's ray is not modified. Returned values are still in local
    /// space except `t`, which is shared by both spaces.
    pub fn hit_local(&self, ray: &Ray, ray_t: Interval, find_closest: bool) -> Option<LocalHit> {
        let local = self.transform.ray_to_local(ray);
        self.primitive.hit(&local, ray_t, find_closest)
    }
}
