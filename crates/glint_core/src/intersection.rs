//! Result of a world-space scene query.

use glint_math::DVec3;

use crate::{Material, Shape};

/// Nearest valid hit of a ray with the scene, in world space.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Parameter along the query ray
    pub t: f64,
    /// World-space hit point
    pub point: DVec3,
    /// World-space outward normal, unit length
    pub normal: DVec3,
    /// The shape that was hit
    pub shape: &'a Shape,
}

impl<'a> Intersection<'a> {
    /// Material of the hit shape.
    pub fn material(&self) -> &'a Material {
        self.shape.material()
    }
}
