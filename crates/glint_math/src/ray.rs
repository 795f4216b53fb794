use crate::{DMat4, DVec3};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Rays are `Copy`, so
/// moving one into another coordinate space always yields a new value and
/// leaves the caller's ray untouched.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Return this ray moved into the space described by `matrix`.
    ///
    /// The origin is transformed as a point and the direction as a vector.
    /// The direction is NOT renormalized, so a parameter `t` on the returned
    /// ray names the same point as `t` on the original.
    #[inline]
    pub fn transformed(&self, matrix: &DMat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}
