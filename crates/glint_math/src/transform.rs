// Object-to-world transforms for ray tracing.
//
// Stores the matrix alongside the two derived matrices the tracer needs on
// every query so they are inverted once, at scene construction.

use glam::{DMat4, DVec3};
use crate::Ray;

/// A local-to-world transform with its cached inverse and inverse-transpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Local-to-world matrix
    pub m: DMat4,
    /// World-to-local matrix
    pub m_inverse: DMat4,
    /// Inverse-transpose, for carrying normals to world space
    pub mt_inverse: DMat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: DMat4::IDENTITY,
        m_inverse: DMat4::IDENTITY,
        mt_inverse: DMat4::IDENTITY,
    };

    /// Build a transform from a local-to-world matrix.
    ///
    /// Returns None if the matrix cannot be inverted.
    pub fn new(m: DMat4) -> Option<Self> {
        let det = m.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let m_inverse = m.inverse();
        Some(Self {
            m,
            m_inverse,
            mt_inverse: m_inverse.transpose(),
        })
    }

    /// Move a world-space ray into local space.
    #[inline]
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        ray.transformed(&self.m_inverse)
    }

    /// Move a local-space point into world space.
    #[inline]
    pub fn point_to_world(&self, point: DVec3) -> DVec3 {
        self.m.transform_point3(point)
    }

    /// Move a local-space vector into world space (translation ignored).
    #[inline]
    pub fn vector_to_world(&self, vector: DVec3) -> DVec3 {
        self.m.transform_vector3(vector)
    }

    /// Move a local-space normal into world space. The result is unit length.
    #[inline]
    pub fn normal_to_world(&self, normal: DVec3) -> DVec3 {
        self.mt_inverse.transform_vector3(normal).normalize()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
