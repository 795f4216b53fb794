use glam::{DMat4, DVec3};

use crate::Ray;

/// Pinhole camera for ray generation.
///
/// In camera space the eye sits at the origin looking down -Z, with the image
/// plane at `z = -near`. `pixel_ray` starts rays on that plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view in radians
    pub fov_y: f64,
    pub aspect: f64,
    /// Distance from the eye to the image plane
    pub near: f64,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: DVec3, target: DVec3, up: DVec3) -> Self {
        Self {
            position,
            target,
            up,
            ..Default::default()
        }
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov_degrees(mut self, fov_y: f64) -> Self {
        self.fov_y = fov_y.to_radians();
        self
    }

    /// Set image plane distance.
    pub fn with_near(mut self, near: f64) -> Self {
        self.near = near;
        self
    }

    /// Configure the camera for an image resolution.
    pub fn setup(&mut self, width: u32, height: u32) {
        self.aspect = if height == 0 {
            1.0
        } else {
            width as f64 / height as f64
        };
    }

    /// Camera-to-world matrix built from an orthonormal basis.
    pub fn camera_to_world(&self) -> DMat4 {
        let w = (self.position - self.target).normalize();
        let u = self.up.cross(w).normalize();
        let v = w.cross(u);
        DMat4::from_cols(
            u.extend(0.0),
            v.extend(0.0),
            w.extend(0.0),
            self.position.extend(1.0),
        )
    }

    /// Generate the ray through normalized image coordinates `x, y ∈ [-1, 1]`.
    ///
    /// The ray starts on the image plane and its direction is unit length.
    pub fn pixel_ray(&self, x: f64, y: f64) -> Ray {
        let half_height = self.near * (self.fov_y / 2.0).tan();
        let half_width = half_height * self.aspect;

        let on_plane = DVec3::new(x * half_width, y * half_height, -self.near);
        let to_world = self.camera_to_world();

        Ray::new(
            to_world.transform_point3(on_plane),
            to_world.transform_vector3(on_plane.normalize()).normalize(),
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            target: DVec3::new(0.0, 0.0, -1.0),
            up: DVec3::Y,
            fov_y: 90.0_f64.to_radians(),
            aspect: 1.0,
            near: 1.0,
        }
    }
}
