// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod camera;
mod interval;
mod ray;
mod transform;
mod vector;

pub use camera::Camera;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
pub use vector::{any_nonzero, reflect, refract};

/// Color type alias (linear RGB, unclamped)
pub type Color = DVec3;
