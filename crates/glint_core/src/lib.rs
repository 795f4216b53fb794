//! Glint Core - scene model for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `SceneBuilder`, `Shape`, `Material`, `Light`
//! - **Primitives**: `Sphere`, `Plane`, `Triangle`, `Cuboid`
//! - **Scene files**: JSON scene descriptions loaded through the builder
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.objects().len(),
//!     scene.lights().len());
//! ```

pub mod description;
mod cuboid;
mod error;
mod intersection;
mod light;
mod material;
mod matrix_stack;
mod plane;
pub mod scene;
mod shape;
mod sphere;
mod triangle;

// Re-export commonly used types
pub use cuboid::Cuboid;
pub use description::{load_scene, load_scene_from_str, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use intersection::Intersection;
pub use light::{Light, LightKind};
pub use material::Material;
pub use matrix_stack::MatrixStack;
pub use plane::Plane;
pub use scene::{Scene, SceneBuilder, SceneElement, DEFAULT_EPSILON, DEFAULT_RECURSION_DEPTH};
pub use shape::{LocalHit, Primitive, Shape};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math crate for downstream users
pub use glint_math;
