//! Glint Renderer - Whitted-style CPU ray tracing
//!
//! Recursive ray tracing of a `glint_core::Scene`:
//! - Closest-hit search and shadow tint queries over the scene's shapes
//! - Direct lighting plus mirror reflection and refraction up to a depth limit
//! - Adaptive supersampling with a shared corner cache
//! - Bucket-parallel rendering via rayon

mod bucket;
mod error;
mod renderer;
mod sampler;
mod tracer;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use error::{RenderError, RenderResult};
pub use renderer::{color_to_rgba, render, ImageBuffer, RenderConfig};
pub use sampler::{to_ndc, CornerCache, Sampler};
pub use tracer::Tracer;

/// Re-export common math types from glint_math
pub use glint_math::{Color, Interval, Ray};
