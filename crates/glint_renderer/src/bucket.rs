//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use glint_math::Color;
use rayon::prelude::*;

use crate::{CornerCache, ImageBuffer, RenderConfig, Sampler};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's lower-left pixel
    pub x: u32,
    /// Y coordinate of bucket's lower-left pixel
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Render a single bucket to a vector of colors.
///
/// The bucket gets its own corner cache, so corners on its border are
/// traced again by neighbouring buckets. Returns pixels in row-major order
/// within the bucket.
pub fn render_bucket(bucket: &Bucket, sampler: &Sampler) -> BucketResult {
    let mut cache = CornerCache::for_region(bucket.x, bucket.y, bucket.width, bucket.height);
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = sampler.sample_pixel(bucket.x + local_x, bucket.y + local_y, &mut cache);
            pixels.push(color);
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into place.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        let b = &self.bucket;
        for (i, color) in self.pixels.iter().enumerate() {
            let i = i as u32;
            image.set(b.x + i % b.width, b.y + i / b.width, *color);
        }
    }
}

/// Render every bucket on the rayon thread pool and assemble the image.
pub fn render_parallel(sampler: &Sampler, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    log::debug!(
        "Rendering {} buckets of up to {}px on {} threads",
        buckets.len(),
        config.bucket_size,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, sampler))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        result.write_to(&mut image);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tracer;
    use glint_core::{Light, Material, SceneBuilder, Sphere};
    use glint_math::DVec3;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        assert_eq!(first.index, 0);
    }

    #[test]
    fn test_write_to_places_pixels() {
        let bucket = Bucket::new(1, 2, 2, 1, 0);
        let result = BucketResult::new(bucket, vec![Color::X, Color::Y]);
        let mut image = ImageBuffer::new(4, 4);

        result.write_to(&mut image);
        assert_eq!(image.get(1, 2), Color::X);
        assert_eq!(image.get(2, 2), Color::Y);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut builder = SceneBuilder::new();
        builder
            .add_material(
                Material::new("shiny", Color::new(0.8, 0.3, 0.2))
                    .with_specular(Color::splat(0.5), 16.0),
            )
            .unwrap();
        builder.matrix_stack_mut().translate(DVec3::new(0.3, -0.2, -3.0));
        builder.add_shape(Sphere::unit(), "shiny").unwrap();
        builder.matrix_stack_mut().load_identity();
        builder.add_light(Light::point(DVec3::new(2.0, 3.0, 1.0), Color::ONE));
        let scene = builder.build();

        let config = RenderConfig {
            width: 23,
            height: 17,
            adaptive: true,
            bucket_size: 5,
            ..Default::default()
        };
        let mut camera = *scene.camera();
        camera.setup(config.width, config.height);
        let tracer = Tracer::new(&scene);
        let sampler = Sampler::new(&tracer, camera, &config);

        let parallel = render_parallel(&sampler, &config);

        let mut cache = CornerCache::new(config.width, config.height);
        for y in 0..config.height {
            for x in 0..config.width {
                assert_eq!(parallel.get(x, y), sampler.sample_pixel(x, y, &mut cache));
            }
        }
    }
}
