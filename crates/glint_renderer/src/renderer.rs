//! Frame rendering.
//!
//! Drives the sampler over every pixel of the image:
//! - Optional adaptive supersampling with corner reuse
//! - Single-threaded row order, or bucket-parallel via rayon
//! - Linear colors, clamped only when exported

use std::path::Path;
use std::time::Instant;

use glint_core::Scene;
use glint_math::{Color, Interval};
use serde::Deserialize;

use crate::bucket::{render_parallel, DEFAULT_BUCKET_SIZE};
use crate::{CornerCache, RenderError, RenderResult, Sampler, Tracer};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Subdivide pixels whose corners disagree
    pub adaptive: bool,
    /// Largest squared color distance between corners still considered smooth
    pub adaptive_threshold: f64,
    /// Maximum number of subdivision levels below a pixel
    pub max_subdivision: u32,
    /// Smallest sub-pixel half-width worth sampling
    pub min_delta: f64,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            adaptive: false,
            adaptive_threshold: 0.025,
            max_subdivision: 4,
            min_delta: 1.0 / 64.0,
            parallel: false,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        log::debug!("Loaded render config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject configurations the renderer cannot run.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.bucket_size == 0 {
            return Err(RenderError::Config("bucket_size must be positive".to_string()));
        }
        if self.adaptive_threshold.is_nan() || self.min_delta.is_nan() {
            return Err(RenderError::Config(
                "adaptive_threshold and min_delta must be numbers".to_string(),
            ));
        }
        Ok(())
    }
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Rendered image with linear, unclamped colors.
///
/// `(0, 0)` is the bottom-left pixel, matching the camera's y-up convention.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Convert to RGBA bytes, top row first.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&color_to_rgba(self.get(x, y)));
            }
        }
        bytes
    }

    /// Write the image to disk. The format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba()).ok_or(
            RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            },
        )?;
        image.save(path.as_ref())?;
        log::info!("Saved {}", path.as_ref().display());
        Ok(())
    }
}

/// Render the scene.
///
/// Uses the scene's camera, set up for the configured image size. With
/// `config.parallel` the image is split into buckets; otherwise pixels are
/// rendered row by row sharing one corner cache.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let mut camera = *scene.camera();
    camera.setup(config.width, config.height);

    let tracer = Tracer::new(scene);
    let sampler = Sampler::new(&tracer, camera, config);

    log::info!(
        "Rendering {}x{} (adaptive: {}, parallel: {})",
        config.width,
        config.height,
        config.adaptive,
        config.parallel
    );
    let start = Instant::now();

    let image = if config.parallel {
        render_parallel(&sampler, config)
    } else {
        render_rows(&sampler, config)
    };

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

fn render_rows(sampler: &Sampler, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    let mut cache = CornerCache::new(config.width, config.height);

    for y in 0..config.height {
        for x in 0..config.width {
            let color = sampler.sample_pixel(x, y, &mut cache);
            image.set(x, y, color);
        }
        log::debug!("Row {}/{} done", y + 1, config.height);
    }

    if config.adaptive {
        log::debug!(
            "Corner cache computed {} samples for {} pixels",
            cache.samples_computed(),
            image.pixels.len()
        );
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Light, Material, SceneBuilder, Sphere};
    use glint_math::DVec3;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn small(adaptive: bool) -> RenderConfig {
        RenderConfig {
            width: 12,
            height: 9,
            adaptive,
            ..Default::default()
        }
    }

    fn sphere_scene() -> Scene {
        let mut builder = SceneBuilder::new();
        builder
            .add_material(Material::new("red", Color::new(1.0, 0.0, 0.0)))
            .unwrap();
        builder.matrix_stack_mut().translate(DVec3::new(0.0, 0.0, -3.0));
        builder.add_shape(Sphere::unit(), "red").unwrap();
        builder.matrix_stack_mut().load_identity();
        builder.add_light(Light::point(DVec3::new(0.0, 0.0, 5.0), Color::ONE));
        builder.build()
    }

    #[test]
    fn test_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert!(!config.adaptive);
        assert_eq!(config.adaptive_threshold, 0.025);
        assert_eq!(config.max_subdivision, 4);
        assert_eq!(config.min_delta, 1.0 / 64.0);
        assert_eq!(config.bucket_size, 64);
    }

    #[test]
    fn test_config_partial_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 32, "adaptive": true }"#).unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 480);
        assert!(config.adaptive);
    }

    #[test]
    fn test_config_validation() {
        let config = RenderConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidDimensions { width: 0, height: 480 })
        ));

        let config = RenderConfig {
            bucket_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::Config(_))));
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
    }

    #[test]
    fn test_image_rows_exported_top_down() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 0, Color::ZERO);
        image.set(0, 1, Color::ONE);

        let bytes = image.to_rgba();
        assert_eq!(&bytes[0..4], &[255, 255, 255, 255]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_empty_scene_renders_black() {
        init_logging();
        let scene = SceneBuilder::new().build();
        for adaptive in [false, true] {
            let image = render(&scene, &small(adaptive)).unwrap();
            assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
        }
    }

    #[test]
    fn test_render_rejects_invalid_dimensions() {
        let scene = SceneBuilder::new().build();
        let config = RenderConfig {
            height: 0,
            ..Default::default()
        };
        assert!(matches!(
            render(&scene, &config),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_render_sphere_center_lit() {
        init_logging();
        let scene = sphere_scene();
        let config = RenderConfig {
            width: 11,
            height: 11,
            ..Default::default()
        };
        let image = render(&scene, &config).unwrap();

        // Center ray hits the sphere head-on, facing the light
        let center = image.get(5, 5);
        assert!((center - Color::new(1.0, 0.0, 0.0)).length() < 1e-9);
        // Corner rays miss
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.get(10, 10), Color::ZERO);
    }

    #[test]
    fn test_render_is_deterministic() {
        init_logging();
        let scene = sphere_scene();
        let first = render(&scene, &small(true)).unwrap();
        let second = render(&scene, &small(true)).unwrap();
        assert_eq!(first.pixels, second.pixels);
    }
}
