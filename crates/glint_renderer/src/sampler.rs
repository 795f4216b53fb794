//! Adaptive supersampling with a shared corner-sample cache.
//!
//! Pixels are sampled at their four corners. Corners sit on the integer
//! lattice of "corner space", where pixel `(i, j)` spans `[i, i+1] × [j, j+1]`,
//! so horizontally and vertically adjacent pixels share two corners each.
//! Those first-level corners are memoized in a `CornerCache`; deeper,
//! sub-pixel corners are always traced directly.

use glint_math::{Camera, Color};

use crate::{RenderConfig, Tracer};

/// Per-render memo of corner colors for a rectangular pixel region.
#[derive(Debug, Clone)]
pub struct CornerCache {
    x0: u32,
    y0: u32,
    /// Corners per row (region width + 1)
    stride: usize,
    rows: usize,
    colors: Vec<Option<Color>>,
    samples_computed: usize,
}

impl CornerCache {
    /// Cache for a whole `width × height` image: `(width+1) × (height+1)` corners.
    pub fn new(width: u32, height: u32) -> Self {
        Self::for_region(0, 0, width, height)
    }

    /// Cache for the pixels `[x0, x0+width) × [y0, y0+height)`.
    pub fn for_region(x0: u32, y0: u32, width: u32, height: u32) -> Self {
        let stride = width as usize + 1;
        let rows = height as usize + 1;
        Self {
            x0,
            y0,
            stride,
            rows,
            colors: vec![None; stride * rows],
            samples_computed: 0,
        }
    }

    fn index(&self, p: u32, q: u32) -> Option<usize> {
        let col = p.checked_sub(self.x0)? as usize;
        let row = q.checked_sub(self.y0)? as usize;
        (col < self.stride && row < self.rows).then(|| row * self.stride + col)
    }

    /// Cached color at corner `(p, q)`, if it has been computed.
    pub fn get(&self, p: u32, q: u32) -> Option<Color> {
        self.index(p, q).and_then(|i| self.colors[i])
    }

    /// Color at corner `(p, q)`, computing and storing it on first use.
    ///
    /// Corners outside the region are computed without being stored.
    pub fn get_or_insert_with<F>(&mut self, p: u32, q: u32, compute: F) -> Color
    where
        F: FnOnce() -> Color,
    {
        let Some(i) = self.index(p, q) else {
            log::warn!("Corner ({p}, {q}) is outside the cached region");
            return compute();
        };

        if let Some(color) = self.colors[i] {
            return color;
        }
        let color = compute();
        self.colors[i] = Some(color);
        self.samples_computed += 1;
        color
    }

    /// Number of corner colors computed through this cache.
    pub fn samples_computed(&self) -> usize {
        self.samples_computed
    }

    /// Forget every cached corner.
    pub fn clear(&mut self) {
        self.colors.iter_mut().for_each(|c| *c = None);
        self.samples_computed = 0;
    }
}

/// Map a corner-space coordinate to the camera's `[-1, 1]` range.
///
/// Pixel centers `i + 0.5` land exactly where the plain per-pixel loop
/// samples: `i / (n - 1) * 2 - 1`. A single-pixel dimension maps to 0.
#[inline]
pub fn to_ndc(s: f64, n: u32) -> f64 {
    if n <= 1 {
        0.0
    } else {
        (s - 0.5) / (n - 1) as f64 * 2.0 - 1.0
    }
}

/// Generates and shades camera rays for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    tracer: &'a Tracer<'a>,
    camera: Camera,
    width: u32,
    height: u32,
    adaptive: bool,
    threshold: f64,
    max_subdivision: u32,
    min_delta: f64,
}

impl<'a> Sampler<'a> {
    /// Create a sampler. `camera` must already be set up for the image size.
    pub fn new(tracer: &'a Tracer<'a>, camera: Camera, config: &RenderConfig) -> Self {
        Self {
            tracer,
            camera,
            width: config.width,
            height: config.height,
            adaptive: config.adaptive,
            threshold: config.adaptive_threshold,
            max_subdivision: config.max_subdivision,
            min_delta: config.min_delta,
        }
    }

    /// Shade the ray through a corner-space position.
    pub fn trace_at(&self, sx: f64, sy: f64) -> Color {
        let ray = self
            .camera
            .pixel_ray(to_ndc(sx, self.width), to_ndc(sy, self.height));
        self.tracer.cast_ray(&ray, 0)
    }

    /// Final color of pixel `(i, j)`.
    pub fn sample_pixel(&self, i: u32, j: u32, cache: &mut CornerCache) -> Color {
        let (cx, cy) = (i as f64 + 0.5, j as f64 + 0.5);
        if self.adaptive {
            self.sample(cx, cy, 0, 0.5, cache)
        } else {
            self.trace_at(cx, cy)
        }
    }

    /// Adaptively sample the square of half-width `delta` around `(cx, cy)`.
    ///
    /// At depth 0, `(cx, cy)` is a pixel center and `delta` is 0.5, so the
    /// corners are lattice points and go through `cache`. The square is
    /// split into quadrants while its corners disagree, up to
    /// `max_subdivision` levels and never below `min_delta`.
    pub fn sample(&self, cx: f64, cy: f64, depth: u32, delta: f64, cache: &mut CornerCache) -> Color {
        let corners = if depth == 0 {
            let (p, q) = (cx.floor() as u32, cy.floor() as u32);
            [(p, q), (p, q + 1), (p + 1, q), (p + 1, q + 1)].map(|(p, q)| {
                cache.get_or_insert_with(p, q, || self.trace_at(p as f64, q as f64))
            })
        } else {
            [
                (cx - delta, cy - delta),
                (cx - delta, cy + delta),
                (cx + delta, cy - delta),
                (cx + delta, cy + delta),
            ]
            .map(|(x, y)| self.trace_at(x, y))
        };

        let half = delta / 2.0;
        if is_smooth(&corners, self.threshold)
            || depth >= self.max_subdivision
            || half < self.min_delta
        {
            return average(&corners);
        }

        let quadrants = [
            (cx - half, cy - half),
            (cx - half, cy + half),
            (cx + half, cy - half),
            (cx + half, cy + half),
        ]
        .map(|(x, y)| self.sample(x, y, depth + 1, half, cache));

        average(&quadrants)
    }
}

/// True if every pair of colors is within `threshold` squared distance.
fn is_smooth(colors: &[Color; 4], threshold: f64) -> bool {
    (0..colors.len()).all(|a| {
        (a + 1..colors.len()).all(|b| colors[a].distance_squared(colors[b]) <= threshold)
    })
}

fn average(colors: &[Color; 4]) -> Color {
    (colors[0] + colors[1] + colors[2] + colors[3]) / 4.0
}
