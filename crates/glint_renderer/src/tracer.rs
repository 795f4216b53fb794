//! Recursive Whitted-style ray tracing.
//!
//! `Tracer` is the render context: it borrows the scene's objects and lights
//! and carries the depth limit and epsilon into every recursive call.

use glint_core::{Intersection, Light, LocalHit, Scene, Shape};
use glint_math::{reflect, refract, Color, Interval, Ray};

/// Render context shared by every ray of a frame.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    objects: &'a [Shape],
    lights: &'a [Light],
    recursion_depth: u32,
    epsilon: f64,
}

impl<'a> Tracer<'a> {
    /// Create a tracer over a scene.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            objects: scene.objects(),
            lights: scene.lights(),
            recursion_depth: scene.recursion_depth(),
            epsilon: scene.epsilon(),
        }
    }

    pub fn recursion_depth(&self) -> u32 {
        self.recursion_depth
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Compute the color seen along a ray at a recursion depth.
    ///
    /// Returns black past the depth limit or when nothing is hit. Otherwise
    /// sums direct lighting from every light (attenuated by its shadow tint)
    /// with the mirror-reflected and refracted contributions.
    pub fn cast_ray(&self, ray: &Ray, depth: u32) -> Color {
        if depth > self.recursion_depth {
            return Color::ZERO;
        }

        let Some(isect) = self.intersects(ray) else {
            return Color::ZERO;
        };
        let material = isect.material();

        let mut color = self.lights.iter().fold(Color::ZERO, |total, light| {
            let tint = self.shadow_ray(&isect, light);
            total + light.compute(&isect, tint, ray)
        });

        let direction = ray.direction.normalize();

        if material.is_reflective() {
            let reflected = Ray::new(isect.point, reflect(direction, isect.normal));
            color += self.cast_ray(&reflected, depth + 1) * material.ks;
        }

        if material.is_transmissive() {
            let bent = if direction.dot(isect.normal) < 0.0 {
                // Entering the surface
                refract(direction, isect.normal, 1.0, material.index)
            } else {
                // Leaving it: refract about the flipped normal
                refract(direction, -isect.normal, material.index, 1.0)
            };

            // Total internal reflection contributes nothing here
            if let Some(bent) = bent {
                let refracted = Ray::new(isect.point, bent);
                color += self.cast_ray(&refracted, depth + 1) * material.kt;
            }
        }

        color
    }

    /// Determine the closest intersecting object along a ray, if any.
    ///
    /// The caller's ray is left untouched. On ties the object added to the
    /// scene first wins.
    pub fn intersects(&self, ray: &Ray) -> Option<Intersection<'a>> {
        let mut closest: Option<(&'a Shape, LocalHit)> = None;
        let mut closest_t = f64::INFINITY;

        for shape in self.objects {
            let ray_t = Interval::new(self.epsilon, closest_t);
            if let Some(hit) = shape.hit_local(ray, ray_t, true) {
                if hit.t < closest_t {
                    closest_t = hit.t;
                    closest = Some((shape, hit));
                }
            }
        }

        closest.map(|(shape, hit)| Intersection {
            t: hit.t,
            point: shape.transform().point_to_world(hit.point),
            normal: shape.transform().normal_to_world(hit.normal),
            shape,
        })
    }

    /// Amount of a light's color that reaches an intersection.
    ///
    /// `(0,0,0)` when fully blocked, `(1,1,1)` when not blocked at all, and
    /// the product of the blockers' `kt` otherwise.
    pub fn shadow_ray(&self, isect: &Intersection, light: &Light) -> Color {
        let (direction, max_t) = light.direction_from(isect.point);
        self.shadow_tint(&Ray::new(isect.point, direction), max_t)
    }

    /// Tint along a ray, ignoring objects further than `max_t`.
    ///
    /// Every object the ray passes through multiplies in its `kt`; an opaque
    /// blocker does not end the walk.
    pub fn shadow_tint(&self, ray: &Ray, max_t: f64) -> Color {
        let ray_t = Interval::new(self.epsilon, max_t);

        self.objects.iter().fold(Color::ONE, |tint, shape| {
            match shape.hit_local(ray, ray_t, false) {
                Some(_) => tint * shape.material().kt,
                None => tint,
            }
        })
    }
}
