//! Point and directional lights with Phong-style local shading.

use glint_math::{reflect, Color, DMat4, DVec3, Ray};

use crate::Intersection;

/// Where a light's contribution comes from.
///
/// A light is either positioned or directional, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Light emitted from a point in world space
    Point { position: DVec3 },
    /// Light arriving along a fixed direction.
    ///
    /// The direction is used as stored: shading and shadow rays both treat
    /// it as pointing from the surface toward the light, and it is never
    /// negated.
    Directional { direction: DVec3 },
}

/// A light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light color / intensity (RGB)
    pub color: Color,
    pub kind: LightKind,
}

impl Light {
    /// Create a point light.
    pub fn point(position: DVec3, color: Color) -> Self {
        Self {
            color,
            kind: LightKind::Point { position },
        }
    }

    /// Create a directional light.
    pub fn directional(direction: DVec3, color: Color) -> Self {
        Self {
            color,
            kind: LightKind::Directional { direction },
        }
    }

    /// True for directional lights.
    pub fn is_directional(&self) -> bool {
        matches!(self.kind, LightKind::Directional { .. })
    }

    /// Bake a local-to-world matrix into the light.
    ///
    /// Called once when the light is added to a scene.
    pub fn transformed(&self, m: &DMat4) -> Light {
        let kind = match self.kind {
            LightKind::Point { position } => LightKind::Point {
                position: m.transform_point3(position),
            },
            LightKind::Directional { direction } => {
                let direction = m.transform_vector3(direction);
                if direction.length_squared() == 0.0 {
                    log::warn!("Directional light has a zero-length direction");
                    LightKind::Directional { direction }
                } else {
                    LightKind::Directional {
                        direction: direction.normalize(),
                    }
                }
            }
        };
        Light {
            color: self.color,
            kind,
        }
    }

    /// Unit direction from `point` toward the light and the distance along
    /// it past which blockers no longer matter.
    ///
    /// A point light sitting on `point` has no direction: the result is
    /// `(DVec3::ZERO, 0.0)` and the light contributes nothing there.
    pub fn direction_from(&self, point: DVec3) -> (DVec3, f64) {
        match self.kind {
            LightKind::Point { position } => {
                let to_light = position - point;
                let distance = to_light.length();
                if distance > 0.0 && distance.is_finite() {
                    (to_light / distance, distance)
                } else {
                    (DVec3::ZERO, 0.0)
                }
            }
            LightKind::Directional { direction } => (direction, f64::INFINITY),
        }
    }

    /// Local shading contribution of this light at an intersection.
    ///
    /// `tint` is the transmission along the shadow ray; `ray` is the ray that
    /// produced the intersection.
    pub fn compute(&self, isect: &Intersection, tint: Color, ray: &Ray) -> Color {
        let material = isect.material();
        let (l, _) = self.direction_from(isect.point);
        let view = -ray.direction.normalize();

        // Shade the side the ray arrived from
        let n = if isect.normal.dot(view) < 0.0 {
            -isect.normal
        } else {
            isect.normal
        };

        let n_dot_l = n.dot(l);
        if !(n_dot_l > 0.0) {
            return Color::ZERO;
        }

        let diffuse = material.kd * n_dot_l;
        let r_dot_v = reflect(-l, n).dot(view).max(0.0);
        let specular = material.ks * r_dot_v.powf(material.shininess);

        self.color * tint * (diffuse + specular)
    }
}
