//! Surface materials for Whitted-style shading.

use glint_math::{any_nonzero, Color};

/// A named surface material.
///
/// `kd` scales diffuse light, `ks` scales both highlights and the mirror
/// reflection, and `kt` scales both shadow transmission and the refracted
/// ray. `index` is the refractive index of the material's interior.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (lookup key, case-sensitive)
    pub name: String,

    /// Diffuse coefficient (RGB)
    pub kd: Color,

    /// Specular / reflective coefficient (RGB)
    pub ks: Color,

    /// Transmissive coefficient (RGB)
    pub kt: Color,

    /// Refractive index
    pub index: f64,

    /// Phong exponent for highlights
    pub shininess: f64,
}

impl Material {
    /// Name of the material every scene starts with.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create a new diffuse material.
    pub fn new(name: impl Into<String>, kd: Color) -> Self {
        Self {
            name: name.into(),
            kd,
            ..Default::default()
        }
    }

    /// Set the specular / reflective coefficient.
    pub fn with_specular(mut self, ks: Color, shininess: f64) -> Self {
        self.ks = ks;
        self.shininess = shininess;
        self
    }

    /// Set the transmissive coefficient and refractive index.
    pub fn with_transmission(mut self, kt: Color, index: f64) -> Self {
        self.kt = kt;
        self.index = index;
        self
    }

    /// True if reflected rays contribute.
    pub fn is_reflective(&self) -> bool {
        any_nonzero(self.ks)
    }

    /// True if refracted rays contribute.
    pub fn is_transmissive(&self) -> bool {
        any_nonzero(self.kt)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            kd: Color::new(0.5, 0.5, 0.5), // Grey default
            ks: Color::ZERO,
            kt: Color::ZERO,
            index: 1.0,
            shininess: 32.0,
        }
    }
}
