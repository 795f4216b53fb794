//! JSON scene descriptions.
//!
//! A description is a list of elements inserted in order into a
//! `SceneBuilder`. Groups push the matrix stack, apply their transform ops to
//! their children, and pop again.
//!
//! ```json
//! {
//!   "settings": { "recursion_depth": 4 },
//!   "elements": [
//!     { "type": "material", "name": "red", "kd": [1, 0, 0] },
//!     { "type": "point_light", "position": [0, 5, 0] },
//!     { "type": "group", "transform": [{ "translate": [0, 0, -5] }],
//!       "children": [{ "type": "sphere", "material": "red" }] }
//!   ]
//! }
//! ```

use std::path::Path;

use glint_math::{Camera, Color, DMat4, DVec3};
use serde::Deserialize;

use crate::{
    Cuboid, Light, Material, Plane, Scene, SceneBuilder, SceneError, SceneResult, Sphere,
    Triangle,
};

/// Top-level scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub settings: SceneSettings,
    #[serde(default)]
    pub elements: Vec<ElementDescription>,
}

/// Scene-wide overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneSettings {
    pub recursion_depth: Option<u32>,
    pub epsilon: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDescription {
    pub name: String,
    #[serde(default = "grey")]
    pub kd: [f64; 3],
    #[serde(default)]
    pub ks: [f64; 3],
    #[serde(default)]
    pub kt: [f64; 3],
    #[serde(default = "one")]
    pub index: f64,
    #[serde(default = "default_shininess")]
    pub shininess: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraDescription {
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default = "forward")]
    pub target: [f64; 3],
    #[serde(default = "up")]
    pub up: [f64; 3],
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f64,
    #[serde(default = "one")]
    pub near: f64,
}

/// A single transform operation, applied to the current stack top.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    Translate([f64; 3]),
    Scale([f64; 3]),
    Rotate { axis: [f64; 3], degrees: f64 },
    /// Column-major 4x4 matrix
    Matrix([f64; 16]),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementDescription {
    Material(MaterialDescription),
    Camera(CameraDescription),
    PointLight {
        position: [f64; 3],
        #[serde(default = "white")]
        color: [f64; 3],
        #[serde(default)]
        transform: Vec<TransformOp>,
    },
    DirectionalLight {
        direction: [f64; 3],
        #[serde(default = "white")]
        color: [f64; 3],
        #[serde(default)]
        transform: Vec<TransformOp>,
    },
    Sphere {
        #[serde(default)]
        center: [f64; 3],
        #[serde(default = "one")]
        radius: f64,
        #[serde(default)]
        material: String,
        #[serde(default)]
        transform: Vec<TransformOp>,
    },
    Plane {
        #[serde(default = "up")]
        normal: [f64; 3],
        #[serde(default)]
        offset: f64,
        #[serde(default)]
        material: String,
        #[serde(default)]
        transform: Vec<TransformOp>,
    },
    Triangle {
        vertices: [[f64; 3]; 3],
        #[serde(default)]
        material: String,
        #[serde(default)]
        transform: Vec<TransformOp>,
    },
    #[serde(rename = "box")]
    Cuboid {
        #[serde(default = "neg_ones")]
        min: [f64; 3],
        #[serde(default = "ones")]
        max: [f64; 3],
        #[serde(default)]
        material: String,
        #[serde(default)]
        transform: Vec<TransformOp>,
    },
    Group {
        #[serde(default)]
        transform: Vec<TransformOp>,
        #[serde(default)]
        children: Vec<ElementDescription>,
    },
}

fn one() -> f64 {
    1.0
}

fn default_fov() -> f64 {
    90.0
}

fn default_shininess() -> f64 {
    32.0
}

fn grey() -> [f64; 3] {
    [0.5, 0.5, 0.5]
}

fn white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn ones() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn neg_ones() -> [f64; 3] {
    [-1.0, -1.0, -1.0]
}

fn up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn forward() -> [f64; 3] {
    [0.0, 0.0, -1.0]
}

impl TransformOp {
    fn to_matrix(&self) -> SceneResult<DMat4> {
        match self {
            TransformOp::Translate(v) => Ok(DMat4::from_translation(DVec3::from_array(*v))),
            TransformOp::Scale(v) => Ok(DMat4::from_scale(DVec3::from_array(*v))),
            TransformOp::Rotate { axis, degrees } => {
                let axis = DVec3::from_array(*axis);
                if axis.length_squared() == 0.0 {
                    return Err(SceneError::InvalidDescription(
                        "rotation axis has zero length".to_string(),
                    ));
                }
                Ok(DMat4::from_axis_angle(axis.normalize(), degrees.to_radians()))
            }
            TransformOp::Matrix(cols) => Ok(DMat4::from_cols_array(cols)),
        }
    }
}

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        Material {
            name: desc.name.clone(),
            kd: Color::from_array(desc.kd),
            ks: Color::from_array(desc.ks),
            kt: Color::from_array(desc.kt),
            index: desc.index,
            shininess: desc.shininess,
        }
    }
}

impl From<&CameraDescription> for Camera {
    fn from(desc: &CameraDescription) -> Self {
        Camera::new(
            DVec3::from_array(desc.position),
            DVec3::from_array(desc.target),
            DVec3::from_array(desc.up),
        )
        .with_fov_degrees(desc.fov)
        .with_near(desc.near)
    }
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert every element into a new builder.
    pub fn into_builder(self) -> SceneResult<SceneBuilder> {
        let mut builder = SceneBuilder::new();
        if let Some(depth) = self.settings.recursion_depth {
            builder.set_recursion_depth(depth);
        }
        if let Some(epsilon) = self.settings.epsilon {
            if epsilon < 0.0 {
                return Err(SceneError::InvalidDescription(format!(
                    "epsilon must be non-negative, got {epsilon}"
                )));
            }
            builder.set_epsilon(epsilon);
        }

        for element in &self.elements {
            insert(&mut builder, element)?;
        }
        Ok(builder)
    }

    pub fn build(self) -> SceneResult<Scene> {
        Ok(self.into_builder()?.build())
    }
}

/// Run `f` with `ops` applied on top of the current transform.
fn with_transform<F>(builder: &mut SceneBuilder, ops: &[TransformOp], f: F) -> SceneResult<()>
where
    F: FnOnce(&mut SceneBuilder) -> SceneResult<()>,
{
    if ops.is_empty() {
        return f(builder);
    }

    builder.matrix_stack_mut().push();
    for op in ops {
        let m = op.to_matrix()?;
        builder.matrix_stack_mut().apply(m);
    }
    let result = f(builder);
    builder.matrix_stack_mut().pop()?;
    result
}

fn insert(builder: &mut SceneBuilder, element: &ElementDescription) -> SceneResult<()> {
    match element {
        ElementDescription::Material(desc) => builder.add_material(desc.into()),
        ElementDescription::Camera(desc) => {
            let forward = DVec3::from_array(desc.target) - DVec3::from_array(desc.position);
            if forward.length_squared() == 0.0 {
                return Err(SceneError::InvalidDescription(
                    "camera position and target coincide".to_string(),
                ));
            }
            if DVec3::from_array(desc.up).cross(forward).length_squared() == 0.0 {
                return Err(SceneError::InvalidDescription(
                    "camera up vector is parallel to the view direction".to_string(),
                ));
            }
            builder.set_camera(desc.into());
            Ok(())
        }
        ElementDescription::PointLight {
            position,
            color,
            transform,
        } => with_transform(builder, transform, |b| {
            b.add_light(Light::point(
                DVec3::from_array(*position),
                Color::from_array(*color),
            ));
            Ok(())
        }),
        ElementDescription::DirectionalLight {
            direction,
            color,
            transform,
        } => with_transform(builder, transform, |b| {
            b.add_light(Light::directional(
                DVec3::from_array(*direction),
                Color::from_array(*color),
            ));
            Ok(())
        }),
        ElementDescription::Sphere {
            center,
            radius,
            material,
            transform,
        } => {
            if !(*radius > 0.0 && radius.is_finite()) {
                return Err(SceneError::InvalidDescription(format!(
                    "sphere radius must be positive, got {radius}"
                )));
            }
            with_transform(builder, transform, |b| {
                b.add_shape(Sphere::new(DVec3::from_array(*center), *radius), material)
            })
        }
        ElementDescription::Plane {
            normal,
            offset,
            material,
            transform,
        } => {
            let normal = DVec3::from_array(*normal);
            if normal.length_squared() == 0.0 {
                return Err(SceneError::InvalidDescription(
                    "plane normal has zero length".to_string(),
                ));
            }
            with_transform(builder, transform, |b| {
                b.add_shape(Plane::new(normal, *offset), material)
            })
        }
        ElementDescription::Triangle {
            vertices,
            material,
            transform,
        } => with_transform(builder, transform, |b| {
            let [v0, v1, v2] = vertices.map(DVec3::from_array);
            b.add_shape(Triangle::new(v0, v1, v2), material)
        }),
        ElementDescription::Cuboid {
            min,
            max,
            material,
            transform,
        } => with_transform(builder, transform, |b| {
            b.add_shape(
                Cuboid::new(DVec3::from_array(*min), DVec3::from_array(*max)),
                material,
            )
        }),
        ElementDescription::Group {
            transform,
            children,
        } => {
            builder.matrix_stack_mut().push();
            for op in transform {
                let m = op.to_matrix()?;
                builder.matrix_stack_mut().apply(m);
            }
            for child in children {
                insert(builder, child)?;
            }
            builder.matrix_stack_mut().pop()
        }
    }
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<Scene> {
    SceneDescription::from_json(json)?.build()
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    load_scene_from_str(&json)
}
