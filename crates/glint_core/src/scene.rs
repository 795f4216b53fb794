//! Scene types for Glint.
//!
//! A `SceneBuilder` collects materials, lights, shapes and a camera, baking
//! the current matrix-stack transform into each element as it is added.
//! `build` freezes the result into an immutable `Scene` for rendering.

use std::sync::Arc;

use glint_math::{Camera, Transform};

use crate::{Light, Material, MatrixStack, Primitive, SceneError, SceneResult, Shape};

/// Default maximum number of reflection/refraction bounces.
pub const DEFAULT_RECURSION_DEPTH: u32 = 3;

/// Default minimum accepted hit parameter.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// One element to insert into a scene.
#[derive(Debug)]
pub enum SceneElement {
    /// A primitive and the name of its material ("" means "default")
    Shape {
        primitive: Box<dyn Primitive>,
        material: String,
    },
    Light(Light),
    Material(Material),
    Camera(Camera),
}

/// A complete scene ready for rendering.
#[derive(Debug)]
pub struct Scene {
    objects: Vec<Shape>,
    lights: Vec<Light>,
    materials: Vec<Arc<Material>>,
    camera: Camera,
    recursion_depth: u32,
    epsilon: f64,
}

impl Scene {
    /// Shapes in insertion order.
    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    /// Lights, already in world space.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Materials, "default" first.
    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Maximum recursion depth for a ray.
    pub fn recursion_depth(&self) -> u32 {
        self.recursion_depth
    }

    /// Minimum t value accepted by intersection queries.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Fetch a material by name.
    pub fn material(&self, name: &str) -> SceneResult<&Arc<Material>> {
        find_material(&self.materials, name)
    }
}

/// Assembles a `Scene`.
#[derive(Debug)]
pub struct SceneBuilder {
    objects: Vec<Shape>,
    lights: Vec<Light>,
    materials: Vec<Arc<Material>>,
    camera: Option<Camera>,
    matrix_stack: MatrixStack,
    recursion_depth: u32,
    epsilon: f64,
}

impl SceneBuilder {
    /// Create an empty builder holding only the default material.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            materials: vec![Arc::new(Material::default())],
            camera: None,
            matrix_stack: MatrixStack::new(),
            recursion_depth: DEFAULT_RECURSION_DEPTH,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Add a new scene element.
    pub fn add(&mut self, element: SceneElement) -> SceneResult<()> {
        match element {
            SceneElement::Shape {
                primitive,
                material,
            } => self.add_boxed_shape(primitive, &material),
            SceneElement::Light(light) => {
                self.add_light(light);
                Ok(())
            }
            SceneElement::Material(material) => self.add_material(material),
            SceneElement::Camera(camera) => {
                self.set_camera(camera);
                Ok(())
            }
        }
    }

    /// Add a shape under the current transform.
    pub fn add_shape(&mut self, primitive: impl Primitive + 'static, material: &str) -> SceneResult<()> {
        self.add_boxed_shape(Box::new(primitive), material)
    }

    fn add_boxed_shape(&mut self, primitive: Box<dyn Primitive>, material: &str) -> SceneResult<()> {
        let material = Arc::clone(find_material(&self.materials, material)?);
        let transform =
            Transform::new(self.matrix_stack.peek()).ok_or(SceneError::SingularTransform)?;

        self.objects.push(Shape::new(primitive, transform, material));
        Ok(())
    }

    /// Add a light, baking the current transform into it.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light.transformed(&self.matrix_stack.peek()));
    }

    /// Add a material. Names must be unique.
    pub fn add_material(&mut self, material: Material) -> SceneResult<()> {
        if self.materials.iter().any(|m| m.name == material.name) {
            return Err(SceneError::DuplicateMaterial(material.name));
        }
        self.materials.push(Arc::new(material));
        Ok(())
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn set_recursion_depth(&mut self, depth: u32) {
        self.recursion_depth = depth;
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Fetch a material by name.
    pub fn material(&self, name: &str) -> SceneResult<&Arc<Material>> {
        find_material(&self.materials, name)
    }

    /// Transform stack applied to shapes and lights as they are added.
    pub fn matrix_stack(&self) -> &MatrixStack {
        &self.matrix_stack
    }

    pub fn matrix_stack_mut(&mut self) -> &mut MatrixStack {
        &mut self.matrix_stack
    }

    /// Finish construction.
    ///
    /// A scene without a camera gets the default camera.
    pub fn build(self) -> Scene {
        let camera = self.camera.unwrap_or_else(|| {
            log::info!("No camera specified, using default camera");
            Camera::default()
        });

        if self.matrix_stack.depth() != 0 {
            log::warn!(
                "Scene built with {} unmatched matrix stack push(es)",
                self.matrix_stack.depth()
            );
        }
        if self.objects.is_empty() {
            log::warn!("Scene has no objects");
        }

        log::info!(
            "Built scene: {} objects, {} lights, {} materials",
            self.objects.len(),
            self.lights.len(),
            self.materials.len()
        );

        Scene {
            objects: self.objects,
            lights: self.lights,
            materials: self.materials,
            camera,
            recursion_depth: self.recursion_depth,
            epsilon: self.epsilon,
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact, case-sensitive lookup. An empty name means "default".
fn find_material<'m>(materials: &'m [Arc<Material>], name: &str) -> SceneResult<&'m Arc<Material>> {
    let name = if name.is_empty() {
        Material::DEFAULT_NAME
    } else {
        name
    };

    materials
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| SceneError::UndefinedMaterial(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Sphere};
    use glint_math::{Color, DVec3};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_default_material_always_present() {
        let scene = SceneBuilder::new().build();
        assert_eq!(scene.materials().len(), 1);
        assert_eq!(scene.material("default").unwrap().name, "default");
        assert_eq!(scene.material("").unwrap().name, "default");
    }

    #[test]
    fn test_default_camera_and_settings() {
        init_logging();
        let scene = SceneBuilder::new().build();

        assert_eq!(*scene.camera(), Camera::default());
        assert_eq!(scene.recursion_depth(), 3);
        assert_eq!(scene.epsilon(), 1e-5);
    }

    #[test]
    fn test_material_lookup_is_exact() {
        let mut builder = SceneBuilder::new();
        builder.add_material(Material::new("Red", Color::new(1.0, 0.0, 0.0))).unwrap();

        assert!(builder.material("Red").is_ok());
        assert!(matches!(
            builder.material("red"),
            Err(SceneError::UndefinedMaterial(name)) if name == "red"
        ));
    }

    #[test]
    fn test_shape_with_unknown_material_fails() {
        let mut builder = SceneBuilder::new();
        let result = builder.add_shape(Sphere::unit(), "missing");

        assert!(matches!(result, Err(SceneError::UndefinedMaterial(_))));
    }

    #[test]
    fn test_duplicate_material_rejected() {
        let mut builder = SceneBuilder::new();
        let result = builder.add_material(Material::default());

        assert!(matches!(result, Err(SceneError::DuplicateMaterial(name)) if name == "default"));
    }

    #[test]
    fn test_shape_gets_material_and_transform() {
        init_logging();
        let mut builder = SceneBuilder::new();
        builder.add_material(Material::new("blue", Color::new(0.0, 0.0, 1.0))).unwrap();

        builder.matrix_stack_mut().push();
        builder.matrix_stack_mut().translate(DVec3::new(0.0, 0.0, -5.0));
        builder.add_shape(Sphere::unit(), "blue").unwrap();
        builder.matrix_stack_mut().pop().unwrap();
        builder.add_shape(Cuboid::unit(), "").unwrap();

        let scene = builder.build();
        assert_eq!(scene.objects().len(), 2);

        let sphere = &scene.objects()[0];
        assert_eq!(sphere.material().name, "blue");
        assert_eq!(
            sphere.transform().point_to_world(DVec3::ZERO),
            DVec3::new(0.0, 0.0, -5.0)
        );

        let cuboid = &scene.objects()[1];
        assert_eq!(cuboid.material().name, "default");
        assert_eq!(*cuboid.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_light_transform_baked_once() {
        let mut builder = SceneBuilder::new();
        builder.matrix_stack_mut().translate(DVec3::new(1.0, 0.0, 0.0));
        builder.add_light(Light::point(DVec3::ZERO, Color::ONE));
        builder.matrix_stack_mut().load_identity();

        let scene = builder.build();
        assert_eq!(
            scene.lights()[0],
            Light::point(DVec3::new(1.0, 0.0, 0.0), Color::ONE)
        );
    }

    #[test]
    fn test_singular_transform_rejected() {
        let mut builder = SceneBuilder::new();
        builder.matrix_stack_mut().scale(DVec3::new(0.0, 1.0, 1.0));

        assert!(matches!(
            builder.add_shape(Sphere::unit(), ""),
            Err(SceneError::SingularTransform)
        ));
    }

    #[test]
    fn test_add_elements_by_tag() {
        let mut builder = SceneBuilder::new();
        builder
            .add(SceneElement::Material(Material::new("m", Color::ONE)))
            .unwrap();
        builder
            .add(SceneElement::Shape {
                primitive: Box::new(Sphere::unit()),
                material: "m".to_string(),
            })
            .unwrap();
        builder
            .add(SceneElement::Light(Light::directional(DVec3::Y, Color::ONE)))
            .unwrap();
        let camera = Camera::default().with_near(2.0);
        builder.add(SceneElement::Camera(camera)).unwrap();

        let scene = builder.build();
        assert_eq!(scene.objects().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.materials().len(), 2);
        assert_eq!(scene.camera().near, 2.0);
    }
}
