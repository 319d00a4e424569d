//! Scene description types for facet.
//!
//! A scene wires a camera, light sources and textured objects together.
//! Textures carry an optional [`Interior`] whose refraction data comes from
//! the material table, so gems and glasses are described by name.

use facet_math::{Aabb, Camera, Mat4, Mat4Ext, Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::optics::{MaterialTable, OpticalProperty, OpticsError};
use crate::shapes::{PolygonRing, PolygonRingSpec, ShapeError};

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    Optics(#[from] OpticsError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// RGB color, 0-1 per channel.
pub type Color = Vec3;

/// Number of wavelength samples used when a texture disperses light.
pub const DEFAULT_DISPERSION_SAMPLES: u32 = 7;

/// Surface color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pigment {
    /// Flat color; `filter` tints transmitted light, `transmit` passes it unchanged.
    Solid {
        color: Color,
        #[serde(default)]
        filter: f32,
        #[serde(default)]
        transmit: f32,
    },
    /// Alternating unit cubes of two colors, scaled by `scale`.
    Checker { even: Color, odd: Color, scale: f32 },
}

impl Pigment {
    pub fn solid(color: Color) -> Self {
        Pigment::Solid {
            color,
            filter: 0.0,
            transmit: 0.0,
        }
    }

    pub fn is_transparent(&self) -> bool {
        match self {
            Pigment::Solid {
                filter, transmit, ..
            } => *filter > 0.0 || *transmit > 0.0,
            Pigment::Checker { .. } => false,
        }
    }
}

/// Surface lighting response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finish {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub roughness: f32,
    pub reflection: f32,
}

impl Default for Finish {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            diffuse: 0.6,
            specular: 0.0,
            roughness: 0.05,
            reflection: 0.0,
        }
    }
}

impl Finish {
    /// Polished finish for cut stones and glass.
    pub fn polished() -> Self {
        Self {
            ambient: 0.0,
            diffuse: 0.05,
            specular: 0.8,
            roughness: 0.001,
            reflection: 0.1,
        }
    }
}

/// Refraction settings of a transparent object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interior {
    /// Material the values were taken from.
    pub material: String,
    pub ior: f64,
    pub dispersion: Option<f64>,
    pub dispersion_samples: u32,
}

impl Interior {
    pub fn from_property(property: &OpticalProperty) -> Self {
        Self {
            material: property.name().to_string(),
            ior: property.ior(),
            dispersion: property.dispersion(),
            dispersion_samples: DEFAULT_DISPERSION_SAMPLES,
        }
    }
}

/// Pigment, finish and optional interior applied to an object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    pub pigment: Pigment,
    pub finish: Finish,
    pub interior: Option<Interior>,
}

impl Texture {
    /// Opaque texture with the default finish.
    pub fn opaque(name: impl Into<String>, pigment: Pigment) -> Self {
        Self {
            name: name.into(),
            pigment,
            finish: Finish::default(),
            interior: None,
        }
    }

    /// Transparent, polished texture refracting like `material`.
    pub fn gem(
        name: impl Into<String>,
        tint: Color,
        material: &str,
        table: &MaterialTable,
    ) -> SceneResult<Self> {
        let property = table.get(material)?;
        Ok(Self {
            name: name.into(),
            pigment: Pigment::Solid {
                color: tint,
                filter: 0.9,
                transmit: 0.0,
            },
            finish: Finish::polished(),
            interior: Some(Interior::from_property(property)),
        })
    }

    pub fn is_refractive(&self) -> bool {
        self.interior.is_some()
    }
}

/// A light source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub position: Vec3,
    pub color: Color,
    /// Lights the scene without casting shadows.
    #[serde(default)]
    pub shadowless: bool,
}

impl LightSource {
    pub fn point(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            shadowless: false,
        }
    }

    pub fn fill(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            shadowless: true,
        }
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Geometry of a scene object, in object space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Ring(PolygonRing),
    Sphere { center: Vec3, radius: f32 },
    /// Infinite plane `dot(normal, p) = offset`.
    Plane { normal: Vec3, offset: f32 },
}

impl Shape {
    /// Generate a ring shape from its parameters.
    pub fn ring(spec: PolygonRingSpec) -> SceneResult<Self> {
        Ok(Shape::Ring(spec.generate()?))
    }

    /// Object-space bounds, `None` for unbounded shapes.
    pub fn local_bounds(&self) -> Option<Aabb> {
        match self {
            Shape::Ring(ring) => Some(ring.bounds),
            Shape::Sphere { center, radius } => {
                Some(Aabb::from_center(*center, Vec3::splat(*radius)))
            }
            Shape::Plane { .. } => None,
        }
    }
}

/// A textured, placed shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub shape: Shape,
    /// Index into [`Scene::textures`].
    pub texture: usize,
    pub transform: Transform,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, shape: Shape, texture: usize) -> Self {
        Self {
            name: name.into(),
            shape,
            texture,
            transform: Transform::default(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// World-space bounds, `None` for unbounded shapes.
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.shape
            .local_bounds()
            .map(|bounds| self.transform.to_matrix().transform_aabb(&bounds))
    }
}

/// A complete scene: camera, lights, textures and objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub camera: Camera,
    pub lights: Vec<LightSource>,
    pub textures: Vec<Texture>,
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            lights: Vec::new(),
            textures: Vec::new(),
            objects: Vec::new(),
        }
    }

    pub fn add_light(&mut self, light: LightSource) {
        self.lights.push(light);
    }

    /// Add a texture to the scene and return its ID.
    pub fn add_texture(&mut self, texture: Texture) -> usize {
        let id = self.textures.len();
        self.textures.push(texture);
        id
    }

    /// Get a texture by ID.
    pub fn get_texture(&self, id: usize) -> Option<&Texture> {
        self.textures.get(id)
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Find an object by name.
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Bounds of all bounded objects in world space.
    pub fn world_bounds(&self) -> Aabb {
        self.objects
            .iter()
            .filter_map(SceneObject::world_bounds)
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b))
    }

    /// Showcase scene: a diamond sphere between a filled ruby hexagon and an
    /// open emerald octagon standing on a checkered floor.
    pub fn sample(table: &MaterialTable) -> SceneResult<Self> {
        let camera = Camera::new(Vec3::new(0.0, 2.5, -6.0), Vec3::new(0.0, 0.8, 0.0), 4.0 / 3.0)
            .with_angle(50.0);
        let mut scene = Scene::new("gem_showcase", camera);

        scene.add_light(LightSource::point(Vec3::new(-20.0, 40.0, -30.0), Vec3::ONE));
        scene.add_light(LightSource::fill(
            Vec3::new(15.0, 10.0, -20.0),
            Vec3::splat(0.3),
        ));

        let floor = scene.add_texture(Texture::opaque(
            "floor",
            Pigment::Checker {
                even: Vec3::splat(0.9),
                odd: Vec3::splat(0.2),
                scale: 0.5,
            },
        ));
        let diamond = scene.add_texture(Texture::gem("diamond", Vec3::ONE, "Diamond", table)?);
        let ruby = scene.add_texture(Texture::gem(
            "ruby",
            Vec3::new(0.9, 0.1, 0.2),
            "Ruby",
            table,
        )?);
        let emerald = scene.add_texture(Texture::gem(
            "emerald",
            Vec3::new(0.1, 0.8, 0.3),
            "Emerald",
            table,
        )?);

        scene.add_object(SceneObject::new(
            "floor",
            Shape::Plane {
                normal: Vec3::Y,
                offset: 0.0,
            },
            floor,
        ));
        scene.add_object(SceneObject::new(
            "diamond_sphere",
            Shape::Sphere {
                center: Vec3::new(0.0, 0.6, 0.0),
                radius: 0.6,
            },
            diamond,
        ));

        let hexagon = PolygonRingSpec::new(6, 0.12, 0.9)
            .with_segment_radius(0.15)
            .with_filled(true);
        scene.add_object(
            SceneObject::new("ruby_hexagon", Shape::ring(hexagon)?, ruby).with_transform(
                Transform::from_translation(Vec3::new(-2.0, 1.0, 0.5))
                    .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ),
        );

        let octagon = PolygonRingSpec::new(8, 0.08, 0.9).with_segment_radius(0.2);
        scene.add_object(
            SceneObject::new("emerald_octagon", Shape::ring(octagon)?, emerald)
                .with_transform(Transform::from_translation(Vec3::new(2.0, 0.08, 0.5))),
        );

        log::info!(
            "Built sample scene '{}': {} objects, {} lights, {} textures",
            scene.name,
            scene.object_count(),
            scene.light_count(),
            scene.texture_count()
        );

        Ok(scene)
    }
}
