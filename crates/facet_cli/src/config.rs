//! TOML scene configuration.
//!
//! ```toml
//! name = "pendant"
//!
//! [camera]
//! location = [0.0, 2.0, -5.0]
//! look_at = [0.0, 0.5, 0.0]
//!
//! [[light]]
//! position = [-20.0, 40.0, -30.0]
//!
//! [[object]]
//! name = "setting"
//! material = "Ruby"
//! color = [0.9, 0.1, 0.2]
//! shape = { type = "ring", corner_count = 6, tube_radius = 0.1, base_width = 1.0 }
//! ```

use std::path::Path;

use anyhow::Context;
use facet_core::PolygonRingSpec;
use serde::Deserialize;

/// Top-level scene configuration.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default, rename = "light")]
    pub lights: Vec<LightConfig>,
    #[serde(default, rename = "object")]
    pub objects: Vec<ObjectConfig>,
}

fn default_name() -> String {
    "scene".into()
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_location")]
    pub location: [f32; 3],
    #[serde(default)]
    pub look_at: [f32; 3],
    /// Horizontal field of view in degrees.
    #[serde(default = "default_angle")]
    pub angle: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: default_camera_location(),
            look_at: [0.0; 3],
            angle: default_angle(),
            aspect: default_aspect(),
        }
    }
}

fn default_camera_location() -> [f32; 3] {
    [0.0, 2.0, -5.0]
}
fn default_angle() -> f32 {
    45.0
}
fn default_aspect() -> f32 {
    4.0 / 3.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    pub position: [f32; 3],
    #[serde(default = "default_white")]
    pub color: [f32; 3],
    #[serde(default)]
    pub shadowless: bool,
}

/// A single object in the scene.
#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    /// Material name or alias. Objects without one are opaque.
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default = "default_white")]
    pub color: [f32; 3],
    #[serde(default)]
    pub translate: [f32; 3],
    /// Euler XYZ rotation in degrees.
    #[serde(default)]
    pub rotate: [f32; 3],
    pub shape: ShapeConfig,
}

fn default_white() -> [f32; 3] {
    [1.0; 3]
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
    Ring(PolygonRingSpec),
    /// Sphere centered on the object's origin.
    Sphere { radius: f32 },
    Plane {
        #[serde(default = "default_up")]
        normal: [f32; 3],
        #[serde(default)]
        offset: f32,
    },
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

/// Parse a scene configuration from TOML text.
pub fn parse_config(content: &str) -> anyhow::Result<SceneConfig> {
    let config: SceneConfig = toml::from_str(content)?;
    Ok(config)
}

/// Load a scene configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<SceneConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid scene config {}", path.display()))
}
