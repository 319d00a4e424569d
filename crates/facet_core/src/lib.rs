//! Core data for the facet gem scene toolkit.
//!
//! - [`optics`]: refractive index and dispersion constants for gems and glasses
//! - [`shapes`]: the tube polygon primitive and its tessellation
//! - [`scene`]: cameras, lights, textures and the showcase scene
//! - [`mesh`]: indexed triangle meshes with OBJ export

pub mod mesh;
pub mod optics;
pub mod scene;
pub mod shapes;

pub use mesh::Mesh;
pub use optics::{MaterialTable, Measurement, OpticalProperty, OpticsError};
pub use scene::{
    Finish, Interior, LightSource, Pigment, Scene, SceneError, SceneObject, Shape, Texture,
    Transform,
};
pub use shapes::{PolygonRing, PolygonRingSpec, ShapeError, Tessellation};
