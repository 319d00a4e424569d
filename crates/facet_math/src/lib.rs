// Re-export glam for convenience
pub use glam::*;

// facet math types
mod aabb;
mod camera;
mod transform;

pub use aabb::Aabb;
pub use camera::Camera;
pub use transform::Mat4Ext;

/// Unit direction in the XZ plane at angle `theta` (radians, from +X toward +Z).
#[inline]
pub fn planar_direction(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), 0.0, theta.sin())
}
