use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Perspective camera placed with a location and a look-at target.
///
/// `angle` is the full horizontal field of view in degrees, which is how
/// scene description languages usually express it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub location: Vec3,
    pub look_at: Vec3,
    pub sky: Vec3,
    pub angle: f32,
    pub aspect: f32,
}

impl Camera {
    /// Create a new camera with a 45° horizontal field of view.
    pub fn new(location: Vec3, look_at: Vec3, aspect: f32) -> Self {
        Self {
            location,
            look_at,
            sky: Vec3::Y,
            angle: 45.0,
            aspect,
        }
    }

    /// Set the horizontal field of view in degrees.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Unit vector from the camera toward its target.
    pub fn direction(&self) -> Vec3 {
        (self.look_at - self.location).normalize_or_zero()
    }

    /// Unit vector pointing to the right of the image plane.
    pub fn right(&self) -> Vec3 {
        self.direction().cross(self.sky).normalize_or_zero()
    }

    /// Vertical field of view in radians, derived from `angle` and `aspect`.
    pub fn fov_y(&self) -> f32 {
        let half_h = (self.angle.to_radians() * 0.5).tan();
        2.0 * (half_h / self.aspect.max(f32::EPSILON)).atan()
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.location, self.look_at, self.sky)
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection_matrix(&self, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y(), self.aspect, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 16.0 / 9.0);

        assert_eq!(camera.location, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.look_at, Vec3::ZERO);
        assert_eq!(camera.sky, Vec3::Y);
        assert_eq!(camera.angle, 45.0);
    }

    #[test]
    fn test_direction_and_right() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);

        assert!((camera.direction() - Vec3::NEG_Z).length() < 1e-6);
        assert!((camera.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_square_aspect_keeps_angle() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 1.0).with_angle(60.0);
        assert!((camera.fov_y() - 60.0_f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_wide_aspect_narrows_vertical_fov() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 16.0 / 9.0).with_angle(60.0);
        assert!(camera.fov_y() < 60.0_f32.to_radians());
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0);

        let view = camera.view_matrix();
        // Target ends up in front of the camera (negative Z in view space)
        let target = view.transform_point3(Vec3::ZERO);
        assert!((target.z + 5.0).abs() < 1e-5);
    }
}
