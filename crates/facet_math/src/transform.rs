// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3() and transform_vector3();
// this adds bounds handling for placed scene objects.

use glam::Mat4;

use crate::Aabb;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }

        Aabb::enclosing(aabb.corners().iter().map(|&c| self.transform_point3(c)))
    }
}
