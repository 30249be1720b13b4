// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3() (w = 1, translation applied)
// and transform_vector3() (w = 0, translation ignored).

use crate::{Aabb, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal. Uses the inverse-transpose so non-uniform
    /// scale keeps normals perpendicular to their surface. Result is unit length.
    fn transform_normal3(&self, normal: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners. Empty stays empty.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_normal3(&self, normal: Vec3) -> Vec3 {
        self.inverse()
            .transpose()
            .transform_vector3(normal)
            .normalize_or_zero()
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }

        let lo = aabb.min_corner();
        let hi = aabb.max_corner();

        let corners: Vec<Vec3> = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { lo.x } else { hi.x },
                    if i & 2 == 0 { lo.y } else { hi.y },
                    if i & 4 == 0 { lo.z } else { hi.z },
                )
            })
            .map(|corner| self.transform_point3(corner))
            .collect();

        Aabb::enclosing(&corners)
    }
}

/// Reflect the incident vector `i` about the normal `n`.
#[inline]
pub fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * i.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_transform_vector3_ignores_translation() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));

        assert_eq!(mat.transform_vector3(Vec3::X), Vec3::X);
        assert_eq!(mat.transform_point3(Vec3::X), Vec3::new(11.0, 20.0, 30.0));
    }

    #[test]
    fn test_transform_normal_non_uniform_scale() {
        // A 45 degree slope squashed along x: the normal must stay perpendicular.
        let mat = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let tangent = Vec3::new(1.0, 1.0, 0.0);
        let normal = Vec3::new(1.0, -1.0, 0.0).normalize();

        let t = mat.transform_vector3(tangent);
        let n = mat.transform_normal3(normal);

        assert!(t.dot(n).abs() < 1e-5);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transform_aabb_translation() {
        let mat = Mat4::from_translation(Vec3::splat(5.0));
        let transformed = mat.transform_aabb(&Aabb::from_points(Vec3::ZERO, Vec3::ONE));

        assert!((transformed.min_corner() - Vec3::splat(5.0)).length() < 0.001);
        assert!((transformed.max_corner() - Vec3::splat(6.0)).length() < 0.001);
    }

    #[test]
    fn test_transform_aabb_rotation_grows_box() {
        let mat = Mat4::from_rotation_y(PI / 4.0);
        let transformed = mat.transform_aabb(&Aabb::from_points(-Vec3::ONE, Vec3::ONE));

        let expected = 2.0_f32.sqrt();
        assert!((transformed.x.max - expected).abs() < 0.001);
        assert!((transformed.z.min + expected).abs() < 0.001);
        assert!((transformed.y.max - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_transform_empty_aabb() {
        let mat = Mat4::from_translation(Vec3::ONE) * Mat4::from_rotation_y(PI / 3.0);
        assert!(mat.transform_aabb(&Aabb::EMPTY).is_empty());
    }

    #[test]
    fn test_reflect() {
        let n = Vec3::Y;
        let i = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(i, n), Vec3::new(1.0, 1.0, 0.0));

        // Reflecting twice returns the original vector
        assert_eq!(reflect(reflect(i, n), n), i);
    }
}
