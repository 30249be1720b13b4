//! Infinite plane primitive.

use prism_math::{Ray, Vec3, RAY_EPSILON};
use serde::{Deserialize, Serialize};

use crate::hittable::{HitRecord, Hittable, MaterialId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Any point on the plane
    pub origin: Vec3,
    /// Unit normal
    pub normal: Vec3,
    pub material: MaterialId,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3, material: MaterialId) -> Self {
        Self {
            origin,
            normal: normal.normalize_or_zero(),
            material,
        }
    }

    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denominator = self.normal.dot(ray.direction);

        // Parallel (or nearly so)
        if denominator.abs() < RAY_EPSILON {
            return None;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denominator;
        ray.interval().contains(t).then_some(t)
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        match self.intersect(ray) {
            Some(t) => rec.record(ray, t, self.normal, self.material),
            None => false,
        }
    }

    fn does_hit(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_floor() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y, 3);
        let ray = Ray::new(Vec3::new(1.0, 4.0, 2.0), Vec3::NEG_Y);
        let mut rec = HitRecord::default();

        assert!(plane.hit(&ray, &mut rec));
        assert_eq!(rec.t, 4.0);
        assert_eq!(rec.origin, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(rec.normal, Vec3::Y);
        assert_eq!(rec.material, 3);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y, 0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1e-6, 0.0));
        assert!(!plane.does_hit(&ray));
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0);
        assert!(!plane.does_hit(&Ray::new(Vec3::ZERO, Vec3::Z)));
    }

    #[test]
    fn test_hit_from_back_side() {
        // One-sided normals do not matter for planes
        let plane = Plane::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, 0);
        let mut rec = HitRecord::default();

        assert!(plane.hit(&Ray::new(Vec3::ZERO, Vec3::Z), &mut rec));
        assert!((rec.t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_shadow_ray_range() {
        let plane = Plane::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, 0);
        let blocked = Ray::with_range(Vec3::ZERO, Vec3::Y, RAY_EPSILON, 10.0);
        let clear = Ray::with_range(Vec3::ZERO, Vec3::Y, RAY_EPSILON, 4.0);

        assert!(plane.does_hit(&blocked));
        assert!(!plane.does_hit(&clear));
    }
}
