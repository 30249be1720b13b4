//! Sphere primitive.

use prism_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::hittable::{HitRecord, Hittable, MaterialId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(origin: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            origin,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Entry and exit distances along the (normalized) ray, unbounded by its range.
    ///
    /// Geometric solution: project the center onto the ray, then step back
    /// and forth by the half chord.
    pub fn roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        let l = self.origin - ray.origin;
        let tca = l.dot(ray.direction);
        let d2 = l.length_squared() - tca * tca;
        let r2 = self.radius * self.radius;

        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        Some((tca - thc, tca + thc))
    }

    /// Nearest root inside the ray range.
    #[inline]
    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        let (t0, t1) = self.roots(ray)?;
        let range = ray.interval();

        if range.contains(t0) {
            Some(t0)
        } else if range.contains(t1) {
            Some(t1)
        } else {
            None
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let Some(t) = self.nearest_t(ray) else {
            return false;
        };
        if t >= rec.t {
            return false;
        }

        let normal = (ray.at(t) - self.origin).normalize_or_zero();
        rec.record(ray, t, normal, self.material)
    }

    fn does_hit(&self, ray: &Ray) -> bool {
        self.nearest_t(ray).is_some()
    }
}
