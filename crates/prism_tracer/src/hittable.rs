//! Hit records and the intersection trait shared by every primitive.

use prism_math::{Ray, Vec3};

/// Index into the scene's material list.
pub type MaterialId = usize;

/// Record of a ray-surface intersection.
///
/// Starts at `t = f32::MAX` and is only overwritten by a strictly closer hit,
/// so one record can be threaded through every primitive in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub origin: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Ray parameter of the intersection
    pub t: f32,
    pub did_hit: bool,
    pub material: MaterialId,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::ZERO,
            t: f32::MAX,
            did_hit: false,
            material: 0,
        }
    }
}

impl HitRecord {
    /// Overwrite the record if `t` is strictly closer. Returns whether it was.
    #[inline]
    pub fn record(&mut self, ray: &Ray, t: f32, normal: Vec3, material: MaterialId) -> bool {
        if t >= self.t {
            return false;
        }

        self.origin = ray.at(t);
        self.normal = normal;
        self.t = t;
        self.did_hit = true;
        self.material = material;
        true
    }
}

/// Trait for geometry that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest-hit query within `[ray.min, ray.max]`.
    ///
    /// Returns true (and fills `rec`) only for a hit closer than `rec.t`.
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool;

    /// Any-hit query for shadow rays.
    fn does_hit(&self, ray: &Ray) -> bool;
}
