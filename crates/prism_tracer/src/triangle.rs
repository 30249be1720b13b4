//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use prism_math::{Ray, Vec3, RAY_EPSILON};
use serde::{Deserialize, Serialize};

use crate::hittable::{HitRecord, Hittable, MaterialId};

/// Which side of a triangle rays pass through unseen.
///
/// The front face is the side `cross(v1 - v0, v2 - v0)` points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleCullMode {
    FrontFace,
    #[default]
    BackFace,
    None,
}

impl TriangleCullMode {
    /// Cycle to the next cull mode.
    pub fn next(self) -> Self {
        match self {
            TriangleCullMode::FrontFace => TriangleCullMode::BackFace,
            TriangleCullMode::BackFace => TriangleCullMode::None,
            TriangleCullMode::None => TriangleCullMode::FrontFace,
        }
    }
}

/// Möller-Trumbore ray-triangle intersection.
///
/// `shadow` flips the culled side: shadow rays run from the surface toward
/// the light, opposite to the light's own rays, so a triangle visible from
/// the light side is hit on its back by them.
#[inline]
pub(crate) fn intersect_triangle(
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    cull_mode: TriangleCullMode,
    ray: &Ray,
    shadow: bool,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    // a > 0: the ray meets the front face
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < RAY_EPSILON {
        return None;
    }

    let culled = match (cull_mode, shadow) {
        (TriangleCullMode::None, _) => false,
        (TriangleCullMode::BackFace, false) | (TriangleCullMode::FrontFace, true) => a < 0.0,
        (TriangleCullMode::FrontFace, false) | (TriangleCullMode::BackFace, true) => a > 0.0,
    };
    if culled {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray.interval().contains(t).then_some(t)
}

/// A single triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Unit face normal
    pub normal: Vec3,
    pub cull_mode: TriangleCullMode,
    pub material: MaterialId,
}

impl Triangle {
    /// Create a triangle with the winding normal `cross(v1 - v0, v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self::with_normal(v0, v1, v2, normal)
    }

    /// Create a triangle with an explicit normal.
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: normal.normalize_or_zero(),
            cull_mode: TriangleCullMode::default(),
            material: 0,
        }
    }

    pub fn with_cull_mode(mut self, cull_mode: TriangleCullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = material;
        self
    }

    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        match intersect_triangle(self.v0, self.v1, self.v2, self.cull_mode, ray, false) {
            Some(t) => rec.record(ray, t, self.normal, self.material),
            None => false,
        }
    }

    fn does_hit(&self, ray: &Ray) -> bool {
        intersect_triangle(self.v0, self.v1, self.v2, self.cull_mode, ray, true).is_some()
    }
}
