use crate::{Interval, Vec3};

/// Default lower bound on the ray parameter, keeps surfaces from hitting themselves.
pub const RAY_EPSILON: f32 = 1e-4;

/// A ray in 3D space with origin, direction, and a valid `t` range.
///
/// The direction is normalized on construction; intersection routines rely
/// on `t` being a distance along the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub min: f32,
    pub max: f32,
}

impl Ray {
    /// Create a new ray with the default `[RAY_EPSILON, f32::MAX]` range.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_range(origin, direction, RAY_EPSILON, f32::MAX)
    }

    /// Create a ray with an explicit `t` range.
    pub fn with_range(origin: Vec3, direction: Vec3, min: f32, max: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            min,
            max,
        }
    }

    /// The valid `t` range as an interval.
    #[inline]
    pub fn interval(&self) -> Interval {
        Interval::new(self.min, self.max)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
