// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod aabb;
mod camera;
mod color;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use camera::{Camera, PixelRays};
pub use color::{colors, Color, ColorExt};
pub use interval::Interval;
pub use ray::{Ray, RAY_EPSILON};
pub use transform::{reflect, Mat4Ext};

/// Remap `value` from the band [min, max] into [0, 1], clamping outside the band.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    (value.clamp(min, max) - min) / (max - min)
}
