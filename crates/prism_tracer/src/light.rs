//! Point and directional lights.

use prism_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Point,
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Position (point lights)
    pub origin: Vec3,
    /// Direction the light travels (directional lights)
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            origin,
            direction: Vec3::ZERO,
            color,
            intensity,
            kind: LightKind::Point,
        }
    }

    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: direction.normalize_or_zero(),
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    /// Unnormalized vector from `target` toward the light.
    pub fn direction_to(&self, target: Vec3) -> Vec3 {
        match self.kind {
            LightKind::Point => self.origin - target,
            LightKind::Directional => -self.direction,
        }
    }

    /// How far a shadow ray from `target` has to travel to reach the light.
    pub fn distance_to(&self, target: Vec3) -> f32 {
        match self.kind {
            LightKind::Point => self.origin.distance(target),
            LightKind::Directional => f32::MAX,
        }
    }

    /// Incoming radiance at `target`. Point lights fall off with distance squared.
    pub fn radiance(&self, target: Vec3) -> Color {
        match self.kind {
            LightKind::Point => self.color * (self.intensity / self.origin.distance_squared(target)),
            LightKind::Directional => self.color * self.intensity,
        }
    }
}
