//! Rasterizer settings.

use prism_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::shading::ShadingMode;

/// Which transform path the vertex stage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// View-space divide by z, scaled by fov and aspect. Depth is view z.
    ViewSpace,
    /// Full view-projection matrix and perspective divide. Depth is NDC z in [0, 1].
    #[default]
    ClipSpace,
}

/// Which triangle facing is discarded, judged by screen-space winding.
///
/// Triangles whose vertices run clockwise on screen have positive area and
/// are front facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    #[default]
    Back,
    Front,
    None,
}

impl CullMode {
    /// Cycle to the next cull mode.
    pub fn next(self) -> Self {
        match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        }
    }
}

/// The single directional light of the rasterizer path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingData {
    /// Direction the light travels (normalized on use)
    pub direction: Vec3,
    pub intensity: f32,
    /// Phong exponent, scaled by the gloss map
    pub shininess: f32,
    pub ambient: Color,
}

impl Default for LightingData {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.577, -0.577, 0.577),
            intensity: 7.0,
            shininess: 25.0,
            ambient: Color::splat(0.025),
        }
    }
}

/// Rasterizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    pub projection: ProjectionMode,
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    /// Output remapped depth as grayscale instead of shading
    pub show_depth: bool,
    /// Fill each triangle's clamped bounding box instead of its coverage
    pub show_bounding_boxes: bool,
    /// Perturb normals with the normal map, when one is bound
    pub use_normal_map: bool,
    /// Background color the frame is cleared to
    pub clear_color: Color,
    /// Clip-space depth band stretched to [0, 1] by the depth view
    pub depth_band: (f32, f32),
    pub light: LightingData,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            projection: ProjectionMode::default(),
            cull_mode: CullMode::default(),
            shading_mode: ShadingMode::default(),
            show_depth: false,
            show_bounding_boxes: false,
            use_normal_map: true,
            clear_color: Color::splat(0.39),
            depth_band: (0.997, 1.0),
            light: LightingData::default(),
        }
    }
}

impl RasterConfig {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
