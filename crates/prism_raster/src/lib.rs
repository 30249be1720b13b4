//! Prism Raster - software triangle rasterizer.
//!
//! Pipeline per frame:
//!
//! 1. **Vertex stage**: model → world → screen, either through a view-space
//!    divide or the full view-projection matrix ([`ProjectionMode`])
//! 2. **Triangle setup**: frustum rejection, cull mode, clamped bounding box
//! 3. **Coverage**: edge functions with a top-left fill rule
//! 4. **Depth test**: `1/z` interpolation against a [`DepthBuffer`]
//! 5. **Shading**: perspective-correct attributes into [`shade_pixel`]
//!
//! # Example
//!
//! ```ignore
//! use prism_raster::{RasterConfig, Rasterizer};
//!
//! let mut rasterizer = Rasterizer::new(RasterConfig::default());
//! let frame = rasterizer.render(&mut meshes, &camera);
//! frame.save_bmp("raster.bmp")?;
//! ```

mod config;
mod depth;
mod rasterizer;
mod shading;
mod vertex_stage;

pub use config::{CullMode, LightingData, ProjectionMode, RasterConfig};
pub use depth::DepthBuffer;
pub use rasterizer::{coverage, depth_at, edge_function, interpolate, BoundingBox, RasterStats, Rasterizer};
pub use shading::{shade_pixel, shading_normal, ShadingMode, TextureSet};
pub use vertex_stage::{is_outside_frustum, ndc_to_screen, project_point, transform_mesh, transform_meshes, world_matrix};
