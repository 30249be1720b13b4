//! Settings file for both pipelines.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use prism_raster::RasterConfig;
use prism_tracer::RenderConfig;
use serde::{Deserialize, Serialize};

/// Contents of a `--config` JSON file. Every field is optional.
///
/// ```json
/// { "raster": { "cull_mode": "none" }, "trace": { "strategy": "chunked" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub raster: RasterConfig,
    pub trace: RenderConfig,
}

impl PrismConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
