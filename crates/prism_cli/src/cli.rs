use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use prism_raster::{CullMode, ProjectionMode, RasterConfig, ShadingMode};
use prism_tracer::{ExecutionStrategy, LightingMode, ReferenceScene, RenderConfig};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(version, about = "Software rasterizer and CPU ray tracer")]
pub struct Args {
    /// Set the logging level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// JSON settings file; command line flags override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rasterize a mesh (an OBJ file or the built-in textured quad)
    Raster(RasterArgs),
    /// Ray trace one of the reference scenes
    Trace(TraceArgs),
}

/// Flags shared by both pipelines
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Output BMP path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShadingArg {
    ObservedArea,
    Diffuse,
    Specular,
    Combined,
}

impl From<ShadingArg> for ShadingMode {
    fn from(arg: ShadingArg) -> Self {
        match arg {
            ShadingArg::ObservedArea => ShadingMode::ObservedArea,
            ShadingArg::Diffuse => ShadingMode::Diffuse,
            ShadingArg::Specular => ShadingMode::Specular,
            ShadingArg::Combined => ShadingMode::Combined,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CullArg {
    Back,
    Front,
    None,
}

impl From<CullArg> for CullMode {
    fn from(arg: CullArg) -> Self {
        match arg {
            CullArg::Back => CullMode::Back,
            CullArg::Front => CullMode::Front,
            CullArg::None => CullMode::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProjectionArg {
    ViewSpace,
    ClipSpace,
}

impl From<ProjectionArg> for ProjectionMode {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::ViewSpace => ProjectionMode::ViewSpace,
            ProjectionArg::ClipSpace => ProjectionMode::ClipSpace,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RasterArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// OBJ file to render instead of the built-in quad
    #[arg(long)]
    pub mesh: Option<PathBuf>,

    /// Keep the OBJ's right-handed axes and winding
    #[arg(long)]
    pub no_flip: bool,

    /// Extra mesh rotation about y, in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub yaw: f32,

    /// Diffuse (albedo) texture
    #[arg(long)]
    pub diffuse: Option<String>,

    /// Tangent-space normal map
    #[arg(long)]
    pub normal: Option<String>,

    /// Specular color map
    #[arg(long)]
    pub specular: Option<String>,

    /// Gloss map (red channel scales shininess)
    #[arg(long)]
    pub gloss: Option<String>,

    #[arg(long, value_enum)]
    pub shading: Option<ShadingArg>,

    #[arg(long, value_enum)]
    pub cull: Option<CullArg>,

    #[arg(long, value_enum)]
    pub projection: Option<ProjectionArg>,

    /// Write remapped depth instead of shading
    #[arg(long)]
    pub depth: bool,

    /// Fill triangle bounding boxes instead of their coverage
    #[arg(long)]
    pub bounding_boxes: bool,

    /// Ignore the normal map
    #[arg(long)]
    pub no_normal_map: bool,
}

impl RasterArgs {
    /// Apply command line overrides on top of the file settings.
    pub fn apply(&self, config: &mut RasterConfig) {
        if let Some(width) = self.output.width {
            config.width = width;
        }
        if let Some(height) = self.output.height {
            config.height = height;
        }
        if let Some(shading) = self.shading {
            config.shading_mode = shading.into();
        }
        if let Some(cull) = self.cull {
            config.cull_mode = cull.into();
        }
        if let Some(projection) = self.projection {
            config.projection = projection.into();
        }
        config.show_depth |= self.depth;
        config.show_bounding_boxes |= self.bounding_boxes;
        if self.no_normal_map {
            config.use_normal_map = false;
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneArg {
    Primitives,
    LitSpheres,
    Brdf,
    Meshes,
}

impl From<SceneArg> for ReferenceScene {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Primitives => ReferenceScene::Primitives,
            SceneArg::LitSpheres => ReferenceScene::LitSpheres,
            SceneArg::Brdf => ReferenceScene::Brdf,
            SceneArg::Meshes => ReferenceScene::Meshes,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LightingArg {
    ObservedArea,
    Radiance,
    Brdf,
    Combined,
}

impl From<LightingArg> for LightingMode {
    fn from(arg: LightingArg) -> Self {
        match arg {
            LightingArg::ObservedArea => LightingMode::ObservedArea,
            LightingArg::Radiance => LightingMode::Radiance,
            LightingArg::Brdf => LightingMode::Brdf,
            LightingArg::Combined => LightingMode::Combined,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Synchronous,
    ParallelFor,
    Chunked,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Synchronous => ExecutionStrategy::Synchronous,
            StrategyArg::ParallelFor => ExecutionStrategy::ParallelFor,
            StrategyArg::Chunked => ExecutionStrategy::Chunked,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct TraceArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Reference scene to render
    #[arg(long, value_enum, default_value = "brdf")]
    pub scene: SceneArg,

    #[arg(long, value_enum)]
    pub lighting: Option<LightingArg>,

    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Skip shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    /// Rotation applied to every triangle mesh about y, in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub mesh_yaw: f32,

    /// OBJ file added to the scene as a back-face culled triangle mesh
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// Uniform scale of the `--obj` mesh
    #[arg(long, default_value_t = 1.0)]
    pub obj_scale: f32,
}

impl TraceArgs {
    /// Apply command line overrides on top of the file settings.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.output.width {
            config.width = width;
        }
        if let Some(height) = self.output.height {
            config.height = height;
        }
        if let Some(lighting) = self.lighting {
            config.lighting_mode = lighting.into();
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        if self.no_shadows {
            config.shadows = false;
        }
    }
}
