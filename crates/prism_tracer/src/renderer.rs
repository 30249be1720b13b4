//! Light-sampling ray tracer.
//!
//! One primary ray per pixel. For the closest hit, every light contributes
//! according to the lighting mode, optionally gated by a shadow ray. Pixels
//! are independent, so the frame can be filled serially, by rayon's
//! work-stealing pool or by one scoped thread per contiguous bucket; all
//! three produce identical images.

use std::time::Instant;

use prism_core::FrameBuffer;
use prism_math::{colors, Color, ColorExt, PixelRays, Ray, Vec3, RAY_EPSILON};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::generate_buckets;
use crate::hittable::HitRecord;
use crate::scene::Scene;

/// Which part of the lighting equation ends up in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    /// Cosine between normal and light direction
    ObservedArea,
    /// Incoming light only
    Radiance,
    /// Material response only
    Brdf,
    /// BRDF x radiance x cosine
    #[default]
    Combined,
}

impl LightingMode {
    /// Cycle to the next lighting mode.
    pub fn next(self) -> Self {
        match self {
            LightingMode::ObservedArea => LightingMode::Radiance,
            LightingMode::Radiance => LightingMode::Brdf,
            LightingMode::Brdf => LightingMode::Combined,
            LightingMode::Combined => LightingMode::ObservedArea,
        }
    }
}

/// How the pixel loop is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Single thread, row-major
    Synchronous,
    /// Rayon parallel iterator over pixels
    #[default]
    ParallelFor,
    /// One scoped thread per core, each owning a contiguous run of pixels
    Chunked,
}

/// Ray tracer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    pub lighting_mode: LightingMode,
    /// Trace shadow rays toward each light
    pub shadows: bool,
    pub strategy: ExecutionStrategy,
    /// Color of pixels whose primary ray hits nothing
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            lighting_mode: LightingMode::default(),
            shadows: true,
            strategy: ExecutionStrategy::default(),
            background: colors::BLACK,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn cycle_lighting_mode(&mut self) {
        self.config.lighting_mode = self.config.lighting_mode.next();
        log::info!("Lighting mode: {:?}", self.config.lighting_mode);
    }

    pub fn toggle_shadows(&mut self) {
        self.config.shadows = !self.config.shadows;
        log::info!("Shadows: {}", self.config.shadows);
    }

    /// Refresh mesh transforms, then render the scene.
    pub fn render(&self, scene: &mut Scene) -> FrameBuffer {
        scene.update_transforms();
        self.render_frame(scene)
    }

    /// Render a scene whose mesh transforms are current.
    pub fn render_frame(&self, scene: &Scene) -> FrameBuffer {
        let RenderConfig {
            width,
            height,
            strategy,
            ..
        } = self.config;

        let mut camera = scene.camera;
        camera.set_aspect(width as f32 / height as f32);
        let rays = camera.pixel_rays(width, height);

        let mut frame = FrameBuffer::new(width, height);
        let start = Instant::now();

        match strategy {
            ExecutionStrategy::Synchronous => {
                for (index, pixel) in frame.pixels.iter_mut().enumerate() {
                    *pixel = self.render_pixel(scene, &rays, index);
                }
            }
            ExecutionStrategy::ParallelFor => {
                frame
                    .pixels
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(index, pixel)| *pixel = self.render_pixel(scene, &rays, index));
            }
            ExecutionStrategy::Chunked => self.render_chunked(scene, &rays, &mut frame.pixels),
        }

        log::info!(
            "Traced {}x{} ({:?}, {:?}, shadows {}) in {:.2?}",
            width,
            height,
            self.config.lighting_mode,
            strategy,
            self.config.shadows,
            start.elapsed()
        );
        frame
    }

    fn render_chunked(&self, scene: &Scene, rays: &PixelRays, pixels: &mut [Color]) {
        let num_tasks = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let buckets = generate_buckets(pixels.len(), num_tasks);
        log::debug!("Rendering {} buckets", buckets.len());

        std::thread::scope(|s| {
            let mut rest = pixels;
            for bucket in &buckets {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(bucket.len);
                rest = tail;

                let (range, index) = (bucket.range(), bucket.index);
                s.spawn(move || {
                    for (pixel, i) in chunk.iter_mut().zip(range) {
                        *pixel = self.render_pixel(scene, rays, i);
                    }
                    log::trace!("Bucket {} done", index);
                });
            }
        });
    }

    /// Color of the pixel at row-major `index`.
    pub fn render_pixel(&self, scene: &Scene, rays: &PixelRays, index: usize) -> Color {
        let width = self.config.width as usize;
        let (px, py) = ((index % width) as u32, (index / width) as u32);

        let ray = Ray::new(rays.origin, rays.direction(px, py));
        let mut hit = HitRecord::default();
        if !scene.closest_hit(&ray, &mut hit) {
            return self.config.background;
        }

        self.shade_hit(scene, &hit, -ray.direction).max_to_one()
    }

    /// Sum the contribution of every light at `hit`, seen from `v`.
    ///
    /// A scene without lights shows each material unlit.
    pub fn shade_hit(&self, scene: &Scene, hit: &HitRecord, v: Vec3) -> Color {
        let material = scene.material(hit.material);
        if scene.lights().is_empty() {
            return material.shade(hit, v, v);
        }

        let mut color = Color::ZERO;
        for light in scene.lights() {
            let l = light.direction_to(hit.origin).normalize_or_zero();

            if self.config.shadows {
                let shadow_ray = Ray::with_range(
                    hit.origin + hit.normal * RAY_EPSILON,
                    l,
                    RAY_EPSILON,
                    light.distance_to(hit.origin),
                );
                if scene.does_hit(&shadow_ray) {
                    continue;
                }
            }

            let observed_area = hit.normal.dot(l);
            match self.config.lighting_mode {
                LightingMode::ObservedArea => {
                    if observed_area >= 0.0 {
                        color += Color::splat(observed_area);
                    }
                }
                LightingMode::Radiance => color += light.radiance(hit.origin),
                LightingMode::Brdf => color += material.shade(hit, l, v),
                LightingMode::Combined => {
                    if observed_area >= 0.0 {
                        color += material.shade(hit, l, v) * light.radiance(hit.origin) * observed_area;
                    }
                }
            }
        }
        color
    }
}
