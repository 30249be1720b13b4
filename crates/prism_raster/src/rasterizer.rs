//! Triangle setup, coverage and the per-pixel depth test.
//!
//! Coverage uses edge functions evaluated at pixel centers with a top-left
//! fill rule, so two triangles sharing an edge never both write a pixel on
//! it. Depth is `1/z` interpolated in screen space; every other attribute is
//! divided by `w` before interpolation and multiplied back afterwards.

use prism_core::{FrameBuffer, Mesh, VertexOut};
use prism_math::{colors, remap, Camera, Color, ColorExt, Vec2, Vec3, Vec4};

use crate::config::{CullMode, ProjectionMode, RasterConfig};
use crate::depth::DepthBuffer;
use crate::shading::{shade_pixel, TextureSet};
use crate::vertex_stage::{is_outside_frustum, transform_meshes};

/// Twice the signed area of (a, b, c). Positive when c lies to the right of
/// a → b on a y-down screen.
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

// Shared edges evaluate bit-identically from both triangles.
#[inline]
fn oriented_edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    if (a.x, a.y) <= (b.x, b.y) {
        edge_function(a, b, p)
    } else {
        -edge_function(b, a, p)
    }
}

/// Top edges run exactly horizontal to the right, left edges run upwards.
#[inline]
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let e = b - a;
    (e.y == 0.0 && e.x > 0.0) || e.y < 0.0
}

/// Normalized barycentric weights of `pixel`, if the triangle owns it.
///
/// `p` must have positive area (`area = edge_function(p[0], p[1], p[2])`).
#[inline]
pub fn coverage(p: [Vec2; 3], area: f32, pixel: Vec2) -> Option<Vec3> {
    let inside = |w: f32, a: Vec2, b: Vec2| w > 0.0 || (w == 0.0 && is_top_left(a, b));

    let w0 = oriented_edge(p[1], p[2], pixel);
    if !inside(w0, p[1], p[2]) {
        return None;
    }
    let w1 = oriented_edge(p[2], p[0], pixel);
    if !inside(w1, p[2], p[0]) {
        return None;
    }
    let w2 = oriented_edge(p[0], p[1], pixel);
    if !inside(w2, p[0], p[1]) {
        return None;
    }

    Some(Vec3::new(w0, w1, w2) / area)
}

/// Half-open pixel rectangle `[min, max)` clamped to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    /// Screen-space bounds of a triangle, or `None` if nothing is left after clamping.
    pub fn of_triangle(p: [Vec2; 3], width: u32, height: u32) -> Option<Self> {
        let lo = p[0].min(p[1]).min(p[2]).floor().max(Vec2::ZERO);
        let hi = p[0].max(p[1]).max(p[2]).ceil().min(Vec2::new(width as f32, height as f32));

        if !(lo.x < hi.x && lo.y < hi.y) {
            return None;
        }

        Some(Self {
            min_x: lo.x as u32,
            min_y: lo.y as u32,
            max_x: hi.x as u32,
            max_y: hi.y as u32,
        })
    }

    /// Row-major pixel coordinates inside the box.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..self.max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}

#[inline]
fn screen_xy(v: &VertexOut) -> Vec2 {
    Vec2::new(v.position.x, v.position.y)
}

/// Depth at a pixel from its weights and the reciprocal vertex depths.
#[inline]
pub fn depth_at(weights: Vec3, inv_z: Vec3) -> f32 {
    1.0 / weights.dot(inv_z)
}

/// Perspective-correct interpolation of all vertex attributes.
///
/// The returned position is `(pixel x, pixel y, depth, w)`.
pub fn interpolate(v: [&VertexOut; 3], weights: Vec3, pixel: Vec2) -> VertexOut {
    let inv_z = Vec3::new(1.0 / v[0].position.z, 1.0 / v[1].position.z, 1.0 / v[2].position.z);
    let inv_w = Vec3::new(1.0 / v[0].position.w, 1.0 / v[1].position.w, 1.0 / v[2].position.w);

    let depth = depth_at(weights, inv_z);
    let pw = weights * inv_w;
    let w = 1.0 / (pw.x + pw.y + pw.z);

    let lerp3 = |a: Vec3, b: Vec3, c: Vec3| (a * pw.x + b * pw.y + c * pw.z) * w;

    VertexOut {
        position: Vec4::new(pixel.x, pixel.y, depth, w),
        color: lerp3(v[0].color, v[1].color, v[2].color),
        uv: (v[0].uv * pw.x + v[1].uv * pw.y + v[2].uv * pw.z) * w,
        normal: lerp3(v[0].normal, v[1].normal, v[2].normal).normalize_or_zero(),
        tangent: lerp3(v[0].tangent, v[1].tangent, v[2].tangent).normalize_or_zero(),
        view_direction: lerp3(v[0].view_direction, v[1].view_direction, v[2].view_direction).normalize_or_zero(),
    }
}

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles_submitted: usize,
    /// Rejected by the frustum test, the cull mode or for zero area
    pub triangles_culled: usize,
    pub triangles_drawn: usize,
    /// Fragments that passed the depth test
    pub fragments_written: usize,
}

/// Software rasterizer owning its color and depth buffers.
pub struct Rasterizer {
    config: RasterConfig,
    textures: TextureSet,
    frame: FrameBuffer,
    depth: DepthBuffer,
    /// Depth band the depth view stretches to [0, 1]
    depth_range: (f32, f32),
    stats: RasterStats,
}

impl Rasterizer {
    pub fn new(config: RasterConfig) -> Self {
        let (width, height) = (config.width, config.height);
        Self {
            depth_range: config.depth_band,
            config,
            textures: TextureSet::default(),
            frame: FrameBuffer::new(width, height),
            depth: DepthBuffer::new(width, height),
            stats: RasterStats::default(),
        }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Mutable settings. Resolution changes take effect at the next frame.
    pub fn config_mut(&mut self) -> &mut RasterConfig {
        &mut self.config
    }

    pub fn set_textures(&mut self, textures: TextureSet) {
        self.textures = textures;
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Counters for the last frame.
    pub fn stats(&self) -> RasterStats {
        self.stats
    }

    pub fn cycle_shading_mode(&mut self) {
        self.config.shading_mode = self.config.shading_mode.next();
        log::info!("Shading mode: {:?}", self.config.shading_mode);
    }

    pub fn cycle_cull_mode(&mut self) {
        self.config.cull_mode = self.config.cull_mode.next();
        log::info!("Cull mode: {:?}", self.config.cull_mode);
    }

    pub fn toggle_depth_view(&mut self) {
        self.config.show_depth = !self.config.show_depth;
        log::info!("Depth view: {}", self.config.show_depth);
    }

    pub fn toggle_bounding_boxes(&mut self) {
        self.config.show_bounding_boxes = !self.config.show_bounding_boxes;
        log::info!("Bounding boxes: {}", self.config.show_bounding_boxes);
    }

    pub fn toggle_normal_map(&mut self) {
        self.config.use_normal_map = !self.config.use_normal_map;
        log::info!("Normal map: {}", self.config.use_normal_map);
    }

    /// Clear both buffers and reset counters, reallocating on a resolution change.
    pub fn begin_frame(&mut self, camera: &Camera) {
        let (width, height) = (self.config.width, self.config.height);
        if self.frame.width != width || self.frame.height != height {
            self.frame = FrameBuffer::new(width, height);
            self.depth = DepthBuffer::new(width, height);
        } else {
            self.depth.clear();
        }
        self.frame.clear(self.config.clear_color);

        self.depth_range = match self.config.projection {
            ProjectionMode::ViewSpace => (camera.near, camera.far),
            ProjectionMode::ClipSpace => self.config.depth_band,
        };
        self.stats = RasterStats::default();
    }

    /// Transform and draw `meshes`, returning the finished frame.
    pub fn render(&mut self, meshes: &mut [Mesh], camera: &Camera) -> &FrameBuffer {
        self.begin_frame(camera);
        transform_meshes(
            meshes,
            camera,
            self.config.projection,
            self.config.width,
            self.config.height,
        );

        for mesh in meshes.iter() {
            self.render_mesh(mesh);
        }

        log::debug!(
            "Rasterized {} / {} triangles ({} culled), {} fragments",
            self.stats.triangles_drawn,
            self.stats.triangles_submitted,
            self.stats.triangles_culled,
            self.stats.fragments_written
        );
        &self.frame
    }

    /// Draw a mesh whose `vertices_out` is current.
    pub fn render_mesh(&mut self, mesh: &Mesh) {
        let out = &mesh.vertices_out;
        for [i0, i1, i2] in mesh.topology.triangles(&mesh.indices) {
            self.render_triangle(&out[i0 as usize], &out[i1 as usize], &out[i2 as usize]);
        }
    }

    /// Rasterize one transformed triangle.
    pub fn render_triangle(&mut self, v0: &VertexOut, v1: &VertexOut, v2: &VertexOut) {
        let RasterConfig {
            width,
            height,
            projection,
            cull_mode,
            ..
        } = self.config;
        self.stats.triangles_submitted += 1;

        if [v0, v1, v2].iter().any(|v| is_outside_frustum(v, projection, width, height)) {
            self.stats.triangles_culled += 1;
            return;
        }

        let area = edge_function(screen_xy(v0), screen_xy(v1), screen_xy(v2));
        let keep = match cull_mode {
            CullMode::Back => area >= f32::EPSILON,
            CullMode::Front => area <= -f32::EPSILON,
            CullMode::None => area.abs() >= f32::EPSILON,
        };
        if !keep {
            self.stats.triangles_culled += 1;
            return;
        }

        // Reorder to positive area so coverage has a single orientation
        let (v1, v2, area) = if area < 0.0 { (v2, v1, -area) } else { (v1, v2, area) };
        let vertices = [v0, v1, v2];
        let p = [screen_xy(v0), screen_xy(v1), screen_xy(v2)];

        let Some(bbox) = BoundingBox::of_triangle(p, width, height) else {
            self.stats.triangles_culled += 1;
            return;
        };
        self.stats.triangles_drawn += 1;

        if self.config.show_bounding_boxes {
            for (x, y) in bbox.pixels() {
                self.frame.set(x, y, colors::WHITE);
            }
            return;
        }

        let inv_z = Vec3::new(1.0 / v0.position.z, 1.0 / v1.position.z, 1.0 / v2.position.z);

        for (x, y) in bbox.pixels() {
            let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(weights) = coverage(p, area, pixel) else {
                continue;
            };

            let depth = depth_at(weights, inv_z);
            if !self.depth.test_and_set(x, y, depth) {
                continue;
            }

            let color = if self.config.show_depth {
                Color::splat(remap(depth, self.depth_range.0, self.depth_range.1))
            } else {
                let fragment = interpolate(vertices, weights, pixel);
                shade_pixel(
                    &fragment,
                    &self.textures,
                    &self.config.light,
                    self.config.shading_mode,
                    self.config.use_normal_map,
                )
            };

            self.frame.set(x, y, color.max_to_one());
            self.stats.fragments_written += 1;
        }
    }
}
