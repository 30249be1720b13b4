//! Mesh geometry for the software rasterizer.
//!
//! `Vertex` is the model-space input and is laid out so it can be uploaded
//! verbatim as a GPU vertex buffer. `VertexOut` is what the vertex stage
//! produces each frame; the mesh keeps it as a cache next to its inputs.

use bytemuck::{Pod, Zeroable};
use prism_math::{colors, Aabb, Color, Mat4, Vec2, Vec3, Vec4};

/// Model-space vertex.
///
/// Layout (56 bytes, no padding): position, color, uv, normal, tangent.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Color,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
}

impl Vertex {
    /// A white vertex at `position` with no uv, normal or tangent.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: colors::WHITE,
            uv: Vec2::ZERO,
            normal: Vec3::ZERO,
            tangent: Vec3::ZERO,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_tangent(mut self, tangent: Vec3) -> Self {
        self.tangent = tangent;
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Vertex after the transform stage.
///
/// `position` is (pixel x, pixel y, depth, w). `w` is kept for
/// perspective-correct interpolation; the remaining attributes are carried
/// through rasterization unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    pub position: Vec4,
    pub color: Color,
    pub uv: Vec2,
    /// World-space normal
    pub normal: Vec3,
    /// World-space tangent
    pub tangent: Vec3,
    /// From the camera to the world-space vertex position
    pub view_direction: Vec3,
}

impl From<&Vertex> for VertexOut {
    fn from(vertex: &Vertex) -> Self {
        Self {
            position: Vec4::ZERO,
            color: vertex.color,
            uv: vertex.uv,
            normal: vertex.normal,
            tangent: vertex.tangent,
            view_direction: Vec3::ZERO,
        }
    }
}

impl Default for VertexOut {
    fn default() -> Self {
        Self::from(&Vertex::default())
    }
}

/// How the index buffer is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    #[default]
    TriangleList,
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Assemble triangles from an index buffer.
    ///
    /// Strips flip the winding of every odd triangle so all triangles share
    /// the orientation of the first. Triangles with a repeated index (strip
    /// restarts) are skipped.
    pub fn triangles(self, indices: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
        let (step, count) = match self {
            PrimitiveTopology::TriangleList => (3, indices.len() / 3),
            PrimitiveTopology::TriangleStrip => (1, indices.len().saturating_sub(2)),
        };

        (0..count)
            .map(move |n| {
                let i = n * step;
                let (a, b, c) = (indices[i], indices[i + 1], indices[i + 2]);
                if self == PrimitiveTopology::TriangleStrip && i % 2 == 1 {
                    [a, c, b]
                } else {
                    [a, b, c]
                }
            })
            .filter(|&[a, b, c]| a != b && b != c && c != a)
    }
}

/// Indexed triangle mesh with a world transform and a per-frame vertex cache.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    /// Model → world
    pub world: Mat4,
    /// Output of the last vertex transform pass; stale once `world` or the camera changes.
    pub vertices_out: Vec<VertexOut>,
}

impl Mesh {
    /// Create a new mesh with an identity world matrix.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world: Mat4::IDENTITY,
            vertices_out: Vec::new(),
        }
    }

    /// Set the world matrix.
    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    /// Spin the mesh about its local y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.world *= Mat4::from_rotation_y(angle);
    }

    /// Get the number of triangles the topology assembles (including skipped degenerates).
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            PrimitiveTopology::TriangleList => self.indices.len() / 3,
            PrimitiveTopology::TriangleStrip => self.indices.len().saturating_sub(2),
        }
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Model-space bounding box.
    pub fn bounds(&self) -> Aabb {
        let positions: Vec<Vec3> = self.vertices.iter().map(|v| v.position).collect();
        Aabb::enclosing(&positions)
    }
}
