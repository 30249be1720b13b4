//! Model space → screen space.
//!
//! Output positions are `(pixel x, pixel y, depth, w)` with pixel (0, 0) at
//! the top-left corner of the image. `w` is the view-space depth on both
//! paths and drives perspective-correct interpolation.

use prism_core::{Mesh, VertexOut};
use prism_math::{Camera, Mat4, Mat4Ext, Vec2, Vec3, Vec4};

use crate::config::ProjectionMode;

/// NDC (-1..1, y up) → pixel coordinates (y down).
#[inline]
pub fn ndc_to_screen(ndc: Vec2, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    )
}

/// Project a world-space point.
pub fn project_point(world_pos: Vec3, camera: &Camera, mode: ProjectionMode, width: u32, height: u32) -> Vec4 {
    match mode {
        ProjectionMode::ViewSpace => {
            let view = camera.view_matrix().transform_point3(world_pos);
            project_view(view, camera.aspect * camera.fov_scale(), camera.fov_scale(), width, height)
        }
        ProjectionMode::ClipSpace => {
            let clip = camera.view_projection_matrix() * world_pos.extend(1.0);
            project_clip(clip, width, height)
        }
    }
}

/// Divide by view z, scale to NDC and map to the viewport. Depth and w are view z.
#[inline]
fn project_view(view: Vec3, scale_x: f32, scale_y: f32, width: u32, height: u32) -> Vec4 {
    let ndc = Vec2::new(view.x / view.z / scale_x, view.y / view.z / scale_y);
    let screen = ndc_to_screen(ndc, width, height);
    Vec4::new(screen.x, screen.y, view.z, view.z)
}

/// Perspective divide and viewport mapping for a clip-space position.
#[inline]
fn project_clip(clip: Vec4, width: u32, height: u32) -> Vec4 {
    let ndc = clip.truncate() / clip.w;
    let screen = ndc_to_screen(ndc.truncate(), width, height);
    Vec4::new(screen.x, screen.y, ndc.z, clip.w)
}

/// Refresh `mesh.vertices_out` for the current world matrix and camera.
pub fn transform_mesh(mesh: &mut Mesh, camera: &Camera, mode: ProjectionMode, width: u32, height: u32) {
    let world = mesh.world;
    let world_view_projection = camera.view_projection_matrix() * world;
    let view = camera.view_matrix();
    let fov = camera.fov_scale();

    let Mesh {
        vertices,
        vertices_out,
        ..
    } = mesh;

    vertices_out.clear();
    vertices_out.extend(vertices.iter().map(|vertex| {
        let world_pos = world.transform_point3(vertex.position);

        let position = match mode {
            ProjectionMode::ViewSpace => {
                project_view(view.transform_point3(world_pos), camera.aspect * fov, fov, width, height)
            }
            ProjectionMode::ClipSpace => project_clip(world_view_projection * vertex.position.extend(1.0), width, height),
        };

        VertexOut {
            position,
            color: vertex.color,
            uv: vertex.uv,
            normal: world.transform_normal3(vertex.normal),
            tangent: world.transform_vector3(vertex.tangent).normalize_or_zero(),
            view_direction: world_pos - camera.origin,
        }
    }));
}

/// Transform every mesh in place.
pub fn transform_meshes(meshes: &mut [Mesh], camera: &Camera, mode: ProjectionMode, width: u32, height: u32) {
    for mesh in meshes {
        transform_mesh(mesh, camera, mode, width, height);
    }
}

/// Whether a transformed vertex lies outside the viewport or depth range.
///
/// A triangle with any such vertex is rejected as a whole.
pub fn is_outside_frustum(v: &VertexOut, mode: ProjectionMode, width: u32, height: u32) -> bool {
    let p = v.position;
    let off_screen = p.x < 0.0 || p.x > width as f32 || p.y < 0.0 || p.y > height as f32;

    let bad_depth = match mode {
        ProjectionMode::ViewSpace => p.z <= 0.0,
        ProjectionMode::ClipSpace => p.w < 0.0 || p.z < 0.0 || p.z > 1.0,
    };

    off_screen || bad_depth || !p.is_finite()
}

/// World matrix helper used by the animated meshes: scale, then rotate about y, then translate.
pub fn world_matrix(translation: Vec3, yaw: f32, scale: Vec3) -> Mat4 {
    Mat4::from_translation(translation) * Mat4::from_rotation_y(yaw) * Mat4::from_scale(scale)
}
