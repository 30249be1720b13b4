//! `prism raster`: one mesh through the software rasterizer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_core::{obj, Mesh, PrimitiveTopology, Vertex};
use prism_math::{Camera, Color, Vec2, Vec3};
use prism_raster::{world_matrix, RasterConfig, Rasterizer, TextureSet};

use crate::cli::RasterArgs;

/// Where OBJ meshes are placed, in front of a camera at the origin
const OBJ_TRANSLATION: Vec3 = Vec3::new(0.0, 0.0, 50.0);
const OBJ_YAW_DEGREES: f32 = 90.0;
const QUAD_CAMERA: Vec3 = Vec3::new(0.0, 0.0, -10.0);
const FOV_DEGREES: f32 = 45.0;

pub fn run(args: &RasterArgs, mut config: RasterConfig) -> Result<()> {
    args.apply(&mut config);
    let yaw = args.yaw.to_radians();

    let (mesh, camera_origin) = match &args.mesh {
        Some(path) => {
            let mesh = load_mesh(path, !args.no_flip)?
                .with_world(world_matrix(OBJ_TRANSLATION, OBJ_YAW_DEGREES.to_radians() + yaw, Vec3::ONE));
            (mesh, Vec3::ZERO)
        }
        None => (textured_quad().with_world(world_matrix(Vec3::ZERO, yaw, Vec3::ONE)), QUAD_CAMERA),
    };
    let camera = Camera::new(camera_origin, FOV_DEGREES, config.aspect_ratio());

    let output = args
        .output
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("raster.bmp"));

    let mut rasterizer = Rasterizer::new(config);
    rasterizer.set_textures(TextureSet::load(
        args.diffuse.as_deref(),
        args.normal.as_deref(),
        args.specular.as_deref(),
        args.gloss.as_deref(),
    ));

    let mut meshes = [mesh];
    rasterizer.render(&mut meshes, &camera);

    let stats = rasterizer.stats();
    log::info!(
        "Drew {} of {} triangles, {} fragments",
        stats.triangles_drawn,
        stats.triangles_submitted,
        stats.fragments_written
    );

    rasterizer
        .frame()
        .save_bmp(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    Ok(())
}

fn load_mesh(path: &Path, flip: bool) -> Result<Mesh> {
    let (vertices, indices) =
        obj::load_obj_vertices(path, flip).with_context(|| format!("Failed to load mesh {}", path.display()))?;
    let mesh = Mesh::new(vertices, indices, PrimitiveTopology::TriangleList);
    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// A 6 x 6 quad facing the camera, split into a 3 x 3 vertex grid.
///
/// Vertex colors follow the uvs so the quad reads as a gradient without a
/// diffuse texture.
pub fn textured_quad() -> Mesh {
    let mut vertices = Vec::with_capacity(9);
    for row in 0..3 {
        for col in 0..3 {
            let uv = Vec2::new(col as f32 * 0.5, row as f32 * 0.5);
            let position = Vec3::new(col as f32 * 3.0 - 3.0, 3.0 - row as f32 * 3.0, 0.0);
            vertices.push(
                Vertex::new(position)
                    .with_color(Color::new(uv.x, uv.y, 1.0))
                    .with_uv(uv)
                    .with_normal(Vec3::NEG_Z)
                    .with_tangent(Vec3::X),
            );
        }
    }

    let indices = vec![
        3, 0, 1, 1, 4, 3, 4, 1, 2, 2, 5, 4, //
        6, 3, 4, 4, 7, 6, 7, 4, 5, 5, 8, 7,
    ];
    Mesh::new(vertices, indices, PrimitiveTopology::TriangleList)
}
