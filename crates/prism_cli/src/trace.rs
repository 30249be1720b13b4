//! `prism trace`: a reference scene through the ray tracer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_core::obj;
use prism_math::{colors, Vec3};
use prism_tracer::{Material, ReferenceScene, RenderConfig, Renderer, Scene, TriangleCullMode, TriangleMesh};

use crate::cli::TraceArgs;

pub fn run(args: &TraceArgs, mut config: RenderConfig) -> Result<()> {
    args.apply(&mut config);

    let mut scene = ReferenceScene::from(args.scene).build();
    if let Some(path) = &args.obj {
        add_obj(&mut scene, path, args.obj_scale)?;
    }
    if args.mesh_yaw != 0.0 {
        scene.rotate_meshes(args.mesh_yaw.to_radians());
    }

    let output = args
        .output
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("trace.bmp"));

    let frame = Renderer::new(config).render(&mut scene);
    frame
        .save_bmp(&output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    Ok(())
}

/// Add an OBJ as a white Lambert mesh at the origin.
pub fn add_obj(scene: &mut Scene, path: &Path, scale: f32) -> Result<()> {
    let mesh = obj::load_obj(path).with_context(|| format!("Failed to load mesh {}", path.display()))?;
    log::info!("Loaded {}: {} triangles", path.display(), mesh.triangle_count());

    let material = scene.add_material(Material::lambert(colors::WHITE, 1.0));
    let mesh = scene.add_mesh(TriangleMesh::from_obj(mesh, TriangleCullMode::BackFace, material));
    mesh.scale(Vec3::splat(scale));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
v -1 0 2
v 0 2 2
v 1 0 2
f 1 2 3
";

    #[test]
    fn test_add_obj() {
        let path = std::env::temp_dir().join(format!("prism_trace_{}.obj", std::process::id()));
        std::fs::write(&path, TRIANGLE).unwrap();

        let mut scene = ReferenceScene::Primitives.build();
        let materials = scene.materials().len();
        add_obj(&mut scene, &path, 2.0).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(scene.meshes().len(), 1);
        assert_eq!(scene.materials().len(), materials + 1);
        assert!(scene.meshes()[0].is_dirty());

        scene.update_transforms();
        assert!((scene.meshes()[0].bounds().max_corner().y - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_missing_obj_is_an_error() {
        let mut scene = Scene::new();
        assert!(add_obj(&mut scene, Path::new("/nonexistent/bunny.obj"), 1.0).is_err());
        assert!(scene.meshes().is_empty());
    }
}
