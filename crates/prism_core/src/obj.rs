//! Wavefront OBJ loading via `tobj`.
//!
//! Two views of the same file are offered:
//!
//! - [`ObjMesh`]: positions, one normal per face and a flat index list, the
//!   shape the ray tracer's triangle meshes consume.
//! - [`load_obj_vertices`]: full rasterizer [`Vertex`] values with uvs,
//!   normals and tangents.
//!
//! Polygons are triangulated on load. Every object in the file is merged
//! into a single mesh.

use std::io::BufRead;
use std::path::Path;

use prism_math::{Vec2, Vec3};
use thiserror::Error;

use crate::mesh::Vertex;

/// Errors that can occur while loading an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("Failed to load OBJ {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("OBJ {0} contains no triangles")]
    Empty(String),
}

pub type ObjResult<T> = Result<T, ObjError>;

/// Triangle soup for the ray tracer.
#[derive(Clone, Debug, Default)]
pub struct ObjMesh {
    pub positions: Vec<Vec3>,
    /// One normal per triangle, `normals[i]` belongs to `indices[3i..3i+3]`
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ObjMesh {
    /// Build a mesh from positions and triangle indices, deriving face normals.
    ///
    /// Normals follow the winding: `cross(v1 - v0, v2 - v0)`.
    pub fn from_triangles(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let normals = indices
            .chunks_exact(3)
            .map(|tri| {
                let p0 = positions[tri[0] as usize];
                let p1 = positions[tri[1] as usize];
                let p2 = positions[tri[2] as usize];
                (p1 - p0).cross(p2 - p0).normalize_or_zero()
            })
            .collect();

        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn tracer_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

fn raster_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        ..tracer_options()
    }
}

fn read_models(path: &Path, options: &tobj::LoadOptions) -> ObjResult<Vec<tobj::Model>> {
    let (models, _materials) = tobj::load_obj(path, options).map_err(|source| ObjError::Load {
        path: path.display().to_string(),
        source,
    })?;
    Ok(models)
}

fn read_models_buf<R: BufRead>(
    reader: &mut R,
    name: &str,
    options: &tobj::LoadOptions,
) -> ObjResult<Vec<tobj::Model>> {
    // Material libraries are not used by either pipeline
    let (models, _materials) =
        tobj::load_obj_buf(reader, options, |_| Err(tobj::LoadError::OpenFileFailed)).map_err(|source| {
            ObjError::Load {
                path: name.to_string(),
                source,
            }
        })?;
    Ok(models)
}

fn to_vec3(data: &[f32], i: usize) -> Vec3 {
    Vec3::new(data[3 * i], data[3 * i + 1], data[3 * i + 2])
}

fn merge_positions(models: &[tobj::Model], name: &str) -> ObjResult<ObjMesh> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let offset = positions.len() as u32;
        let mesh = &model.mesh;
        positions.extend((0..mesh.positions.len() / 3).map(|i| to_vec3(&mesh.positions, i)));
        indices.extend(mesh.indices.iter().map(|i| i + offset));
    }

    if indices.is_empty() {
        return Err(ObjError::Empty(name.to_string()));
    }

    let mesh = ObjMesh::from_triangles(positions, indices);
    log::debug!(
        "Loaded OBJ {}: {} positions, {} triangles",
        name,
        mesh.positions.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load positions, face normals and indices for the ray tracer.
pub fn load_obj(path: impl AsRef<Path>) -> ObjResult<ObjMesh> {
    let path = path.as_ref();
    let models = read_models(path, &tracer_options())?;
    merge_positions(&models, &path.display().to_string())
}

/// Parse an OBJ from any buffered reader. Material libraries are ignored.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> ObjResult<ObjMesh> {
    let models = read_models_buf(reader, "<buffer>", &tracer_options())?;
    merge_positions(&models, "<buffer>")
}

fn build_vertices(models: &[tobj::Model], name: &str, flip_axis_and_winding: bool) -> ObjResult<(Vec<Vertex>, Vec<u32>)> {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut has_normals = true;

    for model in models {
        let mesh = &model.mesh;
        let offset = vertices.len() as u32;
        let count = mesh.positions.len() / 3;
        has_normals &= mesh.normals.len() == mesh.positions.len();

        vertices.extend((0..count).map(|i| {
            let mut vertex = Vertex::new(to_vec3(&mesh.positions, i));
            if mesh.texcoords.len() >= 2 * count {
                // OBJ puts v = 0 at the bottom, textures put row 0 at the top
                vertex.uv = Vec2::new(mesh.texcoords[2 * i], 1.0 - mesh.texcoords[2 * i + 1]);
            }
            if mesh.normals.len() == mesh.positions.len() {
                vertex.normal = to_vec3(&mesh.normals, i).normalize_or_zero();
            }
            vertex
        }));
        indices.extend(mesh.indices.iter().map(|i| i + offset));
    }

    if indices.is_empty() {
        return Err(ObjError::Empty(name.to_string()));
    }

    if !has_normals {
        log::warn!("OBJ {} has no vertex normals, smoothing face normals", name);
        compute_smooth_normals(&mut vertices, &indices);
    }
    compute_tangents(&mut vertices, &indices);

    if flip_axis_and_winding {
        for vertex in &mut vertices {
            vertex.position.z = -vertex.position.z;
            vertex.normal.z = -vertex.normal.z;
            vertex.tangent.z = -vertex.tangent.z;
        }
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    log::debug!(
        "Loaded OBJ {}: {} vertices, {} triangles",
        name,
        vertices.len(),
        indices.len() / 3
    );
    Ok((vertices, indices))
}

fn compute_smooth_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = Vec3::ZERO;
    }
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        // Area weighted
        let n = (vertices[i1].position - vertices[i0].position).cross(vertices[i2].position - vertices[i0].position);
        vertices[i0].normal += n;
        vertices[i1].normal += n;
        vertices[i2].normal += n;
    }
    for vertex in vertices.iter_mut() {
        vertex.normal = vertex.normal.normalize_or_zero();
    }
}

/// Per-vertex tangents from uv derivatives, orthogonalised against the normal.
fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let diff_x = Vec2::new(v1.uv.x - v0.uv.x, v2.uv.x - v0.uv.x);
        let diff_y = Vec2::new(v1.uv.y - v0.uv.y, v2.uv.y - v0.uv.y);

        let det = diff_x.x * diff_y.y - diff_x.y * diff_y.x;
        if det.abs() < f32::EPSILON {
            continue;
        }

        let tangent = (edge0 * diff_y.y - edge1 * diff_y.x) / det;
        accumulated[i0] += tangent;
        accumulated[i1] += tangent;
        accumulated[i2] += tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let t = (tangent - n * n.dot(tangent)).normalize_or_zero();
        vertex.tangent = if t == Vec3::ZERO && n != Vec3::ZERO {
            n.any_orthonormal_vector()
        } else {
            t
        };
    }
}

/// Load full rasterizer vertices and a triangle-list index buffer.
///
/// With `flip_axis_and_winding` the z axis is mirrored and every triangle's
/// winding reversed, converting right-handed assets to the left-handed
/// world the renderers use.
pub fn load_obj_vertices(path: impl AsRef<Path>, flip_axis_and_winding: bool) -> ObjResult<(Vec<Vertex>, Vec<u32>)> {
    let path = path.as_ref();
    let models = read_models(path, &raster_options())?;
    build_vertices(&models, &path.display().to_string(), flip_axis_and_winding)
}

/// Buffered-reader variant of [`load_obj_vertices`].
pub fn parse_obj_vertices<R: BufRead>(
    reader: &mut R,
    flip_axis_and_winding: bool,
) -> ObjResult<(Vec<Vertex>, Vec<u32>)> {
    let models = read_models_buf(reader, "<buffer>", &raster_options())?;
    build_vertices(&models, "<buffer>", flip_axis_and_winding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
# unit quad in the xy plane
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    #[test]
    fn test_parse_positions_and_face_normals() {
        let mesh = parse_obj(&mut Cursor::new("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")).unwrap();

        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.normals, vec![Vec3::Z]);
    }

    #[test]
    fn test_parse_triangulates_polygons() {
        let mesh = parse_obj(&mut Cursor::new("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n")).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-6));
    }

    #[test]
    fn test_parse_rejects_out_of_range_index() {
        let result = parse_obj(&mut Cursor::new("v 0 0 0\nv 1 0 0\nf 1 2 9\n"));
        assert!(matches!(result, Err(ObjError::Load { .. })));
    }

    #[test]
    fn test_parse_empty_is_error() {
        let result = parse_obj(&mut Cursor::new("# nothing here\nv 0 0 0\n"));
        assert!(matches!(result, Err(ObjError::Empty(_))));
    }

    #[test]
    fn test_vertices_flip_uv_and_compute_tangents() {
        let (vertices, indices) = parse_obj_vertices(&mut Cursor::new(QUAD), false).unwrap();

        assert_eq!(indices.len(), 6);
        let origin = vertices.iter().find(|v| v.position == Vec3::ZERO).unwrap();
        assert_eq!(origin.uv, Vec2::new(0.0, 1.0));
        assert_eq!(origin.normal, Vec3::Z);

        for v in &vertices {
            assert!((v.tangent - Vec3::X).length() < 1e-5, "tangent {:?}", v.tangent);
            assert!(v.tangent.dot(v.normal).abs() < 1e-5);
        }
    }

    #[test]
    fn test_vertices_flip_axis_and_winding() {
        let (plain_v, plain_i) = parse_obj_vertices(&mut Cursor::new(QUAD), false).unwrap();
        let (flip_v, flip_i) = parse_obj_vertices(&mut Cursor::new(QUAD), true).unwrap();

        for (a, b) in plain_v.iter().zip(&flip_v) {
            assert_eq!(b.position, a.position * Vec3::new(1.0, 1.0, -1.0));
            assert_eq!(b.normal, a.normal * Vec3::new(1.0, 1.0, -1.0));
        }
        for (a, b) in plain_i.chunks_exact(3).zip(flip_i.chunks_exact(3)) {
            assert_eq!([a[0], a[2], a[1]], [b[0], b[1], b[2]]);
        }
    }

    #[test]
    fn test_vertices_without_normals_are_smoothed() {
        let (vertices, _) = parse_obj_vertices(&mut Cursor::new("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n"), false).unwrap();
        assert!(vertices.iter().all(|v| (v.normal - Vec3::Z).length() < 1e-6));
    }

    #[test]
    fn test_load_obj_from_file() {
        let path = std::env::temp_dir().join(format!("prism_obj_{}.obj", std::process::id()));
        std::fs::write(&path, QUAD).unwrap();

        let mesh = load_obj(&path);
        let vertices = load_obj_vertices(&path, true);
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.unwrap().triangle_count(), 2);
        assert_eq!(vertices.unwrap().1.len(), 6);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(load_obj("missing/file.obj"), Err(ObjError::Load { .. })));
    }
}
