//! Indexed triangle mesh with a cached world-space copy.
//!
//! `translate`, `rotate_y`, `scale` and `append_triangle` only record the
//! change and mark the mesh dirty. `update_transforms` must run before the
//! next intersection query; the scene does this at the start of every render.

use prism_core::ObjMesh;
use prism_math::{Aabb, Mat4, Mat4Ext, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable, MaterialId};
use crate::triangle::{intersect_triangle, TriangleCullMode};

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    /// One normal per triangle
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    pub material: MaterialId,
    pub cull_mode: TriangleCullMode,

    translation: Mat4,
    rotation: Mat4,
    scale: Mat4,

    transformed_positions: Vec<Vec3>,
    transformed_normals: Vec<Vec3>,
    /// Model-space bounds of `positions`
    local_bounds: Aabb,
    /// `local_bounds` carried through the world matrix
    bounds: Aabb,
    dirty: bool,
}

impl TriangleMesh {
    /// Create a mesh from shared positions, triangle indices and one normal per triangle.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
        cull_mode: TriangleCullMode,
        material: MaterialId,
    ) -> Self {
        debug_assert_eq!(normals.len(), indices.len() / 3, "one normal per triangle");

        let local_bounds = Aabb::enclosing(&positions);
        let mut mesh = Self {
            positions,
            normals,
            indices,
            material,
            cull_mode,
            translation: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            scale: Mat4::IDENTITY,
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            local_bounds,
            bounds: Aabb::EMPTY,
            dirty: true,
        };
        mesh.update_transforms();
        mesh
    }

    /// Create an empty mesh to be filled with `append_triangle`.
    pub fn empty(cull_mode: TriangleCullMode, material: MaterialId) -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), cull_mode, material)
    }

    pub fn from_obj(obj: ObjMesh, cull_mode: TriangleCullMode, material: MaterialId) -> Self {
        Self::new(obj.positions, obj.normals, obj.indices, cull_mode, material)
    }

    /// Set the translation part of the world transform.
    pub fn translate(&mut self, translation: Vec3) {
        self.translation = Mat4::from_translation(translation);
        self.dirty = true;
    }

    /// Set the rotation part of the world transform (radians about +y).
    pub fn rotate_y(&mut self, yaw: f32) {
        self.rotation = Mat4::from_rotation_y(yaw);
        self.dirty = true;
    }

    /// Set the scale part of the world transform.
    pub fn scale(&mut self, scale: Vec3) {
        self.scale = Mat4::from_scale(scale);
        self.dirty = true;
    }

    /// Append a triangle in model space; its normal follows the winding.
    pub fn append_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3) {
        let start = self.positions.len() as u32;
        self.positions.extend([v0, v1, v2]);
        self.indices.extend([start, start + 1, start + 2]);
        self.normals.push((v1 - v0).cross(v2 - v0).normalize_or_zero());
        self.local_bounds = Aabb::enclosing(&self.positions);
        self.dirty = true;
    }

    /// Model → world: scale, then rotate, then translate.
    pub fn world_matrix(&self) -> Mat4 {
        self.translation * self.rotation * self.scale
    }

    /// Rebuild the world-space positions, normals and bounds.
    pub fn update_transforms(&mut self) {
        let world = self.world_matrix();

        self.transformed_positions.clear();
        self.transformed_positions
            .extend(self.positions.iter().map(|&p| world.transform_point3(p)));

        self.transformed_normals.clear();
        self.transformed_normals
            .extend(self.normals.iter().map(|&n| world.transform_normal3(n)));

        self.bounds = world.transform_aabb(&self.local_bounds);
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Model-space bounds, independent of the transform.
    pub fn local_bounds(&self) -> &Aabb {
        &self.local_bounds
    }

    /// World-space bounds as of the last `update_transforms`.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn transformed_positions(&self) -> &[Vec3] {
        &self.transformed_positions
    }

    pub fn transformed_normals(&self) -> &[Vec3] {
        &self.transformed_normals
    }

    #[inline]
    fn triangle(&self, tri: &[u32]) -> (Vec3, Vec3, Vec3) {
        (
            self.transformed_positions[tri[0] as usize],
            self.transformed_positions[tri[1] as usize],
            self.transformed_positions[tri[2] as usize],
        )
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        debug_assert!(!self.dirty, "update_transforms() not called after a transform change");

        if !self.bounds.hit(ray) {
            return false;
        }

        let mut hit_anything = false;
        for (i, tri) in self.indices.chunks_exact(3).enumerate() {
            let (v0, v1, v2) = self.triangle(tri);
            if let Some(t) = intersect_triangle(v0, v1, v2, self.cull_mode, ray, false) {
                hit_anything |= rec.record(ray, t, self.transformed_normals[i], self.material);
            }
        }
        hit_anything
    }

    fn does_hit(&self, ray: &Ray) -> bool {
        debug_assert!(!self.dirty, "update_transforms() not called after a transform change");

        if !self.bounds.hit(ray) {
            return false;
        }

        self.indices.chunks_exact(3).any(|tri| {
            let (v0, v1, v2) = self.triangle(tri);
            intersect_triangle(v0, v1, v2, self.cull_mode, ray, true).is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Unit quad in the z = 0 plane facing -z.
    fn quad(cull_mode: TriangleCullMode) -> TriangleMesh {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        ];
        let obj = ObjMesh::from_triangles(positions, vec![0, 1, 2, 0, 2, 3]);
        TriangleMesh::from_obj(obj, cull_mode, 1)
    }

    #[test]
    fn test_new_mesh_is_ready() {
        let mesh = quad(TriangleCullMode::BackFace);
        assert!(!mesh.is_dirty());
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.transformed_normals().iter().all(|n| (*n - Vec3::NEG_Z).length() < 1e-6));
    }

    #[test]
    fn test_hit_front_face() {
        let mesh = quad(TriangleCullMode::BackFace);
        let ray = Ray::new(Vec3::new(0.3, 0.2, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(mesh.hit(&ray, &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-4);
        assert_eq!(rec.material, 1);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_back_face_culled() {
        let mesh = quad(TriangleCullMode::BackFace);
        let ray = Ray::new(Vec3::new(0.3, 0.2, 5.0), Vec3::NEG_Z);
        assert!(!mesh.hit(&ray, &mut HitRecord::default()));

        // Shadow rays see it from the other side
        assert!(mesh.does_hit(&ray));
    }

    #[test]
    fn test_transforms_are_deferred() {
        let mut mesh = quad(TriangleCullMode::None);
        mesh.translate(Vec3::new(0.0, 0.0, 10.0));
        assert!(mesh.is_dirty());

        // Cache still holds the old placement
        assert_eq!(mesh.transformed_positions()[0].z, 0.0);

        mesh.update_transforms();
        assert!(!mesh.is_dirty());

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(mesh.hit(&ray, &mut rec));
        assert!((rec.t - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_transform_setters_replace() {
        let mut mesh = quad(TriangleCullMode::None);
        mesh.translate(Vec3::new(5.0, 0.0, 0.0));
        mesh.translate(Vec3::new(0.0, 2.0, 0.0));
        mesh.update_transforms();

        let center = (mesh.bounds().min_corner() + mesh.bounds().max_corner()) * 0.5;
        assert!(center.x.abs() < 1e-6);
        assert!((center.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_applies_before_rotation_and_translation() {
        let mut mesh = quad(TriangleCullMode::None);
        mesh.scale(Vec3::new(2.0, 1.0, 1.0));
        mesh.rotate_y(FRAC_PI_2);
        mesh.translate(Vec3::new(0.0, 0.0, 10.0));
        mesh.update_transforms();

        // Local x stretched to [-2, 2], then laid along z around z = 10
        let bounds = mesh.bounds();
        assert!((bounds.min_corner().z - 8.0).abs() < 1e-4);
        assert!((bounds.max_corner().z - 12.0).abs() < 1e-4);
        assert!(bounds.max_corner().x.abs() < 1e-3);
    }

    #[test]
    fn test_world_bounds_follow_local_bounds() {
        let mut mesh = quad(TriangleCullMode::None);
        let local = *mesh.local_bounds();

        mesh.scale(Vec3::new(3.0, 0.5, 1.0));
        mesh.rotate_y(FRAC_PI_2);
        mesh.translate(Vec3::new(1.0, 2.0, 4.0));
        mesh.update_transforms();

        // The local box is untouched by the transform
        assert_eq!(*mesh.local_bounds(), local);

        // A quarter turn keeps the box tight: both boxes match the vertices
        let tight = Aabb::enclosing(mesh.transformed_positions());
        let bounds = mesh.bounds();
        assert!((bounds.min_corner() - tight.min_corner()).length() < 1e-3);
        assert!((bounds.max_corner() - tight.max_corner()).length() < 1e-3);
        assert!((bounds.min_corner() - Vec3::new(1.0, 1.5, 1.0)).length() < 1e-3);
        assert!((bounds.max_corner() - Vec3::new(1.0, 2.5, 7.0)).length() < 1e-3);
    }

    #[test]
    fn test_world_bounds_enclose_rotated_vertices() {
        let mut mesh = quad(TriangleCullMode::None);
        mesh.rotate_y(0.7);
        mesh.scale(Vec3::splat(2.0));
        mesh.update_transforms();

        let bounds = mesh.bounds();
        for p in mesh.transformed_positions() {
            assert!(bounds.x.contains(p.x) && bounds.y.contains(p.y) && bounds.z.contains(p.z));
        }
    }

    #[test]
    fn test_append_grows_local_bounds() {
        let mut mesh = TriangleMesh::empty(TriangleCullMode::None, 0);
        assert!(mesh.local_bounds().is_empty());
        assert!(mesh.bounds().is_empty());

        mesh.append_triangle(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        mesh.append_triangle(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 1.0, 3.0), Vec3::new(-1.0, 0.0, 3.0));
        mesh.update_transforms();

        assert_eq!(mesh.local_bounds().min_corner(), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(mesh.local_bounds().max_corner(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.bounds(), mesh.local_bounds());
    }

    #[test]
    fn test_rotation_turns_normals() {
        let mut mesh = quad(TriangleCullMode::BackFace);
        mesh.rotate_y(PI);
        mesh.update_transforms();

        assert!(mesh.transformed_normals().iter().all(|n| (*n - Vec3::Z).length() < 1e-5));

        // Now the front faces +z
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(mesh.hit(&ray, &mut HitRecord::default()));
    }

    #[test]
    fn test_append_triangle() {
        let mut mesh = TriangleMesh::empty(TriangleCullMode::None, 0);
        let ray = Ray::new(Vec3::new(-0.5, 0.5, -1.0), Vec3::Z);
        assert!(!mesh.does_hit(&ray));

        mesh.append_triangle(Vec3::new(-0.75, 1.5, 0.0), Vec3::new(0.75, 0.0, 0.0), Vec3::new(-0.75, 0.0, 0.0));
        assert!(mesh.is_dirty());
        mesh.update_transforms();

        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.does_hit(&ray));
    }

    #[test]
    fn test_bounds_reject_skips_triangles() {
        let mesh = quad(TriangleCullMode::None);
        let ray = Ray::new(Vec3::new(5.0, 5.0, -1.0), Vec3::Z);

        assert!(!mesh.bounds().hit(&ray));
        assert!(!mesh.hit(&ray, &mut HitRecord::default()));
    }

    #[test]
    fn test_closest_triangle_wins() {
        let mut mesh = TriangleMesh::empty(TriangleCullMode::None, 0);
        for z in [3.0, 1.0, 2.0] {
            mesh.append_triangle(Vec3::new(-1.0, -1.0, z), Vec3::new(0.0, 1.0, z), Vec3::new(1.0, -1.0, z));
        }
        mesh.update_transforms();

        let mut rec = HitRecord::default();
        assert!(mesh.hit(&Ray::new(Vec3::ZERO, Vec3::Z), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
    }
}
