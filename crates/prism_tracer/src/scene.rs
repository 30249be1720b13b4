//! Scene container and the reference scenes.
//!
//! The scene owns every primitive, light and material. Geometry refers to
//! materials by index; an index past the end is a construction bug and is
//! caught by `debug_assert!` when the geometry is added.

use prism_math::{colors, Camera, Color, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::hittable::{HitRecord, Hittable, MaterialId};
use crate::light::Light;
use crate::material::Material;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::TriangleCullMode;
use crate::triangle_mesh::TriangleMesh;

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    meshes: Vec<TriangleMesh>,
    lights: Vec<Light>,
    materials: Vec<Material>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene. Material 0 is always a red solid color.
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            spheres: Vec::new(),
            planes: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
            materials: vec![Material::default()],
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    // --- Construction ---

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_sphere(&mut self, origin: Vec3, radius: f32, material: MaterialId) -> &mut Sphere {
        self.check_material(material);
        self.spheres.push(Sphere::new(origin, radius, material));
        let last = self.spheres.len() - 1;
        &mut self.spheres[last]
    }

    pub fn add_plane(&mut self, origin: Vec3, normal: Vec3, material: MaterialId) -> &mut Plane {
        self.check_material(material);
        self.planes.push(Plane::new(origin, normal, material));
        let last = self.planes.len() - 1;
        &mut self.planes[last]
    }

    /// Add an empty mesh to be filled with `append_triangle`.
    pub fn add_triangle_mesh(&mut self, cull_mode: TriangleCullMode, material: MaterialId) -> &mut TriangleMesh {
        self.add_mesh(TriangleMesh::empty(cull_mode, material))
    }

    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> &mut TriangleMesh {
        self.check_material(mesh.material);
        self.meshes.push(mesh);
        let last = self.meshes.len() - 1;
        &mut self.meshes[last]
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Color) -> &mut Light {
        self.add_light(Light::point(origin, intensity, color))
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Color) -> &mut Light {
        self.add_light(Light::directional(direction, intensity, color))
    }

    fn add_light(&mut self, light: Light) -> &mut Light {
        self.lights.push(light);
        let last = self.lights.len() - 1;
        &mut self.lights[last]
    }

    #[inline]
    fn check_material(&self, material: MaterialId) {
        debug_assert!(
            material < self.materials.len(),
            "material {} out of range ({} materials)",
            material,
            self.materials.len()
        );
    }

    // --- Access ---

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    /// Mutable meshes for animation. Call `update_transforms` afterwards.
    pub fn meshes_mut(&mut self) -> &mut [TriangleMesh] {
        &mut self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id]
    }

    // --- Queries ---

    /// Closest hit over every primitive. Returns whether anything was hit.
    pub fn closest_hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        for sphere in &self.spheres {
            sphere.hit(ray, rec);
        }
        for plane in &self.planes {
            plane.hit(ray, rec);
        }
        for mesh in &self.meshes {
            mesh.hit(ray, rec);
        }
        rec.did_hit
    }

    /// Any hit within the ray's range. Spheres, then planes, then meshes.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        self.spheres.iter().any(|s| s.does_hit(ray))
            || self.planes.iter().any(|p| p.does_hit(ray))
            || self.meshes.iter().any(|m| m.does_hit(ray))
    }

    // --- Animation ---

    /// Refresh the world-space cache of every mesh whose transform changed.
    pub fn update_transforms(&mut self) {
        for mesh in self.meshes.iter_mut().filter(|m| m.is_dirty()) {
            mesh.update_transforms();
        }
    }

    /// Set every mesh's yaw (radians).
    pub fn rotate_meshes(&mut self, yaw: f32) {
        for mesh in &mut self.meshes {
            mesh.rotate_y(yaw);
        }
    }
}

/// The built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceScene {
    /// Two spheres in a box of planes, flat colors
    Primitives,
    /// Six spheres and one point light
    LitSpheres,
    /// Cook-Torrance metal and plastic grid under three lights
    #[default]
    Brdf,
    /// Three spinning triangles with different cull modes
    Meshes,
}

impl ReferenceScene {
    pub const ALL: [ReferenceScene; 4] = [
        ReferenceScene::Primitives,
        ReferenceScene::LitSpheres,
        ReferenceScene::Brdf,
        ReferenceScene::Meshes,
    ];

    pub fn build(self) -> Scene {
        match self {
            ReferenceScene::Primitives => primitives(),
            ReferenceScene::LitSpheres => lit_spheres(),
            ReferenceScene::Brdf => brdf(),
            ReferenceScene::Meshes => meshes(),
        }
    }
}

/// The 10 x 10 x 10 room shared by the lit scenes, open toward the camera.
fn add_room(scene: &mut Scene, floor_and_ceiling: MaterialId, walls: MaterialId, back: MaterialId) {
    scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, walls);
    scene.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, walls);
    scene.add_plane(Vec3::ZERO, Vec3::Y, floor_and_ceiling);
    scene.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, floor_and_ceiling);
    scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, back);
}

/// Two rows of three spheres at y = 1 and y = 3.
fn add_sphere_grid(scene: &mut Scene, materials: [MaterialId; 6]) {
    for (i, material) in materials.into_iter().enumerate() {
        let x = (i % 3) as f32 * 1.75 - 1.75;
        let y = if i < 3 { 1.0 } else { 3.0 };
        scene.add_sphere(Vec3::new(x, y, 0.0), 0.75, material);
    }
}

fn add_brdf_lights(scene: &mut Scene) {
    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45));
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45));
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));
}

fn room_camera() -> Camera {
    Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0, 1.0)
}

fn primitives() -> Scene {
    let mut scene = Scene::new().with_camera(Camera::new(Vec3::ZERO, 90.0, 1.0));

    let red = 0;
    let blue = scene.add_material(Material::solid_color(colors::BLUE));
    let yellow = scene.add_material(Material::solid_color(colors::YELLOW));
    let green = scene.add_material(Material::solid_color(colors::GREEN));
    let magenta = scene.add_material(Material::solid_color(colors::MAGENTA));

    scene.add_sphere(Vec3::new(-25.0, 0.0, 100.0), 50.0, red);
    scene.add_sphere(Vec3::new(25.0, 0.0, 100.0), 50.0, blue);

    scene.add_plane(Vec3::new(-75.0, 0.0, 0.0), Vec3::X, green);
    scene.add_plane(Vec3::new(75.0, 0.0, 0.0), Vec3::NEG_X, green);
    scene.add_plane(Vec3::new(0.0, -75.0, 0.0), Vec3::Y, yellow);
    scene.add_plane(Vec3::new(0.0, 75.0, 0.0), Vec3::NEG_Y, yellow);
    scene.add_plane(Vec3::new(0.0, 0.0, 125.0), Vec3::NEG_Z, magenta);

    scene
}

fn lit_spheres() -> Scene {
    let mut scene = Scene::new().with_camera(room_camera());

    let red = 0;
    let blue = scene.add_material(Material::solid_color(colors::BLUE));
    let yellow = scene.add_material(Material::solid_color(colors::YELLOW));
    let green = scene.add_material(Material::solid_color(colors::GREEN));
    let magenta = scene.add_material(Material::solid_color(colors::MAGENTA));

    add_room(&mut scene, yellow, green, magenta);
    add_sphere_grid(&mut scene, [red, blue, red, blue, red, blue]);

    scene.add_point_light(Vec3::new(0.0, 5.0, -5.0), 70.0, colors::WHITE);

    scene
}

fn brdf() -> Scene {
    let mut scene = Scene::new().with_camera(room_camera());

    let silver = Color::new(0.972, 0.960, 0.915);
    let gray = Color::splat(0.75);
    let roughness = [1.0, 0.6, 0.1];

    let metals = roughness.map(|r| scene.add_material(Material::cook_torrance(silver, 1.0, r)));
    let plastics = roughness.map(|r| scene.add_material(Material::cook_torrance(gray, 0.0, r)));
    let gray_blue = scene.add_material(Material::lambert(Color::new(0.49, 0.57, 0.57), 1.0));

    add_room(&mut scene, gray_blue, gray_blue, gray_blue);
    add_sphere_grid(
        &mut scene,
        [metals[0], metals[1], metals[2], plastics[0], plastics[1], plastics[2]],
    );
    add_brdf_lights(&mut scene);

    scene
}

fn meshes() -> Scene {
    let mut scene = Scene::new().with_camera(room_camera());

    let gray_blue = scene.add_material(Material::lambert(Color::new(0.49, 0.57, 0.57), 1.0));
    let white = scene.add_material(Material::lambert(colors::WHITE, 1.0));
    let blue_phong = scene.add_material(Material::lambert_phong(colors::BLUE, 0.5, 0.5, 60.0));

    add_room(&mut scene, gray_blue, gray_blue, gray_blue);

    for x in [-1.75, 0.0, 1.75] {
        scene.add_sphere(Vec3::new(x, 1.0, 0.0), 0.75, blue_phong);
    }

    let cull_modes = [TriangleCullMode::BackFace, TriangleCullMode::FrontFace, TriangleCullMode::None];
    for (x, cull_mode) in [-1.75, 0.0, 1.75].into_iter().zip(cull_modes) {
        let mesh = scene.add_triangle_mesh(cull_mode, white);
        mesh.append_triangle(
            Vec3::new(-0.75, 1.5, 0.0),
            Vec3::new(0.75, 0.0, 0.0),
            Vec3::new(-0.75, 0.0, 0.0),
        );
        mesh.translate(Vec3::new(x, 3.0, 0.0));
    }

    add_brdf_lights(&mut scene);
    scene.update_transforms();

    scene
}
