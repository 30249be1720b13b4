//! Prism Tracer - CPU ray tracer with direct lighting.
//!
//! One primary ray per pixel against spheres, planes and triangle meshes,
//! shaded by Lambert, Lambert-Phong or Cook-Torrance materials under point
//! and directional lights, with optional hard shadows.
//!
//! # Example
//!
//! ```ignore
//! use prism_tracer::{ReferenceScene, RenderConfig, Renderer};
//!
//! let mut scene = ReferenceScene::Brdf.build();
//! let frame = Renderer::new(RenderConfig::default()).render(&mut scene);
//! frame.save_bmp("brdf.bmp")?;
//! ```

pub mod brdf;
mod bucket;
mod hittable;
mod light;
mod material;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;
mod triangle_mesh;

pub use bucket::{generate_buckets, Bucket};
pub use hittable::{HitRecord, Hittable, MaterialId};
pub use light::{Light, LightKind};
pub use material::Material;
pub use plane::Plane;
pub use renderer::{ExecutionStrategy, LightingMode, RenderConfig, Renderer};
pub use scene::{ReferenceScene, Scene};
pub use sphere::Sphere;
pub use triangle::{Triangle, TriangleCullMode};
pub use triangle_mesh::TriangleMesh;

/// Re-export the math types that appear in this crate's API
pub use prism_math::{Camera, Color, Ray, Vec3};
