//! Prism Core - geometry, texture and frame types shared by both pipelines.
//!
//! This crate provides:
//!
//! - **Rasterizer geometry**: `Vertex`, `VertexOut`, `Mesh`, `PrimitiveTopology`
//! - **Textures**: image loading and nearest-neighbour sampling
//! - **OBJ loading**: positions/face normals for the ray tracer, full vertices for the rasterizer
//! - **Frame output**: a linear color buffer that can be saved as a BMP
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{obj, Mesh, PrimitiveTopology};
//!
//! let (vertices, indices) = obj::load_obj_vertices("vehicle.obj", true)?;
//! let mesh = Mesh::new(vertices, indices, PrimitiveTopology::TriangleList);
//! ```

pub mod frame;
pub mod mesh;
pub mod obj;
pub mod texture;

// Re-export commonly used types
pub use frame::{FrameBuffer, FrameError};
pub use mesh::{Mesh, PrimitiveTopology, Vertex, VertexOut};
pub use obj::{ObjError, ObjMesh};
pub use texture::{Texture, TextureError};
