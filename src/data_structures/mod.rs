//! Scene data: meshes, camera and texture.
//!
//! - `quad` holds the hard-coded quads and their GPU buffers
//! - `camera` holds the fixed camera and its view/projection uniform
//! - `texture` holds the GPU texture wrapper and the mip chain generation

pub mod camera;
pub mod quad;
pub mod texture;

/// Types that can describe their own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}
