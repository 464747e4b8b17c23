//! lod-bias
//!
//! A single-scene sample that shows how texture level-of-detail bias and
//! anisotropic filtering affect mipmap selection. Four quads at varying depths
//! are drawn either textured or with a false-colour mip level overlay, and the
//! current frame can be dumped to a bitmap.
//!
//! High-level modules
//! - `config`: every constant of the scene, collected in [`config::Settings`]
//! - `context`: window, surface and GPU device for the one window we draw into
//! - `data_structures`: quad meshes, the camera and the mipmapped texture
//! - `error`: the error taxonomy of the sample
//! - `flow`: the winit application handler and the per-frame loop
//! - `input`: keyboard state and the actions it maps to
//! - `pipelines`: the textured and the mip level render pipelines
//! - `render`: the scene and its draw step
//! - `resources`: helpers to load shaders and textures from the asset folder
//! - `screenshot`: framebuffer read back and bitmap export
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod screenshot;

// Re-exports commonly used types for convenience in downstream code.
pub use config::Settings;
pub use error::SampleError;
pub use input::{KeyboardState, ScreenshotTrigger, Session};
pub use render::{RenderMode, ShaderProgram};
pub use winit::keyboard::KeyCode;
