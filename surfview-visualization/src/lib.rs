//! Viewer state and render data for surfview
//!
//! This crate holds everything a renderer needs besides a window and a GPU
//! device:
//! - Scene state with pure event transitions
//! - Orbit camera
//! - Versioned WGSL surface shader and its uniform block
//! - Height gradient color scales
//! - Interleaved vertex and index buffers

pub mod color;
pub mod colormap;
pub mod camera;
pub mod scene;
pub mod shaders;
pub mod buffers;

pub use color::Color;
pub use colormap::*;
pub use camera::*;
pub use scene::*;
pub use shaders::{compose_shader, shader_cache_key, ShadingMode, SurfaceUniforms, SHADER_TEMPLATE_VERSION};
pub use buffers::*;
