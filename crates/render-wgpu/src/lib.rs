//! wgpu render backend for the skybox.
//!
//! Draws a cubemap-textured unit cube around the camera. The cube is drawn
//! with translation stripped from the view matrix and its depth forced to
//! the far plane, so it always appears infinitely distant.
//!
//! # Invariants
//! - All variants share one cube mesh; each owns its cubemap texture.
//! - The caller writes view/projection uniforms before drawing.
//! - Shader compilation errors are reported, never panicked on.

mod gpu;
mod shaders;
mod skybox;

pub use gpu::{DEPTH_FORMAT, WgpuRenderer};
pub use shaders::SKYBOX_SHADER;
pub use skybox::{CubeMesh, GpuSkybox, ShaderError, SkyboxPipeline, SkyboxShader};
