//! Rendering Adapter: camera math and skybox assets, independent of any GPU API.
//!
//! # Invariants
//! - The camera basis is derived from yaw/pitch only.
//! - A cubemap is exactly six square faces of equal size, in face order.
//! - Renderers read a [`RenderView`]; they never mutate camera state.

mod camera;
mod cubemap;
mod renderer;

pub use camera::{FpsCamera, MAX_ZOOM, MIN_ZOOM, PITCH_LIMIT};
pub use cubemap::{CubemapImages, TextureLoadError, face_paths};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "skyview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
