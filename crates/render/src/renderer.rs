use glam::{Mat4, Vec3};
use skyview_common::SkyboxVariant;

use crate::camera::FpsCamera;

/// Everything a renderer needs to draw one skybox frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// World-to-camera transform with translation removed.
    pub view: Mat4,
    pub projection: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub variant: SkyboxVariant,
}

impl RenderView {
    pub fn from_camera(camera: &FpsCamera, aspect: f32, variant: SkyboxVariant) -> Self {
        Self {
            view: camera.skybox_view_matrix(),
            projection: camera.projection_matrix(aspect),
            eye: camera.position,
            fov_degrees: camera.zoom(),
            variant,
        }
    }
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_camera(&FpsCamera::default(), 4.0 / 3.0, SkyboxVariant::default())
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer only reads the view; camera state is owned by the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&self, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &RenderView) -> String {
        let forward = -view.view.row(2).truncate();
        format!(
            "skybox={} eye=({:.2}, {:.2}, {:.2}) look=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            view.variant,
            view.eye.x,
            view.eye.y,
            view.eye.z,
            forward.x,
            forward.y,
            forward.z,
            view.fov_degrees
        )
    }
}
