use std::collections::BTreeSet;

use skyview_common::SkyboxVariant;
use skyview_input::{
    Action, CursorTracker, EdgeTrigger, InputEvent, InputHandler, Key, KeyState, binding,
};
use skyview_render::{FpsCamera, RenderView};

use crate::selector::VariantSelector;

/// Framebuffer size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// All mutable scene state, passed explicitly to input handling and the
/// frame step.
///
/// Movement, cycling, quitting and the HUD toggle are sampled from the set
/// of held keys once per [`SceneContext::step`]. Cursor and scroll events
/// are applied as they arrive.
#[derive(Debug, Clone)]
pub struct SceneContext {
    camera: FpsCamera,
    cursor: CursorTracker,
    held: BTreeSet<Key>,
    cycle_trigger: EdgeTrigger,
    hud_trigger: EdgeTrigger,
    selector: VariantSelector,
    viewport: Viewport,
    hud_visible: bool,
    quit_requested: bool,
}

impl SceneContext {
    pub fn new(camera: FpsCamera, viewport: Viewport) -> Self {
        Self {
            camera,
            cursor: CursorTracker::new(),
            held: BTreeSet::new(),
            cycle_trigger: EdgeTrigger::new(),
            hud_trigger: EdgeTrigger::new(),
            selector: VariantSelector::default(),
            viewport,
            hud_visible: true,
            quit_requested: false,
        }
    }

    pub fn camera(&self) -> &FpsCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn active_variant(&self) -> SkyboxVariant {
        self.selector.current()
    }

    pub fn cycles(&self) -> u64 {
        self.selector.cycles()
    }

    pub fn hud_visible(&self) -> bool {
        self.hud_visible
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Advance one frame: apply held movement keys and edge-triggered
    /// actions.
    pub fn step(&mut self, dt: f32) {
        let mut cycle_down = false;
        for action in self.held.iter().filter_map(|k| binding(*k)) {
            match action {
                Action::Move(direction) => self.camera.process_keyboard(direction, dt),
                Action::CycleSkybox => cycle_down = true,
                Action::Quit => {
                    if !self.quit_requested {
                        tracing::info!("quit requested");
                    }
                    self.quit_requested = true;
                }
            }
        }

        if self.cycle_trigger.update(cycle_down) {
            self.selector.cycle();
        }
        if self.hud_trigger.update(self.held.contains(&Key::ToggleHud)) {
            self.hud_visible = !self.hud_visible;
        }
    }

    /// View for the active variant at the current viewport aspect.
    pub fn render_view(&self) -> RenderView {
        RenderView::from_camera(&self.camera, self.viewport.aspect(), self.active_variant())
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(FpsCamera::default(), Viewport::default())
    }
}

impl InputHandler for SceneContext {
    fn on_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
            } => {
                self.held.insert(key);
            }
            InputEvent::Key {
                key,
                state: KeyState::Released,
            } => {
                self.held.remove(&key);
            }
            InputEvent::CursorMoved { x, y } => {
                let offset = self.cursor.offset(x, y);
                if offset != glam::Vec2::ZERO {
                    self.camera.process_mouse_movement(offset.x, offset.y);
                }
            }
            InputEvent::Scroll { y } => self.camera.process_mouse_scroll(y),
            InputEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    return;
                }
                self.viewport = Viewport::new(width, height);
                tracing::debug!(width, height, "viewport resized");
            }
        }
    }
}
