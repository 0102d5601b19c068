//! Scene Kernel: the application context every input handler and frame step
//! operates on.
//!
//! # Invariants
//! - All mutable scene state lives in one [`SceneContext`], owned by the host.
//! - Continuous actions (movement) are applied per frame, scaled by delta time.
//! - Discrete actions (skybox cycling) fire once per key press.

pub mod scene;
pub mod selector;

pub use scene::{SceneContext, Viewport};
pub use selector::VariantSelector;
