//! Input: host-agnostic events mapped to camera and skybox actions.
//!
//! # Invariants
//! - Core logic consumes [`InputEvent`]s, never window-system types.
//! - The first cursor sample is a baseline and produces no rotation.
//! - A held key fires an edge-triggered action once per press.

pub mod action;
mod cursor;
mod edge;
mod event;

pub use action::{Action, binding};
pub use cursor::CursorTracker;
pub use edge::EdgeTrigger;
pub use event::{InputEvent, InputHandler, Key, KeyState};

pub fn crate_info() -> &'static str {
    "skyview-input v0.1.0"
}
