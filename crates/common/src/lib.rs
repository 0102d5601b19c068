//! Shared vocabulary for the skyview crates.
//!
//! # Invariants
//! - The set of skybox variants is closed and cycles in a fixed order.
//! - Cube faces are always enumerated front, back, top, bottom, right, left.

mod face;
mod timing;
mod variant;

pub use face::CubeFace;
pub use timing::{FrameClock, FrameTimer, MAX_FRAME_DELTA};
pub use variant::{ParseVariantError, SkyboxVariant, VariantTable};

/// Direction of a keyboard-driven camera move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

pub fn crate_info() -> &'static str {
    "skyview-common v0.1.0"
}
