use skyview_common::MoveDirection;

use crate::event::Key;

/// A high-level action produced by a key binding.
///
/// The scene consumes actions, never raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the camera while the key is held.
    Move(MoveDirection),
    /// Switch to the next skybox variant, once per press.
    CycleSkybox,
    /// Close the application.
    Quit,
}

/// Default key bindings.
pub fn binding(key: Key) -> Option<Action> {
    match key {
        Key::W => Some(Action::Move(MoveDirection::Forward)),
        Key::S => Some(Action::Move(MoveDirection::Backward)),
        Key::A => Some(Action::Move(MoveDirection::Left)),
        Key::D => Some(Action::Move(MoveDirection::Right)),
        Key::Space => Some(Action::CycleSkybox),
        Key::Escape => Some(Action::Quit),
        Key::ToggleHud => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_map_to_moves() {
        assert_eq!(binding(Key::W), Some(Action::Move(MoveDirection::Forward)));
        assert_eq!(binding(Key::S), Some(Action::Move(MoveDirection::Backward)));
        assert_eq!(binding(Key::A), Some(Action::Move(MoveDirection::Left)));
        assert_eq!(binding(Key::D), Some(Action::Move(MoveDirection::Right)));
    }

    #[test]
    fn space_cycles_and_escape_quits() {
        assert_eq!(binding(Key::Space), Some(Action::CycleSkybox));
        assert_eq!(binding(Key::Escape), Some(Action::Quit));
    }

    #[test]
    fn hud_toggle_has_no_scene_action() {
        assert_eq!(binding(Key::ToggleHud), None);
    }
}
