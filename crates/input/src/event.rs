/// Keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Escape,
    ToggleHud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A window-system event, translated by the host loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },
    /// Absolute cursor position in window pixels (y grows downward).
    CursorMoved { x: f64, y: f64 },
    /// Vertical scroll in lines; positive is away from the user.
    Scroll { y: f32 },
    /// New framebuffer size in physical pixels.
    Resized { width: u32, height: u32 },
}

/// Receiver of translated input events.
///
/// Hosts (winit, tests, headless scripts) feed events through this trait so
/// the scene never depends on a concrete event loop.
pub trait InputHandler {
    fn on_event(&mut self, event: &InputEvent);

    fn on_events<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>)
    where
        Self: Sized,
    {
        for event in events {
            self.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<InputEvent>);

    impl InputHandler for Recorder {
        fn on_event(&mut self, event: &InputEvent) {
            self.0.push(*event);
        }
    }

    #[test]
    fn on_events_dispatches_in_order() {
        let events = [
            InputEvent::Key {
                key: Key::W,
                state: KeyState::Pressed,
            },
            InputEvent::Scroll { y: 1.0 },
            InputEvent::Resized {
                width: 10,
                height: 20,
            },
        ];
        let mut recorder = Recorder::default();
        recorder.on_events(&events);
        assert_eq!(recorder.0, events);
    }

    #[test]
    fn handler_is_object_safe() {
        let mut recorder = Recorder::default();
        let handler: &mut dyn InputHandler = &mut recorder;
        handler.on_event(&InputEvent::CursorMoved { x: 1.0, y: 2.0 });
        assert_eq!(recorder.0.len(), 1);
    }
}
