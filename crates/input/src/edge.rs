/// Press/release edge detector for level-sampled keys.
///
/// Sampling a held key every frame yields `true` only on the first frame;
/// the key must be released before it can fire again.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current key level; returns true on a rising edge.
    pub fn update(&mut self, down: bool) -> bool {
        let fired = down && !self.held;
        self.held = down;
        fired
    }
}
