use skyview_common::SkyboxVariant;

/// Tracks which skybox variant is on screen.
///
/// Holds no textures; the driver maps the current variant to a pre-built
/// renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantSelector {
    current: SkyboxVariant,
    cycles: u64,
}

impl VariantSelector {
    pub fn new(start: SkyboxVariant) -> Self {
        Self {
            current: start,
            cycles: 0,
        }
    }

    pub fn current(&self) -> SkyboxVariant {
        self.current
    }

    /// Advance to the next variant and return it.
    pub fn cycle(&mut self) -> SkyboxVariant {
        let previous = self.current;
        self.current = previous.next();
        self.cycles += 1;
        tracing::debug!(from = %previous, to = %self.current, "skybox variant cycled");
        self.current
    }

    /// Number of transitions since start.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
