use glam::{DVec2, Vec2};

/// Turns absolute cursor positions into look offsets.
///
/// The first sample only records a baseline: without it, the distance from
/// wherever the cursor started would be applied as one large rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<DVec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset since the previous sample, with y flipped so that moving the
    /// cursor up yields a positive value.
    pub fn offset(&mut self, x: f64, y: f64) -> Vec2 {
        let pos = DVec2::new(x, y);
        let Some(last) = self.last.replace(pos) else {
            tracing::trace!(x, y, "cursor baseline recorded");
            return Vec2::ZERO;
        };
        Vec2::new((pos.x - last.x) as f32, (last.y - pos.y) as f32)
    }

    pub fn has_baseline(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_zero() {
        let mut tracker = CursorTracker::new();
        assert!(!tracker.has_baseline());
        assert_eq!(tracker.offset(400.0, 300.0), Vec2::ZERO);
        assert!(tracker.has_baseline());
    }

    #[test]
    fn later_samples_are_deltas_with_y_flipped() {
        let mut tracker = CursorTracker::new();
        tracker.offset(400.0, 300.0);
        assert_eq!(tracker.offset(410.0, 290.0), Vec2::new(10.0, 10.0));
        assert_eq!(tracker.offset(405.0, 295.0), Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn latch_fires_only_once() {
        let mut tracker = CursorTracker::new();
        tracker.offset(0.0, 0.0);
        // only the very first sample is swallowed
        assert_eq!(tracker.offset(1000.0, 0.0), Vec2::new(1000.0, 0.0));
    }
}
