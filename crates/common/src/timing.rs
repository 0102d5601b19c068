use std::collections::VecDeque;
use std::time::Instant;

/// Upper bound on a single frame's delta, in seconds.
///
/// A stalled frame (window drag, breakpoint) would otherwise move the camera
/// a long way in one step.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Monotonic per-frame delta-time source.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { last: start }
    }

    /// Seconds since the previous tick, clamped to [`MAX_FRAME_DELTA`].
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DELTA)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Smoothed frame rate over the last few frames, as shown in the HUD.
///
/// Fed the clamped deltas from [`FrameClock::tick`].
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: VecDeque<f32>,
    window: usize,
    sum: f32,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            sum: 0.0,
        }
    }

    /// Push one frame delta in seconds, evicting the oldest once full.
    pub fn record(&mut self, dt: f32) {
        if self.samples.len() == self.window {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest;
            }
        }
        self.samples.push_back(dt);
        self.sum += dt;
    }

    /// Mean frame time in milliseconds, 0 before the first frame.
    pub fn average_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.sum / self.samples.len() as f32 * 1000.0
    }

    pub fn fps(&self) -> f32 {
        if self.sum > 0.0 {
            self.samples.len() as f32 / self.sum
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clock_measures_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn clock_clamps_long_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(dt, MAX_FRAME_DELTA);
    }

    #[test]
    fn clock_delta_is_relative_to_previous_tick() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick_at(start + Duration::from_millis(50));
        let dt = clock.tick_at(start + Duration::from_millis(60));
        assert!((dt - 0.010).abs() < 1e-4);
    }

    #[test]
    fn frame_timer_averages_recent_frames() {
        let mut timer = FrameTimer::new(3);
        for dt in [0.010, 0.020, 0.030] {
            timer.record(dt);
        }
        assert!((timer.average_ms() - 20.0).abs() < 1e-3);
        assert!((timer.fps() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn frame_timer_forgets_old_frames() {
        let mut timer = FrameTimer::new(2);
        timer.record(MAX_FRAME_DELTA);
        timer.record(0.020);
        timer.record(0.030);
        assert!((timer.average_ms() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.average_ms(), 0.0);
        assert_eq!(timer.fps(), 0.0);
    }
}
