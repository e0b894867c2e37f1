//! Frame timing.
//!
//! The network advances a fixed amount per frame, so it never reads the
//! clock. The clock exists for time-based consumers around it: the overlay
//! carousel and the FPS readout of the viewer.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! // once per redraw:
//! let dt = clock.tick();
//! carousel.advance(dt);
//! ```

use std::time::{Duration, Instant};

/// How often the FPS estimate is refreshed.
const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Elapsed time, per-frame delta, frame count and a smoothed FPS estimate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame: u64,
    fps: f32,
    window_start: Instant,
    window_frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// A clock whose first frame is measured from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
            delta: Duration::ZERO,
            frame: 0,
            fps: 0.0,
            window_start: start,
            window_frames: 0,
        }
    }

    /// Mark a new frame now. Returns the time since the previous frame.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Mark a new frame at `now`. Instants earlier than the previous frame
    /// count as zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = self.last_frame.max(now);
        self.frame += 1;
        self.window_frames += 1;

        let window = self.last_frame.duration_since(self.window_start);
        if window >= FPS_WINDOW {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.window_frames = 0;
            self.window_start = self.last_frame;
        }
        self.delta
    }

    /// Time between the last two frames.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time from the start to the last frame.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.last_frame.duration_since(self.start)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames per second over the last completed measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta(), Duration::ZERO);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_measures_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert_eq!(dt, Duration::from_millis(16));
        clock.tick_at(start + Duration::from_millis(40));
        assert_eq!(clock.delta(), Duration::from_millis(24));
        assert_eq!(clock.elapsed(), Duration::from_millis(40));
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_backwards_instant_is_zero_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start + Duration::from_millis(10));
        assert_eq!(clock.tick_at(start), Duration::ZERO);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_fps_estimate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..=30 {
            clock.tick_at(start + Duration::from_millis(20 * i));
        }
        // 25 frames in the first 500ms window
        assert!((clock.fps() - 50.0).abs() < 0.5);
    }
}
