//! Frame timing utilities

use std::time::{Duration, Instant};

/// Tracks elapsed time since startup and FPS
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer; elapsed time counts from here
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a timer with an explicit start instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
            frame_count: 0,
            fps_timer: start,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing; true when FPS was refreshed
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Update timing as if the frame happened at `now`.
    ///
    /// Returns true when the FPS counter was refreshed on this tick.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now.saturating_duration_since(self.fps_timer);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
            return true;
        }
        false
    }

    /// Seconds since the timer started, as of the last tick
    pub fn elapsed_secs(&self) -> f32 {
        self.last_frame.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_follows_ticks() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);
        assert_eq!(timer.elapsed_secs(), 0.0);

        timer.tick_at(start + Duration::from_millis(500));
        assert!((timer.elapsed_secs() - 0.5).abs() < 1e-4);

        timer.tick_at(start + Duration::from_millis(750));
        assert!((timer.elapsed_secs() - 0.75).abs() < 1e-4);
        assert_eq!(timer.frame_count(), 2);
    }

    #[test]
    fn test_fps_updates_once_per_second() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);

        let mut refreshed = false;
        for i in 1..=60 {
            refreshed = timer.tick_at(start + Duration::from_micros(i * 16_667));
        }
        // 60 frames at 60Hz lands just past one second
        assert!(refreshed);
        assert!((timer.fps() - 60.0).abs() < 0.5, "fps was {}", timer.fps());

        assert!(!timer.tick_at(start + Duration::from_millis(1100)));
    }

    #[test]
    fn test_clock_going_backwards_is_clamped() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut timer = FrameTimer::starting_at(start);
        timer.tick_at(start - Duration::from_secs(1));
        assert_eq!(timer.elapsed_secs(), 0.0);
    }
}
