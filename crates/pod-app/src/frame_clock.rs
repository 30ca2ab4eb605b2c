//! Variable-timestep frame clock.
//!
//! Every redraw advances the scene by the real time elapsed since the
//! previous one. Frames longer than [`MAX_FRAME_TIME`] (a stall, a window
//! drag, a debugger break) are clamped so the planet and moon don't jump.

use std::time::Instant;
use tracing::warn;

/// Longest frame the scene is advanced by, in seconds.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Clamp a measured frame time into `[0, MAX_FRAME_TIME]`.
pub fn clamp_frame_time(frame_time: f64) -> f64 {
    if frame_time > MAX_FRAME_TIME {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            frame_time * 1000.0,
            MAX_FRAME_TIME * 1000.0
        );
        MAX_FRAME_TIME
    } else {
        frame_time.max(0.0)
    }
}

pub struct FrameClock {
    previous_time: Instant,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
        }
    }

    /// Restart timing from now, so start-up work is not counted as a frame.
    pub fn restart(&mut self) {
        self.previous_time = Instant::now();
    }

    /// Measure the time since the previous tick and return it as the frame's
    /// delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance(frame_time)
    }

    /// Count one frame of `frame_time` seconds and return its clamped delta.
    pub fn advance(&mut self, frame_time: f64) -> f32 {
        self.frame_count += 1;
        clamp_frame_time(frame_time) as f32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
