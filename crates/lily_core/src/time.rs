//! Frame pacing and countdown timers.
//!
//! The simulation runs one step per rendered frame and advances every physics
//! integration and timer by the elapsed frame time in whole milliseconds. That
//! elapsed time is clamped to `max_frame_ms` so a stalled frame can never feed
//! an oversized delta into movement or collision math.

use std::time::{Duration, Instant};

pub const DEFAULT_FRAME_RATE: u64 = 48;
pub const DEFAULT_MIN_FRAME_RATE: u64 = 24;

pub struct FramePacer {
    pub target_frame_ms: u64,
    pub max_frame_ms: u64,
    pub frame_count: u64,
    elapsed_ms: u64,
    start_instant: Instant,
    last_instant: Instant,
}

impl FramePacer {
    pub fn new(frame_rate: u64, min_frame_rate: u64) -> Self {
        let frame_rate = frame_rate.max(1);
        let min_frame_rate = min_frame_rate.clamp(1, frame_rate);
        let target_frame_ms = 1000 / frame_rate;
        let now = Instant::now();
        Self {
            target_frame_ms,
            max_frame_ms: 1000 / min_frame_rate,
            frame_count: 0,
            elapsed_ms: 0,
            start_instant: now,
            last_instant: now,
        }
    }

    /// How long the caller should sleep after doing a frame's work to hold the
    /// target rate. Zero once the frame already overran its budget.
    pub fn remaining_delay(&self) -> Duration {
        let spent = Instant::now().duration_since(self.last_instant);
        Duration::from_millis(self.target_frame_ms).saturating_sub(spent)
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant).as_millis();
        self.last_instant = now;
        self.elapsed_ms = u64::try_from(elapsed).unwrap_or(u64::MAX);
        self.frame_count += 1;

        if self.elapsed_ms > self.max_frame_ms {
            log::warn!(
                "Frame took {}ms, clamping simulation step to {}ms",
                self.elapsed_ms,
                self.max_frame_ms
            );
        }
    }

    /// Elapsed time of the last frame, clamped to `max_frame_ms`.
    pub fn frame_time_ms(&self) -> u64 {
        self.elapsed_ms.min(self.max_frame_ms)
    }

    /// Frames per second averaged over the whole run.
    pub fn average_fps(&self) -> f64 {
        let seconds = self.last_instant.duration_since(self.start_instant).as_secs_f64();
        if seconds > 0.0 {
            self.frame_count as f64 / seconds
        } else {
            0.0
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE, DEFAULT_MIN_FRAME_RATE)
    }
}

/// Countdown in milliseconds. `tick` saturates at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    delay: u64,
    time_left: u64,
}

impl Timer {
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            time_left: delay,
        }
    }

    pub fn tick(&mut self, elapsed_ms: u64) {
        self.time_left = self.time_left.saturating_sub(elapsed_ms);
    }

    pub fn done(&self) -> bool {
        self.time_left == 0
    }

    pub fn reset(&mut self) {
        self.time_left = self.delay;
    }

    pub fn expire(&mut self) {
        self.time_left = 0;
    }

    pub fn delay(&self) -> u64 {
        self.delay
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }
}
