//! Fixed-rate frame pacing and the monotonic game clock.

use std::time::{Duration, Instant};

pub struct FrameClock {
    start: Instant,
    frame_start: Instant,
    frame_dur: Duration,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_start: now,
            frame_dur: frame_duration(fps),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Sleep out whatever is left of the current frame, then start the next.
    pub fn wait(&mut self) {
        let remaining = remaining(self.frame_dur, self.frame_start.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}

pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

fn remaining(frame: Duration, elapsed: Duration) -> Duration {
    frame.saturating_sub(elapsed)
}
