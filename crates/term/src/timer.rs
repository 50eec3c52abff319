//! Frame pacing and delta time.

use std::thread;
use std::time::{Duration, Instant};

/// Wall-clock budget for one frame at `target_fps`; `None` when pacing is off.
pub fn frame_budget(target_fps: u32) -> Option<Duration> {
    if target_fps == 0 {
        return None;
    }
    Some(Duration::from_secs_f64(1.0 / f64::from(target_fps)))
}

/// Time left to sleep after a frame that took `elapsed`. Overrun frames get none.
pub fn pacing_sleep(elapsed: Duration, target_fps: u32) -> Option<Duration> {
    frame_budget(target_fps)
        .and_then(|budget| budget.checked_sub(elapsed))
        .filter(|rest| !rest.is_zero())
}

/// Measures each frame from `begin_frame` to the end of `end_frame`, including
/// the pacing sleep.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    start: Option<Instant>,
    delta: Duration,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.start = Some(now);
    }

    /// Sleep out the rest of the frame budget, then record the frame's delta.
    pub fn end_frame(&mut self, target_fps: u32) -> Duration {
        let Some(start) = self.start else {
            return self.delta;
        };
        if let Some(rest) = pacing_sleep(start.elapsed(), target_fps) {
            thread::sleep(rest);
        }
        self.finish_at(Instant::now())
    }

    /// Record the delta as if the frame ended at `end`, without sleeping.
    pub fn finish_at(&mut self, end: Instant) -> Duration {
        if let Some(start) = self.start {
            self.delta = end.saturating_duration_since(start);
        }
        self.delta
    }

    /// Unclamped duration of the last finished frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Last frame's duration in seconds, clamped to `max`.
    pub fn delta_seconds(&self, max: f32) -> f32 {
        self.delta.as_secs_f32().min(max)
    }
}
