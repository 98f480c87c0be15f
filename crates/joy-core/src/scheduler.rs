//! Frame pacing: converts wall-clock timestamps into frame deltas for the field.
//!
//! The field is tuned in 60 Hz frames. The scheduler measures how many of
//! those elapsed since the previous tick and caps the catch-up after a
//! stall. It can also be stepped one fixed frame at a time.

use crate::constants::{FRAME_MS, MAX_FRAME_STEP};

#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    last_ms: Option<f64>,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks issued so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frame delta for a tick at `now_ms`. The first tick counts as one frame;
    /// time running backwards yields zero.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() => ((now_ms - last) / FRAME_MS) as f32,
            _ => 1.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        self.frames += 1;
        dt.clamp(0.0, MAX_FRAME_STEP)
    }

    /// Advance by exactly one frame, independent of wall time.
    pub fn step(&mut self) -> f32 {
        if let Some(last) = self.last_ms.as_mut() {
            *last += FRAME_MS;
        }
        self.frames += 1;
        1.0
    }
}
