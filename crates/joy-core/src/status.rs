//! Status line surfacing with a minimum interval between ambient updates.

use crate::constants::STATUS_INTERVAL_MS;
use crate::feedback::StatusDisplay;
use crate::random;
use rand::Rng;

pub const STATUS_LINES: [&str; 6] = [
    "Nice. Again.",
    "That felt good.",
    "More sparkles!",
    "Tiny chaos, perfect.",
    "Make a big loop.",
    "Two fingers feels great.",
];

pub struct StatusBoard {
    display: Box<dyn StatusDisplay>,
    last_ms: Option<f64>,
    current: String,
}

impl StatusBoard {
    pub fn new(display: Box<dyn StatusDisplay>) -> Self {
        Self {
            display,
            last_ms: None,
            current: String::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Show an explicit message right away, bypassing the rate limit.
    pub fn announce(&mut self, text: impl Into<String>) {
        self.current = text.into();
        self.display.show(&self.current);
    }

    /// Explicit message that also restarts the rate-limit window.
    pub fn announce_at(&mut self, text: impl Into<String>, now_ms: f64) {
        self.last_ms = Some(now_ms);
        self.announce(text);
    }

    /// Ambient encouragement, at most once per [`STATUS_INTERVAL_MS`].
    pub fn maybe_status<R: Rng>(&mut self, now_ms: f64, joy: u64, combo: u32, rng: &mut R) {
        if self
            .last_ms
            .is_some_and(|last| now_ms - last < STATUS_INTERVAL_MS)
        {
            return;
        }
        let line = random::pick(rng, &STATUS_LINES).copied().unwrap_or("");
        self.announce_at(
            format!("{}  |  JOY {}  |  x{}", line, joy, combo.max(1)),
            now_ms,
        );
    }
}
