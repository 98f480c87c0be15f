//! Joy score with a decaying combo multiplier and threshold celebrations.
//!
//! A bump is multiplied by the combo earned by the streak before it, then
//! the streak advances. Gaps longer than the combo window reset the
//! multiplier to 1 before scoring, so a stale streak never pays out. The
//! first bump inside the window therefore still pays x1, and x2 starts with
//! the one after it.

use crate::constants::{
    CELEBRATION_COOLDOWN_MS, CELEBRATION_STEP, COMBO_MAX, COMBO_WINDOW_MS,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreState {
    pub joy: u64,
    /// Always within 1..=COMBO_MAX.
    pub combo: u32,
    pub last_action_ms: Option<f64>,
    pub last_celebration_ms: Option<f64>,
    pub next_threshold: u64,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            joy: 0,
            combo: 1,
            last_action_ms: None,
            last_celebration_ms: None,
            next_threshold: CELEBRATION_STEP,
        }
    }
}

/// Fired when the score crosses the next threshold outside the cooldown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Celebration {
    pub joy: u64,
    pub combo: u32,
}

/// Outcome of one [`ScoreEngine::bump`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bump {
    pub scored: u64,
    /// Multiplier applied to this bump.
    pub combo: u32,
    pub celebration: Option<Celebration>,
}

#[derive(Clone, Debug, Default)]
pub struct ScoreEngine {
    state: ScoreState,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    #[inline]
    pub fn joy(&self) -> u64 {
        self.state.joy
    }

    #[inline]
    pub fn combo(&self) -> u32 {
        self.state.combo
    }

    pub fn bump(&mut self, points: u32, now_ms: f64) -> Bump {
        let s = &mut self.state;
        let in_streak = s
            .last_action_ms
            .is_some_and(|last| now_ms - last < COMBO_WINDOW_MS);
        if !in_streak {
            s.combo = 1;
        }
        let applied = s.combo;
        let scored = points as u64 * applied as u64;
        s.joy = s.joy.saturating_add(scored);
        if in_streak {
            s.combo = (s.combo + 1).clamp(1, COMBO_MAX);
        }
        s.last_action_ms = Some(now_ms);

        let cooled = s
            .last_celebration_ms
            .map_or(true, |last| now_ms - last > CELEBRATION_COOLDOWN_MS);
        let celebration = if s.joy >= s.next_threshold && cooled {
            s.last_celebration_ms = Some(now_ms);
            s.next_threshold += CELEBRATION_STEP;
            log::info!(
                "[score] celebration at joy={} combo=x{} next={}",
                s.joy,
                s.combo,
                s.next_threshold
            );
            Some(Celebration {
                joy: s.joy,
                combo: s.combo,
            })
        } else {
            None
        };

        Bump {
            scored,
            combo: applied,
            celebration,
        }
    }
}
