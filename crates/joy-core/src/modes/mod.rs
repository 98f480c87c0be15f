//! Interaction modes and the per-pointer behaviour table.
//!
//! Each [`Mode`] maps to one [`ModeBehavior`] implementation. The mode is
//! chosen at pointer-down from the global selector and stays frozen in the
//! session until pointer-up or cancel.

mod bubbles;
mod fireworks;
mod ribbons;

pub use bubbles::Bubbles;
pub use fireworks::Fireworks;
pub use ribbons::Ribbons;

use crate::feedback::Feedback;
use crate::field::SimulationField;
use crate::music::quantize_y_to_hz;
use crate::random;
use crate::score::{Bump, Celebration, ScoreEngine};
use crate::session::PointerSession;
use crate::status::StatusBoard;
use glam::Vec2;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Fireworks,
    Bubbles,
    Ribbons,
}

static FIREWORKS: Fireworks = Fireworks;
static BUBBLES: Bubbles = Bubbles;
static RIBBONS: Ribbons = Ribbons;

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Fireworks, Mode::Bubbles, Mode::Ribbons];

    pub fn id(self) -> &'static str {
        match self {
            Mode::Fireworks => "fireworks",
            Mode::Bubbles => "bubbles",
            Mode::Ribbons => "ribbons",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Fireworks => "FIREWORKS",
            Mode::Bubbles => "BUBBLES",
            Mode::Ribbons => "RIBBONS",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn index(self) -> usize {
        match self {
            Mode::Fireworks => 0,
            Mode::Bubbles => 1,
            Mode::Ribbons => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Status text shown when the mode is selected.
    pub fn hint(self) -> &'static str {
        match self {
            Mode::Fireworks => "Mode: Fireworks",
            Mode::Bubbles => "Mode: Bubbles. Drag to swirl, release to pop.",
            Mode::Ribbons => "Mode: Ribbons. Draw loops/zigzags for bonuses.",
        }
    }

    pub fn behavior(self) -> &'static dyn ModeBehavior {
        match self {
            Mode::Fireworks => &FIREWORKS,
            Mode::Bubbles => &BUBBLES,
            Mode::Ribbons => &RIBBONS,
        }
    }
}

/// Everything a behaviour may touch while handling one pointer event.
pub struct Ctx<'a> {
    pub field: &'a mut SimulationField,
    pub score: &'a mut ScoreEngine,
    pub feedback: &'a mut Feedback,
    pub status: &'a mut StatusBoard,
    pub rng: &'a mut StdRng,
    pub now_ms: f64,
}

impl Ctx<'_> {
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.field.intensity()
    }

    #[inline]
    pub fn rand(&mut self, min: f32, max: f32) -> f32 {
        random::between(&mut *self.rng, min, max)
    }

    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        random::chance(&mut *self.rng, probability)
    }

    /// Pentatonic pitch for a vertical position on the current surface.
    pub fn pitch_for_y(&self, y: f32) -> f32 {
        quantize_y_to_hz(y, self.field.viewport().y)
    }

    /// Score `points`, running the celebration if the bump earned one.
    pub fn bump(&mut self, points: u32) -> Bump {
        let bump = self.score.bump(points, self.now_ms);
        if let Some(c) = bump.celebration {
            self.celebrate(c);
        }
        bump
    }

    pub fn celebrate(&mut self, c: Celebration) {
        let view = self.field.viewport();
        let pos = Vec2::new(self.rand(0.25, 0.75) * view.x, self.rand(0.25, 0.75) * view.y);
        let root = 260.0 + self.rand(-30.0, 60.0);
        self.field.spawn_confetti_burst(pos);
        self.feedback.chord(root);
        self.feedback.vibrate(&[18, 18, 24]);
        self.status
            .announce_at(format!("JOY {}  |  PARTY x{}", c.joy, c.combo), self.now_ms);
    }

    pub fn announce(&mut self, text: impl Into<String>) {
        self.status.announce(text);
    }

    pub fn maybe_status(&mut self) {
        let (joy, combo) = (self.score.joy(), self.score.combo());
        self.status.maybe_status(self.now_ms, joy, combo, &mut *self.rng);
    }
}

/// Pointer lifecycle handlers for one interaction mode.
pub trait ModeBehavior {
    fn on_down(&self, session: &mut PointerSession, ctx: &mut Ctx<'_>);
    /// `delta` is the displacement since the previous pointer position.
    fn on_move(&self, session: &mut PointerSession, delta: Vec2, ctx: &mut Ctx<'_>);
    fn on_up(&self, session: &mut PointerSession, ctx: &mut Ctx<'_>);
}
