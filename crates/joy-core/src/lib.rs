//! Core of the joy playground: pooled particle/ring/bubble/ribbon simulation,
//! stroke gesture recognition, per-pointer mode dispatch and the joy score.
//!
//! Nothing in this crate touches a platform API. Audio, haptics, status text
//! and drawing are reached through the traits in [`feedback`] and [`surface`],
//! so the whole core runs deterministically on the host from a seed.

pub mod color;
pub mod constants;
pub mod feedback;
pub mod field;
pub mod gesture;
pub mod modes;
pub mod music;
pub mod playground;
pub mod pool;
pub mod random;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod settings;
pub mod status;
pub mod surface;

pub use color::Color;
pub use feedback::{
    Feedback, FeedbackError, HapticDevice, NoiseBurst, Silent, StatusDisplay, Tone, ToneEngine,
    Waveform,
};
pub use field::{
    Bubble, BubbleOptions, Particle, ParticleOptions, RibbonStroke, Ring, RingOptions, Shape,
    SimulationField,
};
pub use gesture::{classify, Bounds, Gesture, GestureKind, GestureMetrics};
pub use modes::{Ctx, Mode, ModeBehavior};
pub use music::{midi_to_hz, quantize_y_to_hz};
pub use playground::{Collaborators, Playground};
pub use pool::Pool;
pub use scheduler::FrameScheduler;
pub use score::{Bump, Celebration, ScoreEngine, ScoreState};
pub use session::{PathSample, PointerId, PointerSession, SessionTable};
pub use settings::{Settings, SettingsError, STORAGE_KEY};
pub use status::StatusBoard;
pub use surface::{Blend, GradientStop, QuadSegment, Surface};
