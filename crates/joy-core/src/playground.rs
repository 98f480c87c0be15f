//! The playground: one owned value that ties pointer input, the simulation
//! field, scoring and feedback together.
//!
//! All handlers run to completion on the caller's thread. Pointer events
//! arriving between two frames are fully applied before the next
//! [`Playground::frame`] advances and draws the field.

use crate::color::Color;
use crate::constants::{AMBIENT_PARTICLES, INTENSITY_STEP, RIBBON_LIVE_WIDTH};
use crate::feedback::{Feedback, HapticDevice, Silent, StatusDisplay, Tone, ToneEngine, Waveform};
use crate::field::SimulationField;
use crate::modes::{Ctx, Mode};
use crate::random::between;
use crate::scheduler::FrameScheduler;
use crate::score::ScoreEngine;
use crate::session::{PointerId, PointerSession, SessionTable};
use crate::settings::Settings;
use crate::status::StatusBoard;
use crate::surface::{smooth_path, Blend, GradientStop, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Platform devices the playground talks to.
pub struct Collaborators {
    pub tone: Box<dyn ToneEngine>,
    pub haptics: Box<dyn HapticDevice>,
    pub status: Box<dyn StatusDisplay>,
}

impl Collaborators {
    pub fn silent() -> Self {
        Self {
            tone: Box::new(Silent),
            haptics: Box::new(Silent),
            status: Box::new(Silent),
        }
    }
}

pub struct Playground {
    field: SimulationField,
    score: ScoreEngine,
    sessions: SessionTable,
    settings: Settings,
    settings_dirty: bool,
    feedback: Feedback,
    status: StatusBoard,
    scheduler: FrameScheduler,
    rng: StdRng,
}

impl Playground {
    pub fn new(viewport: Vec2, settings: Settings, seed: u64, devices: Collaborators) -> Self {
        let mut feedback = Feedback::new(devices.tone, devices.haptics);
        feedback.set_intensity(settings.intensity);
        feedback.set_sound_enabled(settings.sound_enabled);
        feedback.set_haptics_enabled(settings.haptic_enabled);

        let mut field = SimulationField::new(viewport, seed);
        field.set_intensity(settings.intensity);

        log::info!(
            "[playground] start mode={} intensity={:.1} viewport={}x{}",
            settings.mode.id(),
            settings.intensity,
            viewport.x,
            viewport.y
        );

        Self {
            field,
            score: ScoreEngine::new(),
            sessions: SessionTable::new(),
            settings,
            settings_dirty: false,
            feedback,
            status: StatusBoard::new(devices.status),
            scheduler: FrameScheduler::new(),
            rng: StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
        }
    }

    // ---------------- Accessors ----------------

    pub fn field(&self) -> &SimulationField {
        &self.field
    }

    pub fn score(&self) -> &ScoreEngine {
        &self.score
    }

    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn status_text(&self) -> &str {
        self.status.current()
    }

    pub fn frames(&self) -> u64 {
        self.scheduler.frames()
    }

    /// True once after any change the host should persist.
    pub fn take_settings_changed(&mut self) -> bool {
        std::mem::take(&mut self.settings_dirty)
    }

    fn split(&mut self, now_ms: f64) -> (&mut SessionTable, Ctx<'_>) {
        let ctx = Ctx {
            field: &mut self.field,
            score: &mut self.score,
            feedback: &mut self.feedback,
            status: &mut self.status,
            rng: &mut self.rng,
            now_ms,
        };
        (&mut self.sessions, ctx)
    }

    /// Surface a pending audio notice and mirror the forced sound-off into settings.
    fn settle(&mut self) {
        if let Some(notice) = self.feedback.take_notice() {
            self.status.announce(notice);
        }
        if self.settings.sound_enabled != self.feedback.sound_enabled() {
            self.settings.sound_enabled = self.feedback.sound_enabled();
            self.settings_dirty = true;
        }
    }

    // ---------------- Pointer lifecycle ----------------

    /// Start a session for `id` in the currently selected mode. A second
    /// down for a live id finishes the old session first.
    pub fn pointer_down(&mut self, id: PointerId, pos: Vec2, now_ms: f64) {
        if self.sessions.contains(id) {
            log::debug!("[input] pointer {} pressed twice; closing the stale session", id);
            self.pointer_up(id, now_ms);
        }
        let pos = if pos.is_finite() { pos } else { Vec2::ZERO };
        let hue = between(&mut self.rng, 0.0, 360.0).floor();
        let seed = between(&mut self.rng, 0.0, 1000.0);
        let mode = self.settings.mode;
        let mut session = PointerSession::new(id, pos, now_ms, mode, hue, seed);

        let (_, mut ctx) = self.split(now_ms);
        mode.behavior().on_down(&mut session, &mut ctx);
        self.sessions.insert(session);
        self.settle();
    }

    /// Returns false when `id` has no live session.
    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2, now_ms: f64) -> bool {
        let (sessions, mut ctx) = self.split(now_ms);
        let Some(session) = sessions.get_mut(id) else {
            return false;
        };
        let delta = session.advance(pos, now_ms);
        session.mode.behavior().on_move(session, delta, &mut ctx);
        self.settle();
        true
    }

    /// Remove the session and run its mode's release handler.
    /// Returns false when `id` has no live session.
    pub fn pointer_up(&mut self, id: PointerId, now_ms: f64) -> bool {
        let Some(mut session) = self.sessions.remove(id) else {
            return false;
        };
        let (_, mut ctx) = self.split(now_ms);
        session.mode.behavior().on_up(&mut session, &mut ctx);
        ctx.maybe_status();
        self.settle();
        true
    }

    /// Cancellation ends the session exactly like a release.
    pub fn pointer_cancel(&mut self, id: PointerId, now_ms: f64) -> bool {
        self.pointer_up(id, now_ms)
    }

    // ---------------- Global controls ----------------

    /// Select `mode` for future sessions; live sessions keep theirs.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.settings.mode != mode {
            self.settings.mode = mode;
            self.settings_dirty = true;
        }
    }

    pub fn cycle_mode(&mut self) -> Mode {
        let mode = self.settings.mode.next();
        self.set_mode(mode);
        log::info!("[playground] mode -> {}", mode.id());
        self.status.announce(mode.hint());
        self.feedback.vibrate(&[8]);
        self.feedback.tone(Tone {
            frequency_hz: 420.0 + mode.index() as f32 * 90.0,
            duration_sec: 0.08,
            waveform: Waveform::Triangle,
            volume: 0.05,
            glide_hz: 20.0,
            ..Default::default()
        });
        self.settle();
        mode
    }

    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.settings.sound_enabled;
        self.settings.sound_enabled = enabled;
        self.settings_dirty = true;
        self.feedback.set_sound_enabled(enabled);
        if enabled {
            if self.feedback.audio_available() {
                self.feedback.tone(Tone {
                    frequency_hz: 440.0,
                    duration_sec: 0.08,
                    waveform: Waveform::Triangle,
                    volume: 0.05,
                    glide_hz: 20.0,
                    ..Default::default()
                });
                self.status.announce("Sound on.");
            } else {
                self.feedback.set_sound_enabled(false);
                self.status.announce("Audio not supported in this browser.");
            }
        } else {
            self.status.announce("Sound off.");
        }
        self.settle();
        self.settings.sound_enabled
    }

    pub fn toggle_haptics(&mut self) -> bool {
        let enabled = !self.settings.haptic_enabled;
        self.settings.haptic_enabled = enabled;
        self.settings_dirty = true;
        self.feedback.set_haptics_enabled(enabled);
        if enabled {
            self.feedback.vibrate(&[10, 10, 10]);
            self.status.announce("Vibration on.");
        } else {
            self.status.announce("Vibration off.");
        }
        enabled
    }

    /// Clamp and apply a new intensity everywhere it scales effects.
    pub fn set_intensity(&mut self, intensity: f32) -> f32 {
        self.settings.set_intensity(intensity);
        let applied = self.settings.intensity;
        self.field.set_intensity(applied);
        self.feedback.set_intensity(applied);
        self.settings_dirty = true;
        self.status.announce(format!("Intensity {:.1}x", applied));
        applied
    }

    /// Step intensity up (`steps > 0`) or down by [`INTENSITY_STEP`] per step.
    pub fn nudge_intensity(&mut self, steps: i32) -> f32 {
        let target = self.settings.intensity + steps as f32 * INTENSITY_STEP;
        // Keep one decimal so repeated nudges do not drift.
        self.set_intensity((target * 10.0).round() / 10.0)
    }

    /// Confetti at a random spot, a chord and a small score bonus.
    pub fn party(&mut self, now_ms: f64) {
        let view = self.field.viewport();
        let x = between(&mut self.rng, 0.2, 0.8) * view.x;
        let y = between(&mut self.rng, 0.2, 0.8) * view.y;
        let root = 280.0 + between(&mut self.rng, -40.0, 90.0);
        let (_, mut ctx) = self.split(now_ms);
        ctx.field.spawn_confetti_burst(Vec2::new(x, y));
        ctx.feedback.chord(root);
        ctx.bump(6);
        ctx.maybe_status();
        self.settle();
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.field.resize(viewport);
        log::debug!("[playground] resized to {}x{}", viewport.x, viewport.y);
        self.status.announce("Resized.");
    }

    pub fn seed_ambient(&mut self) {
        self.field.seed_ambient(AMBIENT_PARTICLES);
    }

    pub fn announce(&mut self, text: impl Into<String>) {
        self.status.announce(text);
    }

    // ---------------- Frame ----------------

    /// Advance the field to `now_ms` and draw one frame.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        let dt = self.scheduler.advance(now_ms);
        self.field.update(dt, now_ms);
        self.render(surface, now_ms);
    }

    pub fn render(&self, surface: &mut dyn Surface, time_ms: f64) {
        self.field.render_background(surface, time_ms);
        self.field.render_normal_layer(surface);
        self.render_live_ribbons(surface);
        surface.set_blend(Blend::Additive);
        self.render_pointer_glows(surface, time_ms);
        self.field.render_additive_layer(surface);
    }

    fn render_live_ribbons(&self, surface: &mut dyn Surface) {
        let width = RIBBON_LIVE_WIDTH * self.field.intensity();
        surface.set_blend(Blend::Normal);
        for s in self.sessions.iter().filter(|s| s.mode == Mode::Ribbons) {
            let Some((start, segments)) = smooth_path(&s.path_points()) else {
                continue;
            };
            surface.set_alpha(0.95);
            surface.stroke_quadratic_path(start, &segments, width, Color::hsla(s.hue, 0.98, 0.70, 0.85));
        }
        surface.set_alpha(1.0);
    }

    fn render_pointer_glows(&self, surface: &mut dyn Surface, time_ms: f64) {
        surface.set_alpha(1.0);
        for s in self.sessions.iter() {
            let pulse = 0.65 + ((time_ms * 0.012) as f32 + s.seed).sin() * 0.25;
            let r = 18.0 + s.speed * 6.0;
            surface.fill_radial_gradient(
                s.pos,
                0.0,
                s.pos,
                r,
                &[
                    GradientStop::new(0.0, Color::hsla(s.hue, 1.0, 0.7, 0.34 * pulse)),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            );
        }
    }
}
