use super::{Ctx, ModeBehavior};
use crate::color::random_palette;
use crate::constants::TAP_DISTANCE;
use crate::feedback::{Tone, Waveform};
use crate::field::ParticleOptions;
use crate::session::PointerSession;
use glam::Vec2;
use std::f32::consts::TAU;

const TRAIL_INTERVAL_MS: f64 = 14.0;
const TONE_INTERVAL_MS: f64 = 58.0;
const HAPTIC_INTERVAL_MS: f64 = 120.0;

/// Bursts on touch, sparkling trail while dragging, a drag-scaled burst on release.
pub struct Fireworks;

impl ModeBehavior for Fireworks {
    fn on_down(&self, s: &mut PointerSession, ctx: &mut Ctx<'_>) {
        ctx.field.spawn_burst(s.pos, 26, 3.4);
        let freq = 250.0 + ctx.rand(0.0, 140.0);
        ctx.feedback.tone(Tone {
            frequency_hz: freq,
            duration_sec: 0.12,
            waveform: Waveform::Triangle,
            volume: 0.06,
            glide_hz: 18.0,
            ..Default::default()
        });
        ctx.feedback.vibrate(&[12]);
        ctx.bump(1);
        ctx.maybe_status();
    }

    fn on_move(&self, s: &mut PointerSession, _delta: Vec2, ctx: &mut Ctx<'_>) {
        let now = ctx.now_ms;
        if s.trail.ready(now, TRAIL_INTERVAL_MS) {
            let color = random_palette(&mut *ctx.rng);
            for _ in 0..5 {
                let opts = ParticleOptions {
                    speed: Some(ctx.rand(0.2, 1.3)),
                    angle: Some(ctx.rand(0.0, TAU)),
                    radius: Some(ctx.rand(0.9, 2.2)),
                    life: Some(ctx.rand(14.0, 32.0)),
                    max_life: Some(34.0),
                    color: Some(color),
                    gravity: Some(0.003),
                    drag: Some(0.973),
                    ..Default::default()
                };
                ctx.field.spawn_particle(s.pos, opts);
            }
        }

        if s.tone.ready(now, TONE_INTERVAL_MS) {
            ctx.feedback.tone(Tone {
                frequency_hz: 320.0 + (s.drag_distance * 0.7) % 260.0,
                duration_sec: 0.08,
                waveform: Waveform::Sine,
                volume: 0.03,
                glide_hz: 30.0,
                cutoff_hz: 3400.0,
            });
        }

        if s.haptic.ready(now, HAPTIC_INTERVAL_MS) {
            ctx.feedback.vibrate(&[4]);
        }

        ctx.bump(1);
    }

    fn on_up(&self, s: &mut PointerSession, ctx: &mut Ctx<'_>) {
        let drag = s.drag_distance;
        let count = (18.0 + drag * 0.1).round().clamp(20.0, 70.0) as u32;
        let power = (2.0 + drag * 0.008).clamp(2.6, 5.8);
        ctx.field.spawn_burst(s.pos, count, power);
        ctx.feedback.chord((240.0 + drag * 0.95).clamp(220.0, 640.0));

        if drag < TAP_DISTANCE {
            ctx.feedback.vibrate(&[14, 18, 12]);
            let text = format!("Tap pop.  JOY {}", ctx.score.joy());
            ctx.announce(text);
            ctx.bump(3);
        } else {
            ctx.feedback.vibrate(&[24, 12, 30]);
            let text = format!("Drag wave {}px.  JOY {}", drag.round(), ctx.score.joy());
            ctx.announce(text);
            ctx.bump((drag / 14.0).clamp(5.0, 26.0).round() as u32);
        }
    }
}
