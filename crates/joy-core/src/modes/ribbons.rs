use super::{Ctx, ModeBehavior};
use crate::color::Color;
use crate::constants::{RIBBON_MIN_POINTS, RIBBON_WIDTH};
use crate::feedback::{NoiseBurst, Tone, Waveform};
use crate::field::{ParticleOptions, RingOptions, Shape};
use crate::gesture::{classify, GestureKind, GestureMetrics};
use crate::session::PointerSession;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

const TRAIL_INTERVAL_MS: f64 = 16.0;
const TONE_INTERVAL_MS: f64 = 80.0;
const HAPTIC_INTERVAL_MS: f64 = 140.0;

/// Pitched strokes that persist as ribbons; loops and zigzags earn bonuses.
pub struct Ribbons;

fn stride(step: f32) -> usize {
    step.round().max(1.0) as usize
}

impl Ribbons {
    fn sparkle_along(points: &[Vec2], color: Color, ctx: &mut Ctx<'_>) {
        let intensity = ctx.intensity();
        for p in points.iter().step_by(stride(10.0 / intensity)) {
            let shape = if ctx.chance(0.2) {
                Shape::Streak
            } else {
                Shape::Point
            };
            let opts = ParticleOptions {
                speed: Some(ctx.rand(0.3, 2.2) * intensity),
                angle: Some(ctx.rand(0.0, TAU)),
                radius: Some(ctx.rand(0.8, 2.4)),
                life: Some(ctx.rand(18.0, 52.0)),
                max_life: Some(52.0),
                color: Some(color),
                gravity: Some(0.008),
                drag: Some(0.983),
                shape: Some(shape),
            };
            ctx.field.spawn_particle(*p, opts);
        }
    }

    fn loop_bonus(s: &PointerSession, m: &GestureMetrics, ctx: &mut Ctx<'_>) {
        let intensity = ctx.intensity();
        let center = m.bounds.center();
        let r = m.size * 0.32;
        let steps = (140.0 * intensity).round() as usize;
        let turns = 5.0 + (3.0 * intensity).round();
        let last = steps.saturating_sub(1).max(1) as f32;
        for i in 0..steps {
            let t = i as f32 / last;
            let a = t * TAU * turns;
            let pos = center + Vec2::from_angle(a) * r * (0.18 + t * 0.82);
            let shape = if ctx.chance(0.3) {
                Shape::Streak
            } else {
                Shape::Point
            };
            let opts = ParticleOptions {
                speed: Some(ctx.rand(0.9, 3.6) * intensity),
                angle: Some(a + FRAC_PI_2),
                radius: Some(ctx.rand(0.8, 2.8)),
                life: Some(ctx.rand(24.0, 78.0)),
                max_life: Some(78.0),
                color: Some(Color::hsla(s.hue + t * 90.0, 0.98, 0.7, 0.9)),
                gravity: Some(0.006),
                drag: Some(0.986),
                shape: Some(shape),
            };
            ctx.field.spawn_particle(pos, opts);
        }
        ctx.field.spawn_ring(center, RingOptions::white(10.0, 3.4, 42.0));
        let root = ctx.pitch_for_y(center.y);
        ctx.feedback.chord(root);
        ctx.feedback.vibrate(&[18, 18, 24]);
        ctx.bump(18);
        let text = format!("Loop bonus!  JOY {}", ctx.score.joy());
        ctx.announce(text);
    }

    fn zigzag_bonus(points: &[Vec2], m: &GestureMetrics, ctx: &mut Ctx<'_>) {
        let intensity = ctx.intensity();
        for &i in m.turns.iter().step_by(stride(1.0 / intensity)) {
            let (Some(&at), Some(&next)) = (points.get(i), points.get(i + 1)) else {
                continue;
            };
            let dir = next - at;
            let opts = ParticleOptions {
                speed: Some(ctx.rand(2.2, 5.2) * intensity),
                angle: Some(dir.y.atan2(dir.x)),
                radius: Some(ctx.rand(1.2, 2.8)),
                life: Some(ctx.rand(18.0, 58.0)),
                max_life: Some(58.0),
                color: Some(Color::WHITE),
                gravity: Some(0.01),
                drag: Some(0.984),
                shape: Some(Shape::Streak),
            };
            ctx.field.spawn_particle(at, opts);
        }
        let freq = 520.0 + ctx.rand(-40.0, 60.0);
        ctx.feedback.tone(Tone {
            frequency_hz: freq,
            duration_sec: 0.06,
            waveform: Waveform::Square,
            volume: 0.04,
            glide_hz: -40.0,
            cutoff_hz: 2400.0,
        });
        let rate = ctx.rand(0.95, 1.2);
        ctx.feedback.noise(NoiseBurst {
            volume: 0.035,
            highpass_hz: 1200.0,
            lowpass_hz: 7500.0,
            playback_rate: rate,
            ..Default::default()
        });
        ctx.feedback.vibrate(&[12, 12, 12, 12]);
        ctx.bump(14);
        let text = format!("Zigzag bonus!  JOY {}", ctx.score.joy());
        ctx.announce(text);
    }
}

impl ModeBehavior for Ribbons {
    fn on_down(&self, s: &mut PointerSession, ctx: &mut Ctx<'_>) {
        s.record_point(s.pos, ctx.now_ms);
        ctx.field.spawn_ring(s.pos, RingOptions::white(10.0, 3.1, 30.0));
        let freq = ctx.pitch_for_y(s.pos.y);
        ctx.feedback.tone(Tone {
            frequency_hz: freq,
            duration_sec: 0.08,
            waveform: Waveform::Triangle,
            volume: 0.05,
            glide_hz: 10.0,
            cutoff_hz: 2600.0,
        });
        ctx.feedback.vibrate(&[8]);
        ctx.bump(2);
        ctx.maybe_status();
    }

    fn on_move(&self, s: &mut PointerSession, delta: Vec2, ctx: &mut Ctx<'_>) {
        let now = ctx.now_ms;
        let intensity = ctx.intensity();
        s.record_point(s.pos, now);

        if s.trail.ready(now, TRAIL_INTERVAL_MS) {
            let opts = ParticleOptions {
                speed: Some(ctx.rand(0.1, 1.2) * intensity),
                angle: Some(ctx.rand(0.0, TAU)),
                radius: Some(ctx.rand(0.8, 2.2)),
                life: Some(ctx.rand(12.0, 36.0)),
                max_life: Some(36.0),
                color: Some(Color::hsla(s.hue, 0.98, 0.72, 0.85)),
                gravity: Some(0.002),
                drag: Some(0.975),
                ..Default::default()
            };
            ctx.field.spawn_particle(s.pos, opts);
            if ctx.chance(0.2) {
                let opts = ParticleOptions {
                    speed: Some(ctx.rand(0.5, 2.2)),
                    angle: Some(delta.y.atan2(delta.x)),
                    radius: Some(1.4),
                    life: Some(18.0),
                    max_life: Some(26.0),
                    color: Some(Color::WHITE),
                    gravity: Some(0.001),
                    drag: Some(0.972),
                    shape: Some(Shape::Streak),
                };
                ctx.field.spawn_particle(s.pos, opts);
            }
        }

        if s.tone.ready(now, TONE_INTERVAL_MS) {
            let freq = ctx.pitch_for_y(s.pos.y);
            ctx.feedback.tone(Tone {
                frequency_hz: freq,
                duration_sec: 0.07,
                waveform: Waveform::Sine,
                volume: 0.028,
                glide_hz: 18.0,
                cutoff_hz: 3200.0,
            });
        }

        if s.haptic.ready(now, HAPTIC_INTERVAL_MS) {
            ctx.feedback.vibrate(&[4]);
        }

        ctx.bump(1);
    }

    fn on_up(&self, s: &mut PointerSession, ctx: &mut Ctx<'_>) {
        if s.path().len() <= RIBBON_MIN_POINTS {
            let freq = ctx.pitch_for_y(s.pos.y);
            ctx.feedback.tone(Tone {
                frequency_hz: freq,
                duration_sec: 0.08,
                waveform: Waveform::Triangle,
                volume: 0.04,
                glide_hz: 12.0,
                cutoff_hz: 2800.0,
            });
            ctx.feedback.vibrate(&[10]);
            ctx.bump(3);
            let text = format!("Tiny ribbon tap.  JOY {}", ctx.score.joy());
            ctx.announce(text);
            return;
        }

        let points = s.path_points();
        let gesture = classify(&points);
        log::debug!(
            "[ribbons] pointer {} released {} samples as {:?}",
            s.id,
            points.len(),
            gesture.kind
        );

        let color = Color::hsla(s.hue, 0.98, 0.70, 0.9);
        let width = RIBBON_WIDTH * ctx.intensity();
        ctx.field.add_ribbon(s.path().to_vec(), width, color);
        Self::sparkle_along(&points, color, ctx);

        match (gesture.kind, gesture.metrics.as_ref()) {
            (GestureKind::Loop, Some(m)) => Self::loop_bonus(s, m, ctx),
            (GestureKind::Zigzag, Some(m)) => Self::zigzag_bonus(&points, m, ctx),
            _ => {
                let root = ctx.pitch_for_y(s.pos.y);
                ctx.feedback.chord(root);
                ctx.feedback.vibrate(&[10, 12, 10]);
                ctx.bump(6);
                let text = format!("Ribbon released.  JOY {}", ctx.score.joy());
                ctx.announce(text);
            }
        }
    }
}
