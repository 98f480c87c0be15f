use super::{Ctx, ModeBehavior};
use crate::color::Color;
use crate::constants::{
    BUBBLE_SLICE_MIN_RADIUS, BUBBLE_SLICE_SHRINK, BUBBLE_SLICE_SPEED, BUBBLE_WAND_RADIUS,
};
use crate::feedback::{NoiseBurst, Tone, Waveform};
use crate::field::{ParticleOptions, RingOptions};
use crate::session::PointerSession;
use glam::Vec2;
use std::f32::consts::TAU;

const TRAIL_INTERVAL_MS: f64 = 22.0;
const TONE_INTERVAL_MS: f64 = 120.0;

/// Bubble clusters on touch, a swirling wand while dragging, a pop sweep on release.
pub struct Bubbles;

impl Bubbles {
    /// Push nearby bubbles toward and around the pointer, slicing the ones a
    /// fast stroke cuts through. Returns the colors of bubbles sliced away.
    fn stir(s: &PointerSession, delta: Vec2, ctx: &mut Ctx<'_>) -> Vec<Color> {
        let intensity = ctx.intensity();
        let wand = BUBBLE_WAND_RADIUS * intensity;
        let move_len = delta.length();
        let m = (move_len / 18.0).clamp(0.0, 1.0);
        let swirl = delta.perp().normalize_or_zero();
        let slicing = s.speed > BUBBLE_SLICE_SPEED;

        let bubbles = ctx.field.bubbles_mut();
        let mut popped = Vec::new();
        let mut i = bubbles.len();
        while i > 0 {
            i -= 1;
            let Some(b) = bubbles.get_mut(i) else {
                continue;
            };
            let offset = s.pos - b.pos;
            let dist = offset.length();
            if dist > wand {
                continue;
            }
            let t = (1.0 - dist / wand) * (0.45 + 0.55 * m);
            let toward = offset.normalize_or_zero();
            b.vel += toward * t * 0.42 * intensity + swirl * t * 1.1 * intensity;

            if slicing && dist < b.radius * 0.95 && b.radius < 30.0 * intensity {
                b.radius *= BUBBLE_SLICE_SHRINK;
                if b.radius < BUBBLE_SLICE_MIN_RADIUS {
                    if let Some(b) = bubbles.remove(i) {
                        popped.push(b.color);
                    }
                }
            }
        }
        popped
    }
}

impl ModeBehavior for Bubbles {
    fn on_down(&self, s: &mut PointerSession, ctx: &mut Ctx<'_>) {
        ctx.field.spawn_bubble_cluster(s.pos);
        ctx.field.spawn_ring(s.pos, RingOptions::white(12.0, 3.2, 34.0));
        let rate = ctx.rand(0.85, 1.2);
        ctx.feedback.noise(NoiseBurst {
            volume: 0.04,
            highpass_hz: 650.0,
            lowpass_hz: 4800.0,
            playback_rate: rate,
            ..Default::default()
        });
        let freq = 260.0 + ctx.rand(-30.0, 90.0);
        ctx.feedback.tone(Tone {
            frequency_hz: freq,
            duration_sec: 0.09,
            waveform: Waveform::Sine,
            volume: 0.04,
            glide_hz: 22.0,
            cutoff_hz: 2600.0,
        });
        ctx.feedback.vibrate(&[10]);
        ctx.bump(2);
        ctx.maybe_status();
    }

    fn on_move(&self, s: &mut PointerSession, delta: Vec2, ctx: &mut Ctx<'_>) {
        let now = ctx.now_ms;
        for color in Self::stir(s, delta, ctx) {
            ctx.field.spawn_pop_sparkle(s.pos, color);
            let rate = ctx.rand(1.0, 1.35);
            ctx.feedback.noise(NoiseBurst {
                volume: 0.04,
                highpass_hz: 900.0,
                lowpass_hz: 6800.0,
                playback_rate: rate,
                ..Default::default()
            });
            ctx.feedback.vibrate(&[6]);
            ctx.bump(4);
        }

        if s.trail.ready(now, TRAIL_INTERVAL_MS) {
            let opts = ParticleOptions {
                speed: Some(ctx.rand(0.2, 1.3) * ctx.intensity()),
                angle: Some(ctx.rand(0.0, TAU)),
                radius: Some(ctx.rand(0.8, 2.0)),
                life: Some(ctx.rand(10.0, 28.0)),
                max_life: Some(30.0),
                color: Some(Color::hsla(s.hue + 30.0, 0.95, 0.7, 0.85)),
                gravity: Some(0.002),
                drag: Some(0.975),
                ..Default::default()
            };
            ctx.field.spawn_particle(s.pos, opts);
        }

        if s.tone.ready(now, TONE_INTERVAL_MS) {
            let freq = 300.0 + (s.speed * 900.0).clamp(0.0, 380.0) + ctx.rand(-15.0, 15.0);
            ctx.feedback.tone(Tone {
                frequency_hz: freq,
                duration_sec: 0.06,
                waveform: Waveform::Triangle,
                volume: 0.02,
                glide_hz: 40.0,
                cutoff_hz: 3000.0,
            });
        }

        ctx.bump(1);
    }

    fn on_up(&self, s: &mut PointerSession, ctx: &mut Ctx<'_>) {
        let intensity = ctx.intensity();
        let radius = (120.0 + s.drag_distance * 0.12).clamp(120.0, 240.0) * intensity;
        let max_pops = (10.0 * intensity).round() as usize;
        let popped = ctx.field.pop_bubbles_at(s.pos, radius, max_pops);
        for _ in 0..popped {
            let rate = ctx.rand(0.9, 1.25);
            ctx.feedback.noise(NoiseBurst {
                volume: 0.04,
                highpass_hz: 900.0,
                lowpass_hz: 6200.0,
                playback_rate: rate,
                ..Default::default()
            });
        }

        if popped > 0 {
            ctx.field.spawn_ring(s.pos, RingOptions::white(10.0, 3.2, 36.0));
            ctx.feedback.vibrate(&[10, 12, 14]);
            ctx.bump(5 + popped as u32);
            let text = format!("Bubble pop x{}.  JOY {}", popped, ctx.score.joy());
            ctx.announce(text);
        } else {
            ctx.field.spawn_ring(s.pos, RingOptions::white(8.0, 2.6, 26.0));
            let rate = ctx.rand(0.8, 1.05);
            ctx.feedback.noise(NoiseBurst {
                volume: 0.028,
                highpass_hz: 600.0,
                lowpass_hz: 4200.0,
                playback_rate: rate,
                ..Default::default()
            });
            ctx.feedback.vibrate(&[8]);
            ctx.bump(2);
            let text = format!("No pop. Try a bigger swipe.  JOY {}", ctx.score.joy());
            ctx.announce(text);
        }
    }
}
