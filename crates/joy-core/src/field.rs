//! The simulation field: four bounded pools advanced and drawn once per frame.
//!
//! Lifetimes and velocities are in 60 Hz frames. `update` takes a fractional
//! frame delta so the field can be stepped deterministically in tests and at
//! whatever cadence the display offers.

use crate::color::{random_palette, Color};
use crate::constants::*;
use crate::pool::Pool;
use crate::random::{between, between_range, chance, lerp};
use crate::session::PathSample;
use crate::surface::{smooth_path, Blend, GradientStop, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Point,
    Streak,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub radius: f32,
    pub color: Color,
    pub drag: f32,
    pub gravity: f32,
    pub shape: Shape,
}

#[derive(Clone, Debug)]
pub struct Ring {
    pub center: Vec2,
    pub radius: f32,
    pub width: f32,
    pub color: Color,
    pub life: f32,
    pub max_life: f32,
}

#[derive(Clone, Debug)]
pub struct Bubble {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub life: f32,
    pub max_life: f32,
    /// Phase offset of the idle wobble.
    pub seed: f32,
}

#[derive(Clone, Debug)]
pub struct RibbonStroke {
    pub points: Vec<PathSample>,
    pub life: f32,
    pub max_life: f32,
    pub width: f32,
    pub color: Color,
}

/// Overrides for [`SimulationField::spawn_particle`]; `None` draws the default.
#[derive(Clone, Debug, Default)]
pub struct ParticleOptions {
    pub speed: Option<f32>,
    pub angle: Option<f32>,
    pub life: Option<f32>,
    pub max_life: Option<f32>,
    pub radius: Option<f32>,
    pub color: Option<Color>,
    pub drag: Option<f32>,
    pub gravity: Option<f32>,
    pub shape: Option<Shape>,
}

#[derive(Clone, Debug, Default)]
pub struct RingOptions {
    pub radius: Option<f32>,
    pub width: Option<f32>,
    pub color: Option<Color>,
    pub life: Option<f32>,
    pub max_life: Option<f32>,
}

impl RingOptions {
    /// White ring with fixed size and lifetime, the shape most effects use.
    pub fn white(radius: f32, width: f32, life: f32) -> Self {
        Self {
            radius: Some(radius),
            width: Some(width),
            color: Some(Color::WHITE),
            life: Some(life),
            max_life: Some(life),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BubbleOptions {
    pub vel: Option<Vec2>,
    pub radius: Option<f32>,
    pub color: Option<Color>,
    pub life: Option<f32>,
    pub max_life: Option<f32>,
    pub seed: Option<f32>,
}

/// Pool capacities; defaults come from [`crate::constants`].
#[derive(Clone, Copy, Debug)]
pub struct FieldLimits {
    pub particles: usize,
    pub rings: usize,
    pub bubbles: usize,
    pub ribbons: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            particles: MAX_PARTICLES,
            rings: MAX_RINGS,
            bubbles: MAX_BUBBLES,
            ribbons: MAX_RIBBONS,
        }
    }
}

pub struct SimulationField {
    particles: Pool<Particle>,
    rings: Pool<Ring>,
    bubbles: Pool<Bubble>,
    ribbons: Pool<RibbonStroke>,
    viewport: Vec2,
    intensity: f32,
    hue_shift: f32,
    rng: StdRng,
}

#[inline]
fn fade(life: f32, max_life: f32) -> f32 {
    if max_life > 0.0 {
        (life / max_life).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl SimulationField {
    pub fn new(viewport: Vec2, seed: u64) -> Self {
        Self::with_limits(viewport, seed, FieldLimits::default())
    }

    pub fn with_limits(viewport: Vec2, seed: u64, limits: FieldLimits) -> Self {
        Self {
            particles: Pool::with_capacity(limits.particles),
            rings: Pool::with_capacity(limits.rings),
            bubbles: Pool::with_capacity(limits.bubbles),
            ribbons: Pool::with_capacity(limits.ribbons),
            viewport: viewport.max(Vec2::ONE),
            intensity: INTENSITY_DEFAULT,
            hue_shift: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = if intensity.is_finite() {
            intensity.clamp(INTENSITY_MIN, INTENSITY_MAX)
        } else {
            INTENSITY_DEFAULT
        };
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ONE);
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Background hue in degrees; also tints new bubble clusters.
    #[inline]
    pub fn hue_shift(&self) -> f32 {
        self.hue_shift
    }

    pub fn particles(&self) -> &Pool<Particle> {
        &self.particles
    }

    pub fn rings(&self) -> &Pool<Ring> {
        &self.rings
    }

    pub fn bubbles(&self) -> &Pool<Bubble> {
        &self.bubbles
    }

    pub fn bubbles_mut(&mut self) -> &mut Pool<Bubble> {
        &mut self.bubbles
    }

    pub fn ribbons(&self) -> &Pool<RibbonStroke> {
        &self.ribbons
    }

    // ---------------- Spawning ----------------

    pub fn spawn_particle(&mut self, pos: Vec2, options: ParticleOptions) {
        let rng = &mut self.rng;
        let speed = options
            .speed
            .unwrap_or_else(|| between_range(rng, PARTICLE_SPEED_RANGE));
        let angle = options.angle.unwrap_or_else(|| between(rng, 0.0, TAU));
        let life = options
            .life
            .unwrap_or_else(|| between_range(rng, PARTICLE_LIFE_RANGE));
        let max_life = options
            .max_life
            .or(options.life)
            .unwrap_or_else(|| between_range(rng, PARTICLE_LIFE_RANGE));
        let radius = options
            .radius
            .unwrap_or_else(|| between_range(rng, PARTICLE_RADIUS_RANGE));
        let color = options.color.unwrap_or_else(|| random_palette(rng));
        self.particles.push(Particle {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            life,
            max_life,
            radius,
            color,
            drag: options.drag.unwrap_or(PARTICLE_DRAG),
            gravity: options.gravity.unwrap_or(PARTICLE_GRAVITY),
            shape: options.shape.unwrap_or(Shape::Point),
        });
    }

    pub fn spawn_ring(&mut self, center: Vec2, options: RingOptions) {
        let rng = &mut self.rng;
        let radius = options
            .radius
            .unwrap_or_else(|| between_range(rng, RING_RADIUS_RANGE));
        let width = options
            .width
            .unwrap_or_else(|| between_range(rng, RING_WIDTH_RANGE));
        let color = options.color.unwrap_or_else(|| random_palette(rng));
        let life = options.life.unwrap_or(RING_LIFE);
        self.rings.push(Ring {
            center,
            radius,
            width,
            color,
            life,
            max_life: options.max_life.or(options.life).unwrap_or(RING_LIFE),
        });
    }

    pub fn spawn_bubble(&mut self, pos: Vec2, options: BubbleOptions) {
        let intensity = self.intensity;
        let rng = &mut self.rng;
        let vel = options.vel.unwrap_or_else(|| {
            Vec2::new(between(rng, -0.55, 0.55), between(rng, -0.55, 0.55))
        });
        let radius = options.radius.unwrap_or_else(|| {
            between_range(rng, BUBBLE_RADIUS_RANGE) * lerp(0.9, 1.25, intensity / INTENSITY_MAX)
        });
        let color = options
            .color
            .unwrap_or_else(|| Color::hsla(between(rng, 0.0, 360.0), 0.95, 0.62, 0.35));
        let life = options
            .life
            .unwrap_or_else(|| between_range(rng, BUBBLE_LIFE_RANGE).round());
        let max_life = options
            .max_life
            .or(options.life)
            .unwrap_or_else(|| between_range(rng, BUBBLE_LIFE_RANGE).round());
        let seed = options.seed.unwrap_or_else(|| between(rng, 0.0, 1000.0));
        self.bubbles.push(Bubble {
            pos,
            vel,
            radius,
            color,
            life,
            max_life,
            seed,
        });
    }

    /// Radial fan of `count` particles (scaled by intensity) plus one ring.
    /// `power` is the top particle speed before intensity scaling.
    pub fn spawn_burst(&mut self, pos: Vec2, count: u32, power: f32) {
        let intensity = self.intensity;
        let count = (count as f32 * intensity).round().max(0.0) as u32;
        let power = power * lerp(0.85, 1.25, intensity / INTENSITY_MAX);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32 + between(&mut self.rng, -0.22, 0.22);
            let speed = between(&mut self.rng, 0.35, power);
            let radius = between(&mut self.rng, 1.2, 4.0);
            let life = between(&mut self.rng, 40.0, 78.0);
            let shape = if chance(&mut self.rng, 0.16) {
                Shape::Streak
            } else {
                Shape::Point
            };
            self.spawn_particle(
                pos,
                ParticleOptions {
                    speed: Some(speed),
                    angle: Some(angle),
                    radius: Some(radius),
                    life: Some(life),
                    max_life: Some(78.0),
                    gravity: Some(0.02),
                    drag: Some(0.986),
                    shape: Some(shape),
                    ..Default::default()
                },
            );
        }
        self.spawn_ring(pos, RingOptions::default());
    }

    /// Large randomized celebration burst of streaks plus a white ring.
    pub fn spawn_confetti_burst(&mut self, pos: Vec2) {
        for _ in 0..120 {
            let speed = between(&mut self.rng, 0.6, 5.4);
            let angle = between(&mut self.rng, 0.0, TAU);
            let radius = between(&mut self.rng, 1.2, 3.2);
            let life = between(&mut self.rng, 50.0, 110.0);
            let color = random_palette(&mut self.rng);
            self.spawn_particle(
                pos,
                ParticleOptions {
                    speed: Some(speed),
                    angle: Some(angle),
                    radius: Some(radius),
                    life: Some(life),
                    max_life: Some(110.0),
                    color: Some(color),
                    gravity: Some(0.03),
                    drag: Some(0.982),
                    shape: Some(Shape::Streak),
                },
            );
        }
        self.spawn_ring(pos, RingOptions::white(10.0, 3.5, 36.0));
    }

    /// A handful of bubbles scattered around `pos`, tinted from the background hue.
    pub fn spawn_bubble_cluster(&mut self, pos: Vec2) {
        let intensity = self.intensity;
        let count = (6.0 * intensity).round() as u32;
        for i in 0..count {
            let a = between(&mut self.rng, 0.0, TAU);
            let d = between(&mut self.rng, 0.0, 18.0) * intensity;
            let vel = Vec2::new(
                between(&mut self.rng, -0.8, 0.8),
                between(&mut self.rng, -0.8, 0.8),
            );
            let radius = between(&mut self.rng, 12.0, 28.0) * intensity;
            let hue = self.hue_shift + between(&mut self.rng, -50.0, 110.0) + i as f32 * 18.0;
            self.spawn_bubble(
                pos + Vec2::from_angle(a) * d,
                BubbleOptions {
                    vel: Some(vel),
                    radius: Some(radius),
                    color: Some(Color::hsla(hue, 0.95, 0.62, 0.32)),
                    ..Default::default()
                },
            );
        }
    }

    /// Short-lived sparkle and a white ring, left behind by a popped bubble.
    pub fn spawn_pop_sparkle(&mut self, pos: Vec2, color: Color) {
        let intensity = self.intensity;
        let count = (16.0 * intensity).round() as u32;
        for _ in 0..count {
            let speed = between(&mut self.rng, 0.3, 2.8) * intensity;
            let angle = between(&mut self.rng, 0.0, TAU);
            let radius = between(&mut self.rng, 0.8, 2.6);
            let life = between(&mut self.rng, 16.0, 46.0);
            let shape = if chance(&mut self.rng, 0.25) {
                Shape::Streak
            } else {
                Shape::Point
            };
            self.spawn_particle(
                pos,
                ParticleOptions {
                    speed: Some(speed),
                    angle: Some(angle),
                    radius: Some(radius),
                    life: Some(life),
                    max_life: Some(46.0),
                    color: Some(color.with_alpha(1.0)),
                    gravity: Some(0.01),
                    drag: Some(0.982),
                    shape: Some(shape),
                },
            );
        }
        let ring_radius = between(&mut self.rng, 4.0, 10.0) * intensity;
        let ring_width = between(&mut self.rng, 2.0, 3.0);
        self.spawn_ring(pos, RingOptions::white(ring_radius, ring_width, 26.0));
    }

    /// Pop up to `max_pops` bubbles whose edge lies within `radius` of `pos`,
    /// newest first, leaving a sparkle at each. Returns how many popped.
    pub fn pop_bubbles_at(&mut self, pos: Vec2, radius: f32, max_pops: usize) -> usize {
        let mut popped = 0;
        let mut i = self.bubbles.len();
        while i > 0 && popped < max_pops {
            i -= 1;
            let hit = self
                .bubbles
                .get(i)
                .is_some_and(|b| b.pos.distance(pos) <= radius + b.radius);
            if !hit {
                continue;
            }
            if let Some(b) = self.bubbles.remove(i) {
                popped += 1;
                self.spawn_pop_sparkle(b.pos, b.color);
            }
        }
        popped
    }

    pub fn add_ribbon(&mut self, points: Vec<PathSample>, width: f32, color: Color) {
        self.ribbons.push(RibbonStroke {
            points,
            life: RIBBON_LIFE,
            max_life: RIBBON_LIFE,
            width,
            color,
        });
    }

    /// Scatter slow, faint, long-lived motes across the viewport.
    pub fn seed_ambient(&mut self, count: usize) {
        let Vec2 { x: w, y: h } = self.viewport;
        for _ in 0..count {
            let pos = Vec2::new(between(&mut self.rng, 0.0, w), between(&mut self.rng, 0.0, h));
            let speed = between(&mut self.rng, 0.04, 0.28);
            let angle = between(&mut self.rng, 0.0, TAU);
            let radius = between(&mut self.rng, 0.35, 1.25);
            let life = between(&mut self.rng, 120.0, 360.0);
            self.spawn_particle(
                pos,
                ParticleOptions {
                    speed: Some(speed),
                    angle: Some(angle),
                    radius: Some(radius),
                    life: Some(life),
                    max_life: Some(360.0),
                    color: Some(Color::rgba(255, 255, 255, 0.7)),
                    gravity: Some(0.0),
                    drag: Some(0.9992),
                    shape: Some(Shape::Point),
                },
            );
        }
    }

    // ---------------- Physics ----------------

    /// Advance every pool by `dt` frames. `time_ms` drives the bubble wobble.
    pub fn update(&mut self, dt: f32, time_ms: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let Vec2 { x: w, y: h } = self.viewport;
        self.hue_shift = (self.hue_shift + HUE_SHIFT_PER_FRAME * dt) % 360.0;

        self.particles.retain_mut(|p| {
            p.life -= dt;
            if p.life <= 0.0 {
                return false;
            }
            let drag = p.drag.powf(dt);
            p.vel.x *= drag;
            p.vel.y = p.vel.y * drag + p.gravity * dt;
            p.pos += p.vel * dt;
            p.pos.x >= -CULL_MARGIN
                && p.pos.x <= w + CULL_MARGIN
                && p.pos.y >= -CULL_MARGIN
                && p.pos.y <= h + CULL_MARGIN
        });

        self.rings.retain_mut(|r| {
            r.life -= dt;
            r.radius += RING_GROWTH_PER_FRAME * dt;
            r.life > 0.0
        });

        let drag = BUBBLE_DRAG.powf(dt);
        self.bubbles.retain_mut(|b| {
            b.life -= dt;
            if b.life <= 0.0 || b.radius <= BUBBLE_MIN_RADIUS {
                return false;
            }
            let wobble = ((time_ms + b.seed as f64) * 0.001).sin() as f32 * BUBBLE_WOBBLE;
            b.vel.x *= drag;
            b.vel.y = b.vel.y * drag + wobble * dt;
            b.pos += b.vel * dt;

            if b.pos.x < b.radius {
                b.pos.x = b.radius;
                b.vel.x *= -BUBBLE_BOUNCE;
            } else if b.pos.x > w - b.radius {
                b.pos.x = w - b.radius;
                b.vel.x *= -BUBBLE_BOUNCE;
            }
            if b.pos.y < b.radius {
                b.pos.y = b.radius;
                b.vel.y *= -BUBBLE_BOUNCE;
            } else if b.pos.y > h - b.radius {
                b.pos.y = h - b.radius;
                b.vel.y *= -BUBBLE_BOUNCE;
            }
            true
        });

        self.ribbons.retain_mut(|r| {
            r.life -= dt;
            r.life > 0.0
        });
    }

    // ---------------- Rendering ----------------

    /// Full frame: background, normal-blended layer, additive layer.
    pub fn render(&self, surface: &mut dyn Surface, time_ms: f64) {
        self.render_background(surface, time_ms);
        self.render_normal_layer(surface);
        self.render_additive_layer(surface);
    }

    pub fn render_background(&self, surface: &mut dyn Surface, time_ms: f64) {
        let Vec2 { x: w, y: h } = self.viewport;
        surface.set_blend(Blend::Normal);
        surface.set_alpha(1.0);
        surface.fill_linear_gradient(
            Vec2::ZERO,
            self.viewport,
            self.viewport,
            &[
                GradientStop::new(0.0, Color::hsla(self.hue_shift, 0.88, 0.15, 0.21)),
                GradientStop::new(0.5, Color::rgba(4, 7, 18, 0.19)),
                GradientStop::new(1.0, Color::hsla(self.hue_shift + 64.0, 0.74, 0.17, 0.24)),
            ],
        );

        for i in 0..4 {
            let cycle = (time_ms * 0.00028) as f32 + i as f32 * 1.19;
            let center = Vec2::new(
                w * (0.16 + (i as f32 / 4.0) * 0.78) + cycle.sin() * 28.0,
                h * (0.24 + 0.11 * i as f32) + (cycle * 0.9).cos() * 22.0,
            );
            let r = 34.0 + i as f32 * 8.0 + (cycle * 1.4).sin() * 7.0;
            surface.fill_radial_gradient(
                center,
                0.0,
                center,
                r,
                &[
                    GradientStop::new(0.0, Color::rgba(255, 255, 255, 0.17)),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            );
        }
    }

    /// Bubbles and finished ribbon strokes.
    pub fn render_normal_layer(&self, surface: &mut dyn Surface) {
        surface.set_blend(Blend::Normal);
        for b in self.bubbles.iter() {
            let alpha = fade(b.life, b.max_life) * 0.92;
            surface.set_alpha(alpha);
            let highlight = b.pos - Vec2::splat(b.radius * 0.35);
            surface.fill_radial_gradient(
                highlight,
                b.radius * 0.12,
                b.pos,
                b.radius,
                &[
                    GradientStop::new(0.0, Color::rgba(255, 255, 255, 0.85)),
                    GradientStop::new(0.25, Color::rgba(255, 255, 255, 0.22)),
                    GradientStop::new(1.0, b.color),
                ],
            );
            surface.set_alpha(alpha * 0.7);
            surface.stroke_circle(
                b.pos,
                (b.radius - 0.8).max(0.0),
                1.1,
                Color::rgba(255, 255, 255, 0.45),
            );
        }

        for r in self.ribbons.iter() {
            let points: Vec<Vec2> = r.points.iter().map(|s| s.pos).collect();
            let Some((start, segments)) = smooth_path(&points) else {
                continue;
            };
            let alpha = fade(r.life, r.max_life);
            surface.set_alpha(alpha);
            surface.stroke_quadratic_path(start, &segments, r.width * (0.55 + alpha * 0.45), r.color);
        }
        surface.set_alpha(1.0);
    }

    /// Rings and particles.
    pub fn render_additive_layer(&self, surface: &mut dyn Surface) {
        surface.set_blend(Blend::Additive);
        for r in self.rings.iter() {
            let alpha = fade(r.life, r.max_life);
            surface.set_alpha(alpha);
            surface.stroke_circle(r.center, r.radius, r.width * alpha, r.color);
        }

        for p in self.particles.iter() {
            let alpha = fade(p.life, p.max_life);
            surface.set_alpha(alpha);
            match p.shape {
                Shape::Streak => {
                    let len = (p.vel.length() * 6.0).clamp(6.0, 26.0);
                    let angle = p.vel.y.atan2(p.vel.x);
                    surface.fill_streak(p.pos, angle, len, p.radius, p.color);
                }
                Shape::Point => {
                    surface.fill_circle(p.pos, p.radius * (0.35 + alpha), p.color);
                }
            }
        }
        surface.set_alpha(1.0);
        surface.set_blend(Blend::Normal);
    }
}
