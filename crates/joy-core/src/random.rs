//! Small helpers over an injected `rand::Rng`.
//!
//! `between` never panics on an empty or inverted range, unlike
//! `gen_range`; effect parameters computed at runtime may collapse.

use rand::Rng;

#[inline]
pub fn between<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

#[inline]
pub fn between_range<R: Rng>(rng: &mut R, range: (f32, f32)) -> f32 {
    between(rng, range.0, range.1)
}

#[inline]
pub fn chance<R: Rng>(rng: &mut R, probability: f32) -> bool {
    rng.gen::<f32>() < probability
}

pub fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
