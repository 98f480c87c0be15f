//! Abstract 2D drawing target the field renders into.
//!
//! The frontend implements this over a canvas context; tests implement it
//! with a command recorder.

use crate::color::Color;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// Source-over compositing (bubbles, ribbons, background).
    Normal,
    /// Additive compositing (particles, rings, glows).
    Additive,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// One quadratic curve piece: control point then end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSegment {
    pub control: Vec2,
    pub to: Vec2,
}

pub trait Surface {
    fn set_blend(&mut self, blend: Blend);
    /// Global alpha multiplied into every subsequent draw.
    fn set_alpha(&mut self, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    /// Fill the circle (`outer`, `outer_radius`) with a radial gradient that
    /// starts at (`inner`, `inner_radius`).
    fn fill_radial_gradient(
        &mut self,
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &[GradientStop],
    );
    /// Fill the rectangle `[0, size]` with a linear gradient from `from` to `to`.
    fn fill_linear_gradient(&mut self, from: Vec2, to: Vec2, size: Vec2, stops: &[GradientStop]);
    /// Bar of `length` x `thickness` rotated by `angle`, starting 35% of its
    /// length behind `at`.
    fn fill_streak(&mut self, at: Vec2, angle: f32, length: f32, thickness: f32, color: Color);
    /// Round-capped stroke through `start` and the given quadratic segments.
    fn stroke_quadratic_path(
        &mut self,
        start: Vec2,
        segments: &[QuadSegment],
        width: f32,
        color: Color,
    );
}

/// Smooth a polyline by curving through segment midpoints, using each
/// interior sample as the control point. Returns `None` below three points.
pub fn smooth_path(points: &[Vec2]) -> Option<(Vec2, Vec<QuadSegment>)> {
    if points.len() < 3 {
        return None;
    }
    let segments = (1..points.len() - 2)
        .map(|i| QuadSegment {
            control: points[i],
            to: (points[i] + points[i + 1]) * 0.5,
        })
        .collect();
    Some((points[0], segments))
}
