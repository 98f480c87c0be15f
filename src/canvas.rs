use glam::Vec2;
use joy_core::{Blend, Color, GradientStop, QuadSegment, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface`] over a 2D canvas context, in CSS pixels.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Ok(Self { ctx })
    }

    /// Scale drawing so surface units stay in CSS pixels.
    pub fn set_pixel_ratio(&self, dpr: f64) {
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn add_stops(gradient: &web::CanvasGradient, stops: &[GradientStop]) {
        for stop in stops {
            let _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css());
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn set_blend(&mut self, blend: Blend) {
        let op = match blend {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        };
        let _ = self.ctx.set_global_composite_operation(op);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width.max(0.0) as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn fill_radial_gradient(
        &mut self,
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &[GradientStop],
    ) {
        let gradient = match self.ctx.create_radial_gradient(
            inner.x as f64,
            inner.y as f64,
            inner_radius.max(0.0) as f64,
            outer.x as f64,
            outer.y as f64,
            outer_radius.max(0.0) as f64,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("[canvas] radial gradient rejected: {:?}", e);
                return;
            }
        };
        Self::add_stops(&gradient, stops);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.circle_path(outer, outer_radius);
        self.ctx.fill();
    }

    fn fill_linear_gradient(&mut self, from: Vec2, to: Vec2, size: Vec2, stops: &[GradientStop]) {
        let gradient =
            self.ctx
                .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
        Self::add_stops(&gradient, stops);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_streak(&mut self, at: Vec2, angle: f32, length: f32, thickness: f32, color: Color) {
        self.ctx.save();
        let _ = self.ctx.translate(at.x as f64, at.y as f64);
        let _ = self.ctx.rotate(angle as f64);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            -(length * 0.35) as f64,
            -(thickness * 0.5) as f64,
            length as f64,
            thickness as f64,
        );
        self.ctx.restore();
    }

    fn stroke_quadratic_path(
        &mut self,
        start: Vec2,
        segments: &[QuadSegment],
        width: f32,
        color: Color,
    ) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width.max(0.0) as f64);
        self.ctx.begin_path();
        self.ctx.move_to(start.x as f64, start.y as f64);
        for s in segments {
            self.ctx.quadratic_curve_to(
                s.control.x as f64,
                s.control.y as f64,
                s.to.x as f64,
                s.to.y as f64,
            );
        }
        self.ctx.stroke();
    }
}
