//! sRGB color with straight alpha, plus the shared effect palette.

use crate::random;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `hue` in degrees (wrapped), `saturation`/`lightness` in 0..1.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c * 0.5;
        let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: to_u8(r1),
            g: to_u8(g1),
            b: to_u8(b1),
            a: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

pub const PALETTE: [Color; 6] = [
    Color::rgb(0x57, 0xf6, 0xff),
    Color::rgb(0xff, 0xe1, 0x66),
    Color::rgb(0xff, 0x6e, 0xa3),
    Color::rgb(0x7f, 0xff, 0xd4),
    Color::rgb(0xff, 0xd9, 0xf7),
    Color::rgb(0x65, 0xff, 0x88),
];

#[inline]
pub fn random_palette<R: Rng>(rng: &mut R) -> Color {
    *random::pick(rng, &PALETTE).unwrap_or(&Color::WHITE)
}
