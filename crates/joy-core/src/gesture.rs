//! Stroke shape recognition.
//!
//! [`classify`] is a pure function of the sampled polyline: the same path
//! always yields the same result. Thresholds are in surface units.

use glam::Vec2;
use smallvec::SmallVec;

/// Fewer samples than this are never classified.
pub const MIN_SAMPLES: usize = 12;
/// Segments shorter than this are ignored when counting turns.
pub const MIN_TURN_SEGMENT: f32 = 2.0;
/// Turn angle (radians) above which a vertex counts as sharp.
pub const SHARP_TURN_RAD: f32 = 1.05;

pub const LOOP_MIN_SAMPLES: usize = 22; // exclusive
pub const LOOP_MIN_SIZE: f32 = 70.0;
pub const LOOP_MAX_END_GAP: f32 = 0.35; // fraction of size
pub const LOOP_ASPECT: (f32, f32) = (0.55, 1.8); // height / width, exclusive
pub const LOOP_MIN_LENGTH: f32 = 2.6; // multiple of size

pub const ZIGZAG_MIN_SIZE: f32 = 120.0;
pub const ZIGZAG_MIN_TURNS: usize = 14; // exclusive
pub const ZIGZAG_MIN_LENGTH: f32 = 1.8; // multiple of size

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    None,
    Loop,
    Zigzag,
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn of(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Bounds {
                min: first,
                max: first,
            },
            |b, p| Bounds {
                min: b.min.min(*p),
                max: b.max.max(*p),
            },
        ))
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Longest side.
    #[inline]
    pub fn extent(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureMetrics {
    pub bounds: Bounds,
    /// Longest bounding-box side.
    pub size: f32,
    /// Height over width; very large for a vertical line.
    pub aspect: f32,
    pub length: f32,
    pub end_gap: f32,
    /// Sample indices of the sharp-turn vertices, in path order.
    pub turns: SmallVec<[usize; 32]>,
}

impl GestureMetrics {
    #[inline]
    pub fn sharp_turns(&self) -> usize {
        self.turns.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gesture {
    pub kind: GestureKind,
    /// Absent when the path had too few samples to measure.
    pub metrics: Option<GestureMetrics>,
}

impl Gesture {
    const NONE: Gesture = Gesture {
        kind: GestureKind::None,
        metrics: None,
    };
}

pub fn measure(points: &[Vec2]) -> Option<GestureMetrics> {
    let bounds = Bounds::of(points)?;
    let size_v = bounds.size();
    let size = bounds.extent();
    let aspect = if size_v.x > 0.0001 {
        size_v.y / size_v.x
    } else {
        999.0
    };

    let length: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();

    let mut turns = SmallVec::new();
    for (i, w) in points.windows(3).enumerate() {
        let a = w[1] - w[0];
        let b = w[2] - w[1];
        let (al, bl) = (a.length(), b.length());
        if al < MIN_TURN_SEGMENT || bl < MIN_TURN_SEGMENT {
            continue;
        }
        let cos = (a.dot(b) / (al * bl)).clamp(-1.0, 1.0);
        if cos.acos() > SHARP_TURN_RAD {
            turns.push(i + 1);
        }
    }

    let end_gap = points[0].distance(points[points.len() - 1]);

    Some(GestureMetrics {
        bounds,
        size,
        aspect,
        length,
        end_gap,
        turns,
    })
}

fn looks_like_loop(samples: usize, m: &GestureMetrics) -> bool {
    samples > LOOP_MIN_SAMPLES
        && m.size > LOOP_MIN_SIZE
        && m.end_gap < m.size * LOOP_MAX_END_GAP
        && m.aspect > LOOP_ASPECT.0
        && m.aspect < LOOP_ASPECT.1
        && m.length > m.size * LOOP_MIN_LENGTH
}

fn looks_like_zigzag(m: &GestureMetrics) -> bool {
    m.size > ZIGZAG_MIN_SIZE
        && m.sharp_turns() > ZIGZAG_MIN_TURNS
        && m.length > m.size * ZIGZAG_MIN_LENGTH
}

/// Classify a recorded stroke as a loop, a zigzag, or neither.
/// Loop is tested first, so a path is never both.
pub fn classify(points: &[Vec2]) -> Gesture {
    if points.len() < MIN_SAMPLES {
        return Gesture::NONE;
    }
    let Some(metrics) = measure(points) else {
        return Gesture::NONE;
    };
    let kind = if looks_like_loop(points.len(), &metrics) {
        GestureKind::Loop
    } else if looks_like_zigzag(&metrics) {
        GestureKind::Zigzag
    } else {
        GestureKind::None
    };
    Gesture {
        kind,
        metrics: Some(metrics),
    }
}
