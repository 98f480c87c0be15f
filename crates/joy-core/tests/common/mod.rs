// Recording fakes shared by the integration tests.

#![allow(dead_code)]

use glam::Vec2;
use joy_core::{
    Blend, Color, FeedbackError, GradientStop, HapticDevice, NoiseBurst, QuadSegment,
    StatusDisplay, Surface, Tone, ToneEngine,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, cloneable event log.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    pub fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn any(&self, needle: &str) -> bool {
        self.0.borrow().iter().any(|e| e.contains(needle))
    }

    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }
}

pub struct RecordingTone {
    pub log: Log,
    pub unavailable: bool,
}

impl ToneEngine for RecordingTone {
    fn play_tone(&mut self, tone: &Tone) -> Result<(), FeedbackError> {
        if self.unavailable {
            return Err(FeedbackError::AudioUnavailable("no AudioContext".into()));
        }
        self.log.push(format!(
            "tone {:.0}Hz vol={:.4}",
            tone.frequency_hz, tone.volume
        ));
        Ok(())
    }

    fn play_noise_burst(&mut self, noise: &NoiseBurst) -> Result<(), FeedbackError> {
        if self.unavailable {
            return Err(FeedbackError::AudioUnavailable("no AudioContext".into()));
        }
        self.log.push(format!("noise vol={:.4}", noise.volume));
        Ok(())
    }
}

pub struct RecordingHaptics(pub Log);

impl HapticDevice for RecordingHaptics {
    fn vibrate(&mut self, pattern: &[u32]) {
        self.0.push(format!("vibrate {:?}", pattern));
    }
}

pub struct RecordingStatus(pub Log);

impl StatusDisplay for RecordingStatus {
    fn show(&mut self, text: &str) {
        self.0.push(text.to_string());
    }
}

/// Counts draw calls by kind.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<&'static str>,
    pub blends: Vec<Blend>,
}

impl RecordingSurface {
    pub fn count(&self, kind: &str) -> usize {
        self.calls.iter().filter(|c| **c == kind).count()
    }
}

impl Surface for RecordingSurface {
    fn set_blend(&mut self, blend: Blend) {
        self.blends.push(blend);
    }

    fn set_alpha(&mut self, _alpha: f32) {}

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.calls.push("fill_circle");
    }

    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _width: f32, _color: Color) {
        self.calls.push("stroke_circle");
    }

    fn fill_radial_gradient(
        &mut self,
        _inner: Vec2,
        _inner_radius: f32,
        _outer: Vec2,
        _outer_radius: f32,
        _stops: &[GradientStop],
    ) {
        self.calls.push("radial");
    }

    fn fill_linear_gradient(&mut self, _from: Vec2, _to: Vec2, _size: Vec2, _stops: &[GradientStop]) {
        self.calls.push("linear");
    }

    fn fill_streak(&mut self, _at: Vec2, _angle: f32, _length: f32, _thickness: f32, _color: Color) {
        self.calls.push("streak");
    }

    fn stroke_quadratic_path(
        &mut self,
        _start: Vec2,
        _segments: &[QuadSegment],
        _width: f32,
        _color: Color,
    ) {
        self.calls.push("path");
    }
}
