// Tests for frame pacing.

mod common;

use common::RecordingSurface;
use glam::Vec2;
use joy_core::constants::FRAME_MS;
use joy_core::{FrameScheduler, SimulationField};

#[test]
fn first_tick_is_one_frame() {
    let mut s = FrameScheduler::new();
    assert_eq!(s.advance(12_345.0), 1.0);
    assert_eq!(s.frames(), 1);
}

#[test]
fn delta_is_measured_in_frames() {
    let mut s = FrameScheduler::new();
    s.advance(0.0);
    let dt = s.advance(FRAME_MS * 2.0);
    assert!((dt - 2.0).abs() < 1e-4);
}

#[test]
fn stalls_are_capped_and_time_never_runs_backwards() {
    let mut s = FrameScheduler::new();
    s.advance(0.0);
    assert_eq!(s.advance(10_000.0), 4.0);
    assert_eq!(s.advance(9_000.0), 0.0);
}

#[test]
fn fixed_steps_are_one_frame() {
    let mut s = FrameScheduler::new();
    s.advance(100.0);
    assert_eq!(s.step(), 1.0);
    assert_eq!(s.step(), 1.0);
    let dt = s.advance(100.0 + FRAME_MS * 3.0);
    assert!((dt - 1.0).abs() < 1e-4);
    assert_eq!(s.frames(), 4);
}

#[test]
fn advancing_drives_the_field_to_expiry() {
    let mut field = SimulationField::new(Vec2::new(320.0, 240.0), 9);
    field.spawn_burst(Vec2::new(100.0, 100.0), 8, 2.0);
    let mut surface = RecordingSurface::default();
    let mut s = FrameScheduler::new();

    let dt = s.advance(0.0);
    field.update(dt, 0.0);
    field.render(&mut surface, 0.0);
    assert_eq!(surface.count("linear"), 1);
    assert_eq!(field.particles().len(), 8);

    // Burst particles live at most 78 frames; four-frame steps get there.
    for i in 1..=25 {
        let now = i as f64 * FRAME_MS * 4.0;
        let dt = s.advance(now);
        assert!((dt - 4.0).abs() < 1e-3);
        field.update(dt, now);
    }
    assert!(field.particles().is_empty());
    assert!(field.rings().is_empty());
}
