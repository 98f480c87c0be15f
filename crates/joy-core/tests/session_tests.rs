// Tests for pointer session tracking and the session table.

use glam::Vec2;
use joy_core::constants::RIBBON_PATH_CAP;
use joy_core::session::Cooldown;
use joy_core::{Mode, PointerSession, SessionTable};

fn session(id: i32) -> PointerSession {
    PointerSession::new(id, Vec2::ZERO, 0.0, Mode::Ribbons, 120.0, 3.0)
}

#[test]
fn advance_accumulates_distance_and_returns_delta() {
    let mut s = session(1);
    let d = s.advance(Vec2::new(3.0, 4.0), 20.0);
    assert_eq!(d, Vec2::new(3.0, 4.0));
    s.advance(Vec2::new(3.0, 10.0), 40.0);
    assert_eq!(s.drag_distance, 11.0);
    assert_eq!(s.prev_pos, Vec2::new(3.0, 4.0));
    assert_eq!(s.pos, Vec2::new(3.0, 10.0));
}

#[test]
fn zero_elapsed_time_is_floored() {
    let mut s = session(1);
    s.advance(Vec2::new(8.0, 0.0), 0.0);
    // 8 units over the 8 ms floor, smoothed by 0.35.
    assert!((s.speed - 0.35).abs() < 1e-6);
    assert!(s.speed.is_finite());
}

#[test]
fn non_finite_positions_are_ignored() {
    let mut s = session(1);
    let d = s.advance(Vec2::new(f32::NAN, 1.0), 10.0);
    assert_eq!(d, Vec2::ZERO);
    assert_eq!(s.drag_distance, 0.0);
}

#[test]
fn path_skips_points_closer_than_spacing() {
    let mut s = session(1);
    assert!(s.record_point(Vec2::ZERO, 0.0));
    assert!(!s.record_point(Vec2::new(2.0, 0.0), 1.0));
    assert!(s.record_point(Vec2::new(3.0, 0.0), 2.0));
    assert_eq!(s.path().len(), 2);
}

#[test]
fn path_keeps_the_latest_samples() {
    let mut s = session(1);
    for i in 0..(RIBBON_PATH_CAP + 30) {
        s.record_point(Vec2::new(i as f32 * 4.0, 0.0), i as f64);
    }
    assert_eq!(s.path().len(), RIBBON_PATH_CAP);
    assert_eq!(s.path()[0].pos.x, 30.0 * 4.0);
    assert_eq!(s.path_points().len(), RIBBON_PATH_CAP);
}

#[test]
fn cooldown_fires_once_per_interval() {
    let mut c = Cooldown::default();
    assert!(c.ready(0.0, 14.0));
    assert!(!c.ready(10.0, 14.0));
    assert!(!c.ready(14.0, 14.0));
    assert!(c.ready(15.0, 14.0));
    assert!(!c.ready(20.0, 14.0));
}

#[test]
fn table_tracks_pressed_pointers_only() {
    let mut table = SessionTable::new();
    assert!(table.insert(session(1)).is_none());
    assert!(table.insert(session(2)).is_none());
    assert_eq!(table.len(), 2);
    assert!(table.contains(1));

    let replaced = table.insert(session(1));
    assert!(replaced.is_some());
    assert_eq!(table.len(), 2);

    assert!(table.remove(1).is_some());
    assert!(table.remove(1).is_none());
    assert!(!table.contains(1));
    assert_eq!(table.iter().count(), 1);

    if let Some(s) = table.get_mut(2) {
        s.hue = 10.0;
    }
    assert_eq!(table.get(2).map(|s| s.hue), Some(10.0));
    table.remove(2);
    assert!(table.is_empty());
}
