// End-to-end tests driving the playground through pointer events with
// recording collaborators.

mod common;

use common::{Log, RecordingHaptics, RecordingStatus, RecordingSurface, RecordingTone};
use glam::Vec2;
use joy_core::{Collaborators, Mode, Playground, Settings};
use std::f32::consts::TAU;

const VIEW: Vec2 = Vec2::new(800.0, 600.0);

struct Rig {
    pg: Playground,
    audio: Log,
    haptics: Log,
    status: Log,
}

fn rig_with(settings: Settings, audio_unavailable: bool) -> Rig {
    let (audio, haptics, status) = (Log::default(), Log::default(), Log::default());
    let devices = Collaborators {
        tone: Box::new(RecordingTone {
            log: audio.clone(),
            unavailable: audio_unavailable,
        }),
        haptics: Box::new(RecordingHaptics(haptics.clone())),
        status: Box::new(RecordingStatus(status.clone())),
    };
    Rig {
        pg: Playground::new(VIEW, settings, 7, devices),
        audio,
        haptics,
        status,
    }
}

fn rig(mode: Mode) -> Rig {
    rig_with(
        Settings {
            mode,
            ..Settings::default()
        },
        false,
    )
}

/// Drive a full stroke through `points`, 16 ms apart, starting at `t0`.
fn stroke(pg: &mut Playground, id: i32, points: &[Vec2], t0: f64) -> f64 {
    let mut t = t0;
    pg.pointer_down(id, points[0], t);
    for p in &points[1..] {
        t += 16.0;
        assert!(pg.pointer_move(id, *p, t));
    }
    t += 16.0;
    assert!(pg.pointer_up(id, t));
    t
}

#[test]
fn fireworks_tap_scores_four() {
    let mut r = rig(Mode::Fireworks);
    let p = Vec2::new(400.0, 300.0);
    r.pg.pointer_down(1, p, 1000.0);
    assert_eq!(r.pg.score().joy(), 1);
    assert!(r.pg.pointer_up(1, 1001.0));

    assert_eq!(r.pg.score().joy(), 4);
    assert!(r.pg.sessions().is_empty());
    // Down burst (26) plus release burst (20), each with a ring.
    assert_eq!(r.pg.field().particles().len(), 46);
    assert_eq!(r.pg.field().rings().len(), 2);
    assert!(r.status.any("Tap pop."));
    assert_eq!(r.haptics.entries(), vec!["vibrate [12]", "vibrate [14, 18, 12]"]);
    // One down tone plus a three-note chord.
    assert_eq!(r.audio.count("tone"), 4);
}

#[test]
fn fireworks_drag_scales_the_release() {
    let mut r = rig(Mode::Fireworks);
    let points: Vec<Vec2> = (0..20).map(|i| Vec2::new(100.0 + i as f32 * 20.0, 300.0)).collect();
    stroke(&mut r.pg, 3, &points, 0.0);
    assert!(r.status.any("Drag wave 380px."));
    assert!(r.haptics.any("[24, 12, 30]"));
}

#[test]
fn moves_without_a_session_are_ignored() {
    let mut r = rig(Mode::Fireworks);
    assert!(!r.pg.pointer_move(9, Vec2::ONE, 0.0));
    assert!(!r.pg.pointer_up(9, 0.0));
    assert!(!r.pg.pointer_cancel(9, 0.0));
    assert_eq!(r.pg.score().joy(), 0);
}

#[test]
fn cancel_behaves_like_release() {
    let mut r = rig(Mode::Fireworks);
    r.pg.pointer_down(4, Vec2::new(10.0, 10.0), 0.0);
    assert!(r.pg.pointer_cancel(4, 5.0));
    assert!(r.pg.sessions().is_empty());
    assert_eq!(r.pg.score().joy(), 4);
}

#[test]
fn duplicate_down_closes_the_stale_session() {
    let mut r = rig(Mode::Fireworks);
    r.pg.pointer_down(1, Vec2::new(10.0, 10.0), 0.0);
    r.pg.pointer_down(1, Vec2::new(50.0, 50.0), 10.0);
    assert_eq!(r.pg.sessions().len(), 1);
    assert!(r.status.any("Tap pop."));
    assert_eq!(r.pg.sessions().get(1).map(|s| s.pos), Some(Vec2::new(50.0, 50.0)));
}

#[test]
fn pointers_are_independent() {
    let mut r = rig(Mode::Fireworks);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    r.pg.pointer_down(2, Vec2::new(500.0, 400.0), 1.0);
    assert_eq!(r.pg.sessions().len(), 2);
    r.pg.pointer_move(1, Vec2::new(140.0, 100.0), 20.0);
    assert_eq!(r.pg.sessions().get(2).map(|s| s.drag_distance), Some(0.0));
    assert_eq!(r.pg.sessions().get(1).map(|s| s.drag_distance), Some(40.0));
    r.pg.pointer_up(2, 30.0);
    assert_eq!(r.pg.sessions().len(), 1);
}

#[test]
fn mode_is_frozen_at_pointer_down() {
    let mut r = rig(Mode::Fireworks);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    assert_eq!(r.pg.cycle_mode(), Mode::Bubbles);
    assert_eq!(r.pg.sessions().get(1).map(|s| s.mode), Some(Mode::Fireworks));
    r.pg.pointer_up(1, 10.0);
    assert!(r.status.any("Tap pop."));
    assert!(r.pg.field().bubbles().is_empty());
}

#[test]
fn cycle_mode_wraps_and_persists() {
    let mut r = rig(Mode::Fireworks);
    assert!(!r.pg.take_settings_changed());
    assert_eq!(r.pg.cycle_mode(), Mode::Bubbles);
    assert!(r.status.any("Mode: Bubbles."));
    assert_eq!(r.pg.cycle_mode(), Mode::Ribbons);
    assert_eq!(r.pg.cycle_mode(), Mode::Fireworks);
    assert_eq!(r.pg.settings().mode, Mode::Fireworks);
    assert!(r.pg.take_settings_changed());
    assert!(!r.pg.take_settings_changed());
}

#[test]
fn bubbles_down_then_release_pops_the_cluster() {
    let mut r = rig(Mode::Bubbles);
    let p = Vec2::new(300.0, 300.0);
    r.pg.pointer_down(1, p, 0.0);
    assert_eq!(r.pg.field().bubbles().len(), 6);
    assert_eq!(r.pg.score().joy(), 2);

    r.pg.pointer_up(1, 10.0);
    assert!(r.pg.field().bubbles().is_empty());
    assert!(r.status.any("Bubble pop x6."));
    // +2 at combo 1, then (5 + 6) at combo 1 again.
    assert_eq!(r.pg.score().joy(), 13);
}

#[test]
fn bubbles_release_far_away_is_a_miss() {
    let mut r = rig(Mode::Bubbles);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    r.pg.pointer_up(1, 5.0);
    r.pg.pointer_down(2, Vec2::new(100.0, 100.0), 5000.0);
    // Move far away from the new cluster, then release.
    r.pg.pointer_move(2, Vec2::new(700.0, 550.0), 5100.0);
    r.pg.pointer_up(2, 5200.0);
    assert!(r.status.any("No pop. Try a bigger swipe."));
    assert_eq!(r.pg.field().bubbles().len(), 6);
}

#[test]
fn bubbles_wand_pulls_nearby_bubbles() {
    let mut r = rig(Mode::Bubbles);
    r.pg.pointer_down(1, Vec2::new(400.0, 300.0), 0.0);
    let before: Vec<Vec2> = r.pg.field().bubbles().iter().map(|b| b.vel).collect();
    r.pg.pointer_move(1, Vec2::new(402.0, 300.0), 200.0);
    let after: Vec<Vec2> = r.pg.field().bubbles().iter().map(|b| b.vel).collect();
    assert_eq!(before.len(), after.len());
    assert_ne!(before, after);
}

fn circle_points(center: Vec2, diameter: f32, samples: usize) -> Vec<Vec2> {
    (0..samples)
        .map(|i| center + Vec2::from_angle(TAU * i as f32 / samples as f32) * diameter * 0.5)
        .collect()
}

#[test]
fn ribbon_loop_earns_the_loop_bonus() {
    let mut r = rig(Mode::Ribbons);
    let points = circle_points(Vec2::new(400.0, 300.0), 160.0, 40);
    stroke(&mut r.pg, 1, &points, 0.0);
    assert!(r.status.any("Loop bonus!"));
    assert_eq!(r.pg.field().ribbons().len(), 1);
    assert!(r.haptics.any("[18, 18, 24]"));
}

#[test]
fn ribbon_zigzag_earns_the_zigzag_bonus() {
    let mut r = rig(Mode::Ribbons);
    let points: Vec<Vec2> = (0..40)
        .map(|i| {
            let x = 200.0 + 150.0 * i as f32 / 39.0;
            let y = if i % 2 == 0 { 200.0 } else { 350.0 };
            Vec2::new(x, y)
        })
        .collect();
    stroke(&mut r.pg, 1, &points, 0.0);
    assert!(r.status.any("Zigzag bonus!"));
    assert!(r.haptics.any("[12, 12, 12, 12]"));
}

#[test]
fn ribbon_plain_stroke_is_released() {
    let mut r = rig(Mode::Ribbons);
    let points: Vec<Vec2> = (0..20).map(|i| Vec2::new(100.0 + i as f32 * 10.0, 300.0)).collect();
    stroke(&mut r.pg, 1, &points, 0.0);
    assert!(r.status.any("Ribbon released."));
    let ribbon = r.pg.field().ribbons().get(0).expect("stored ribbon");
    assert_eq!(ribbon.points.len(), 20);
    assert!((ribbon.width - 7.8).abs() < 1e-5);
}

#[test]
fn ribbon_tap_is_tiny() {
    let mut r = rig(Mode::Ribbons);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    r.pg.pointer_move(1, Vec2::new(101.0, 100.0), 20.0);
    r.pg.pointer_up(1, 40.0);
    assert!(r.status.any("Tiny ribbon tap."));
    assert!(r.pg.field().ribbons().is_empty());
}

#[test]
fn ribbon_path_ignores_jitter() {
    let mut r = rig(Mode::Ribbons);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    for i in 1..10 {
        r.pg.pointer_move(1, Vec2::new(100.0 + i as f32 * 0.2, 100.0), i as f64 * 10.0);
    }
    assert_eq!(r.pg.sessions().get(1).map(|s| s.path().len()), Some(1));
}

#[test]
fn unavailable_audio_turns_sound_off_once() {
    let mut r = rig_with(Settings::default(), true);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    assert!(!r.pg.settings().sound_enabled);
    assert!(r.pg.take_settings_changed());
    assert_eq!(
        r.status.entries().iter().filter(|e| e.contains("Audio not supported")).count(),
        1
    );
    // The simulation keeps running.
    assert_eq!(r.pg.field().particles().len(), 26);
    r.pg.pointer_up(1, 10.0);
    assert_eq!(r.pg.score().joy(), 4);
    assert_eq!(r.audio.len(), 0);

    assert!(!r.pg.toggle_sound());
    assert_eq!(r.status.last().as_deref(), Some("Audio not supported in this browser."));
}

#[test]
fn muted_and_still_settings_reach_no_device() {
    let settings = Settings {
        sound_enabled: false,
        haptic_enabled: false,
        ..Settings::default()
    };
    let mut r = rig_with(settings, false);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    r.pg.pointer_up(1, 10.0);
    assert_eq!(r.audio.len(), 0);
    assert_eq!(r.haptics.len(), 0);

    assert!(r.pg.toggle_sound());
    assert!(r.status.any("Sound on."));
    assert_eq!(r.audio.count("tone"), 1);
    assert!(r.pg.toggle_haptics());
    assert_eq!(r.haptics.entries(), vec!["vibrate [10, 10, 10]"]);
}

#[test]
fn intensity_scales_tone_volume_and_is_clamped() {
    let mut r = rig(Mode::Fireworks);
    assert_eq!(r.pg.set_intensity(0.5), 0.5);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    assert!(r.audio.any("vol=0.0300"));

    for _ in 0..20 {
        r.pg.nudge_intensity(1);
    }
    assert!((r.pg.settings().intensity - 1.6).abs() < 1e-6);
    assert_eq!(r.status.last().as_deref(), Some("Intensity 1.6x"));
    for _ in 0..20 {
        r.pg.nudge_intensity(-1);
    }
    assert!((r.pg.field().intensity() - 0.3).abs() < 1e-6);
}

#[test]
fn party_scores_and_bursts() {
    let mut r = rig(Mode::Fireworks);
    r.pg.party(0.0);
    assert_eq!(r.pg.score().joy(), 6);
    assert_eq!(r.pg.field().particles().len(), 120);
}

#[test]
fn sustained_play_celebrates() {
    let mut r = rig(Mode::Fireworks);
    let mut t = 0.0;
    for _ in 0..12 {
        let points: Vec<Vec2> = (0..15).map(|i| Vec2::new(100.0 + i as f32 * 25.0, 300.0)).collect();
        t = stroke(&mut r.pg, 1, &points, t) + 20.0;
    }
    assert!(r.pg.score().joy() >= 160);
    assert!(r.status.any("PARTY x"));
    assert!(r.pg.score().state().next_threshold > 160);
}

#[test]
fn frame_renders_glows_and_live_ribbons() {
    let mut r = rig(Mode::Ribbons);
    r.pg.pointer_down(1, Vec2::new(100.0, 100.0), 0.0);
    for i in 1..6 {
        r.pg.pointer_move(1, Vec2::new(100.0 + i as f32 * 10.0, 100.0), i as f64 * 16.0);
    }
    let mut surface = RecordingSurface::default();
    r.pg.frame(100.0, &mut surface);
    assert_eq!(r.pg.frames(), 1);
    assert_eq!(surface.count("path"), 1);
    // Four background glows plus one pointer glow.
    assert_eq!(surface.count("radial"), 5);
}

#[test]
fn resize_moves_the_bounds() {
    let mut r = rig(Mode::Fireworks);
    r.pg.resize(Vec2::new(200.0, 100.0));
    assert_eq!(r.pg.field().viewport(), Vec2::new(200.0, 100.0));
    assert_eq!(r.pg.status_text(), "Resized.");
    r.pg.seed_ambient();
    assert!(r
        .pg
        .field()
        .particles()
        .iter()
        .all(|p| p.pos.x <= 200.0 && p.pos.y <= 100.0));
}

/// Wiggle 6 px either side of each point, 8 ms per move. Returns the last time.
fn wiggle_over(pg: &mut Playground, id: i32, targets: &[Vec2], t0: f64) -> f64 {
    let mut t = t0;
    for target in targets {
        for i in 0..8 {
            t += 8.0;
            let side = if i % 2 == 0 { 6.0 } else { -6.0 };
            assert!(pg.pointer_move(id, *target + Vec2::new(side, 0.0), t));
        }
    }
    t
}

#[test]
fn fast_swipes_slice_bubbles_until_they_pop() {
    let center = Vec2::new(200.0, 200.0);

    let mut sliced = rig(Mode::Bubbles);
    sliced.pg.pointer_down(1, center, 0.0);
    let targets: Vec<Vec2> = sliced.pg.field().bubbles().iter().map(|b| b.pos).collect();
    assert_eq!(targets.len(), 6);
    wiggle_over(&mut sliced.pg, 1, &targets, 0.0);

    assert!(sliced.pg.field().bubbles().is_empty());
    assert_eq!(sliced.haptics.count("vibrate [6]"), 6);
    // One noise for the cluster, one per slice pop.
    assert_eq!(sliced.audio.count("noise"), 7);

    // The same number of moves far from the cluster never slices anything.
    let mut plain = rig(Mode::Bubbles);
    plain.pg.pointer_down(1, center, 0.0);
    let far = vec![Vec2::new(600.0, 500.0); targets.len()];
    wiggle_over(&mut plain.pg, 1, &far, 0.0);
    assert_eq!(plain.pg.field().bubbles().len(), 6);
    assert_eq!(plain.haptics.count("vibrate [6]"), 0);

    // Every pop is worth at least +4 on top of the per-move points.
    assert!(sliced.pg.score().joy() >= plain.pg.score().joy() + 4 * 6);
}

#[test]
fn slow_moves_never_slice() {
    let mut r = rig(Mode::Bubbles);
    let center = Vec2::new(200.0, 200.0);
    r.pg.pointer_down(1, center, 0.0);
    let target = r.pg.field().bubbles().iter().next().map(|b| b.pos).unwrap();
    // 1 px every 100 ms stays far below the slicing speed.
    for i in 1..=10 {
        let side = if i % 2 == 0 { 0.5 } else { -0.5 };
        r.pg.pointer_move(1, target + Vec2::new(side, 0.0), i as f64 * 100.0);
    }
    assert_eq!(r.pg.field().bubbles().len(), 6);
    assert_eq!(r.haptics.count("vibrate [6]"), 0);
}

#[test]
fn move_effects_are_gated_by_their_cooldowns() {
    let mut r = rig(Mode::Fireworks);
    let p = Vec2::new(400.0, 300.0);
    r.pg.pointer_down(1, p, 0.0);
    assert_eq!(r.pg.field().particles().len(), 26);
    assert_eq!(r.audio.count("tone"), 1);

    // First move fires the trail, tone and haptic tick.
    r.pg.pointer_move(1, p + Vec2::new(10.0, 0.0), 20.0);
    assert_eq!(r.pg.field().particles().len(), 31);
    assert_eq!(r.audio.count("tone"), 2);
    assert_eq!(r.haptics.count("vibrate [4]"), 1);

    // 10 ms later: inside every cooldown.
    r.pg.pointer_move(1, p + Vec2::new(20.0, 0.0), 30.0);
    assert_eq!(r.pg.field().particles().len(), 31);
    assert_eq!(r.audio.count("tone"), 2);

    // 16 ms after the first trail: trail again, tone still cooling down.
    r.pg.pointer_move(1, p + Vec2::new(30.0, 0.0), 36.0);
    assert_eq!(r.pg.field().particles().len(), 36);
    assert_eq!(r.audio.count("tone"), 2);

    // Past the 58 ms tone cooldown, still inside the 120 ms haptic one.
    r.pg.pointer_move(1, p + Vec2::new(40.0, 0.0), 80.0);
    assert_eq!(r.audio.count("tone"), 3);
    assert_eq!(r.haptics.count("vibrate [4]"), 1);

    // Every move scored regardless of the cooldowns: x1, x1, x2, x3, x4.
    assert_eq!(r.pg.score().joy(), 1 + 1 + 2 + 3 + 4);
}
