// Host-side tests for the keyboard shortcut table.
// The main crate is wasm-only, so the pure module is included directly.

mod keys {
    include!("../src/keys.rs");
}

use glam::Vec2;
use joy_core::{Collaborators, Mode, Playground, Settings};
use keys::{apply, command_for_code, Command};

fn playground() -> Playground {
    Playground::new(Vec2::new(800.0, 600.0), Settings::default(), 7, Collaborators::silent())
}

#[test]
fn codes_map_to_commands() {
    assert_eq!(command_for_code("KeyM"), Some(Command::CycleMode));
    assert_eq!(command_for_code("KeyS"), Some(Command::ToggleSound));
    assert_eq!(command_for_code("KeyV"), Some(Command::ToggleHaptics));
    assert_eq!(command_for_code("Space"), Some(Command::Party));
    assert_eq!(command_for_code("ArrowUp"), Some(Command::IntensityUp));
    assert_eq!(command_for_code("ArrowDown"), Some(Command::IntensityDown));
}

#[test]
fn unmapped_codes_are_ignored() {
    for code in ["KeyA", "Enter", "m", "", "ArrowLeft"] {
        assert_eq!(command_for_code(code), None, "code {:?}", code);
    }
}

#[test]
fn cycle_mode_walks_all_modes_and_marks_settings() {
    let mut p = playground();
    apply(Command::CycleMode, &mut p, 0.0);
    assert_eq!(p.mode(), Mode::Bubbles);
    assert!(p.take_settings_changed());
    apply(Command::CycleMode, &mut p, 10.0);
    apply(Command::CycleMode, &mut p, 20.0);
    assert_eq!(p.mode(), Mode::Fireworks);
}

#[test]
fn arrows_step_intensity_by_a_tenth() {
    let mut p = playground();
    apply(Command::IntensityUp, &mut p, 0.0);
    assert!((p.settings().intensity - 1.1).abs() < 1e-5);
    apply(Command::IntensityDown, &mut p, 0.0);
    apply(Command::IntensityDown, &mut p, 0.0);
    assert!((p.settings().intensity - 0.9).abs() < 1e-5);
    assert_eq!(p.status_text(), "Intensity 0.9x");
}

#[test]
fn toggles_flip_settings() {
    let mut p = playground();
    apply(Command::ToggleHaptics, &mut p, 0.0);
    assert!(!p.settings().haptic_enabled);
    apply(Command::ToggleSound, &mut p, 0.0);
    assert!(!p.settings().sound_enabled);
    assert_eq!(p.status_text(), "Sound off.");
}

#[test]
fn party_adds_joy() {
    let mut p = playground();
    apply(Command::Party, &mut p, 0.0);
    assert_eq!(p.score().joy(), 6);
}
