use joy_core::Playground;

/// Keyboard shortcuts, keyed by `KeyboardEvent.code`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    CycleMode,
    ToggleSound,
    ToggleHaptics,
    Party,
    IntensityUp,
    IntensityDown,
}

#[inline]
pub fn command_for_code(code: &str) -> Option<Command> {
    match code {
        "KeyM" => Some(Command::CycleMode),
        "KeyS" => Some(Command::ToggleSound),
        "KeyV" => Some(Command::ToggleHaptics),
        "Space" => Some(Command::Party),
        "ArrowUp" => Some(Command::IntensityUp),
        "ArrowDown" => Some(Command::IntensityDown),
        _ => None,
    }
}

pub fn apply(cmd: Command, playground: &mut Playground, now_ms: f64) {
    match cmd {
        Command::CycleMode => {
            playground.cycle_mode();
        }
        Command::ToggleSound => {
            playground.toggle_sound();
        }
        Command::ToggleHaptics => {
            playground.toggle_haptics();
        }
        Command::Party => playground.party(now_ms),
        Command::IntensityUp => {
            playground.nudge_intensity(1);
        }
        Command::IntensityDown => {
            playground.nudge_intensity(-1);
        }
    }
}
