//! Pitch helpers shared by the tone-producing modes.

/// Minor pentatonic degrees in semitones above the root.
pub const PENTATONIC: &[i32] = &[0, 3, 5, 7, 10];
pub const PITCH_ROOT_MIDI: i32 = 57; // A3
pub const PITCH_OCTAVES: usize = 3;

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

/// Scale step (0 = lowest) for a vertical position; the bottom of the
/// surface maps to step 0 and the top to the highest of the three octaves.
pub fn scale_step_for_y(y: f32, height: f32) -> usize {
    let t = (1.0 - y / height.max(1.0)).clamp(0.0, 0.999);
    let steps = PENTATONIC.len() * PITCH_OCTAVES;
    ((t * steps as f32).floor() as usize).min(steps - 1)
}

pub fn scale_step_to_midi(step: usize) -> i32 {
    let octave = (step / PENTATONIC.len()) as i32;
    let degree = PENTATONIC[step % PENTATONIC.len()];
    PITCH_ROOT_MIDI + octave * 12 + degree
}

#[inline]
pub fn quantize_y_to_hz(y: f32, height: f32) -> f32 {
    midi_to_hz(scale_step_to_midi(scale_step_for_y(y, height)) as f32)
}
