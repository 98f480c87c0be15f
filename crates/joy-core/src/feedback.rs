//! Contracts for the audio, haptic and status collaborators, and the gate
//! that routes effect requests to them according to the user's toggles.
//!
//! Every call is fire-and-forget. A tone engine that reports
//! [`FeedbackError::AudioUnavailable`] is switched off for the rest of the
//! session; haptics and status text never report failure at all.

use crate::constants::{INTENSITY_DEFAULT, INTENSITY_MAX, INTENSITY_MIN};
use thiserror::Error;

/// Basic oscillator shape used by the synth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

/// One enveloped oscillator note.
///
/// `glide_hz` bends the pitch by that many Hz over the note; `cutoff_hz` is
/// the lowpass corner. `volume` is already scaled by intensity when it
/// reaches a [`ToneEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_sec: f32,
    pub waveform: Waveform,
    pub volume: f32,
    pub glide_hz: f32,
    pub cutoff_hz: f32,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency_hz: 440.0,
            duration_sec: 0.11,
            waveform: Waveform::Triangle,
            volume: 0.05,
            glide_hz: 0.0,
            cutoff_hz: 3200.0,
        }
    }
}

/// Band-limited noise burst used for pops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseBurst {
    pub duration_sec: f32,
    pub volume: f32,
    pub highpass_hz: f32,
    pub lowpass_hz: f32,
    pub playback_rate: f32,
}

impl Default for NoiseBurst {
    fn default() -> Self {
        Self {
            duration_sec: 0.055,
            volume: 0.045,
            highpass_hz: 800.0,
            lowpass_hz: 5200.0,
            playback_rate: 1.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("audio output is unavailable: {0}")]
    AudioUnavailable(String),
}

/// Frequency ratios of the celebratory chord.
pub const CHORD_RATIOS: [f32; 3] = [1.0, 1.25, 1.5];

/// The three staggered notes of a chord on `root_hz`, at unscaled volume.
pub fn chord_tones(root_hz: f32) -> [Tone; 3] {
    [
        Tone {
            frequency_hz: root_hz * CHORD_RATIOS[0],
            duration_sec: 0.14,
            waveform: Waveform::Triangle,
            volume: 0.055,
            glide_hz: 16.0,
            cutoff_hz: 2800.0,
        },
        Tone {
            frequency_hz: root_hz * CHORD_RATIOS[1],
            duration_sec: 0.18,
            waveform: Waveform::Sine,
            volume: 0.04,
            glide_hz: -10.0,
            cutoff_hz: 2400.0,
        },
        Tone {
            frequency_hz: root_hz * CHORD_RATIOS[2],
            duration_sec: 0.2,
            waveform: Waveform::Square,
            volume: 0.028,
            glide_hz: -18.0,
            cutoff_hz: 1900.0,
        },
    ]
}

pub trait ToneEngine {
    fn play_tone(&mut self, tone: &Tone) -> Result<(), FeedbackError>;

    fn play_noise_burst(&mut self, noise: &NoiseBurst) -> Result<(), FeedbackError>;

    /// Root, major third and fifth with staggered decay. `volume_scale` is
    /// the caller's intensity factor.
    fn play_chord(&mut self, root_hz: f32, volume_scale: f32) -> Result<(), FeedbackError> {
        for mut tone in chord_tones(root_hz) {
            tone.volume *= volume_scale;
            self.play_tone(&tone)?;
        }
        Ok(())
    }
}

pub trait HapticDevice {
    /// Alternating on/off durations in milliseconds; a single entry is one pulse.
    fn vibrate(&mut self, pattern: &[u32]);
}

pub trait StatusDisplay {
    fn show(&mut self, text: &str);
}

/// No-op collaborator for every contract; stands in when a device is absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl ToneEngine for Silent {
    fn play_tone(&mut self, _tone: &Tone) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn play_noise_burst(&mut self, _noise: &NoiseBurst) -> Result<(), FeedbackError> {
        Ok(())
    }
}

impl HapticDevice for Silent {
    fn vibrate(&mut self, _pattern: &[u32]) {}
}

impl StatusDisplay for Silent {
    fn show(&mut self, _text: &str) {}
}

pub struct Feedback {
    tone: Box<dyn ToneEngine>,
    haptics: Box<dyn HapticDevice>,
    sound_enabled: bool,
    haptics_enabled: bool,
    audio_failed: bool,
    pending_notice: Option<String>,
    intensity: f32,
}

impl Feedback {
    pub fn new(tone: Box<dyn ToneEngine>, haptics: Box<dyn HapticDevice>) -> Self {
        Self {
            tone,
            haptics,
            sound_enabled: true,
            haptics_enabled: true,
            audio_failed: false,
            pending_notice: None,
            intensity: INTENSITY_DEFAULT,
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(INTENSITY_MIN, INTENSITY_MAX);
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn set_haptics_enabled(&mut self, enabled: bool) {
        self.haptics_enabled = enabled;
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn haptics_enabled(&self) -> bool {
        self.haptics_enabled
    }

    /// False once the tone engine has reported the platform has no audio.
    pub fn audio_available(&self) -> bool {
        !self.audio_failed
    }

    /// One-shot user-facing message produced when audio was switched off.
    pub fn take_notice(&mut self) -> Option<String> {
        self.pending_notice.take()
    }

    fn audio_live(&self) -> bool {
        self.sound_enabled && !self.audio_failed
    }

    pub fn tone(&mut self, tone: Tone) {
        if !self.audio_live() {
            return;
        }
        let scaled = Tone {
            volume: tone.volume * self.intensity,
            ..tone
        };
        let result = self.tone.play_tone(&scaled);
        self.handle(result);
    }

    pub fn chord(&mut self, root_hz: f32) {
        if !self.audio_live() {
            return;
        }
        let result = self.tone.play_chord(root_hz, self.intensity);
        self.handle(result);
    }

    pub fn noise(&mut self, noise: NoiseBurst) {
        if !self.audio_live() {
            return;
        }
        let scaled = NoiseBurst {
            volume: noise.volume * self.intensity,
            ..noise
        };
        let result = self.tone.play_noise_burst(&scaled);
        self.handle(result);
    }

    pub fn vibrate(&mut self, pattern: &[u32]) {
        if self.haptics_enabled && !pattern.is_empty() {
            self.haptics.vibrate(pattern);
        }
    }

    fn handle(&mut self, result: Result<(), FeedbackError>) {
        if let Err(e) = result {
            match e {
                FeedbackError::AudioUnavailable(reason) => {
                    log::warn!("[audio] disabled for this session: {}", reason);
                    self.audio_failed = true;
                    self.sound_enabled = false;
                    self.pending_notice = Some("Audio not supported in this browser.".to_string());
                }
            }
        }
    }
}
