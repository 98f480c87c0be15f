//! User preferences and their JSON form.
//!
//! Loading never fails: anything malformed falls back to the defaults, one
//! field at a time.

use crate::constants::{INTENSITY_DEFAULT, INTENSITY_MAX, INTENSITY_MIN};
use crate::modes::Mode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const STORAGE_KEY: &str = "joy_playground_settings_v1";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings JSON is not an object")]
    NotAnObject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(rename = "modeId")]
    pub mode: Mode,
    pub intensity: f32,
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Fireworks,
            intensity: INTENSITY_DEFAULT,
            sound_enabled: true,
            haptic_enabled: true,
        }
    }
}

impl Settings {
    /// Parse stored settings, keeping the default for every field that is
    /// missing, mistyped or unknown.
    pub fn from_json_lenient(raw: &str) -> Self {
        match Self::merge_json(raw) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[settings] ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    fn merge_json(raw: &str) -> Result<Self, SettingsError> {
        let value: Value = serde_json::from_str(raw)?;
        let obj = value.as_object().ok_or(SettingsError::NotAnObject)?;
        let mut s = Self::default();
        if let Some(mode) = obj.get("modeId").and_then(Value::as_str).and_then(Mode::from_id) {
            s.mode = mode;
        }
        if let Some(v) = obj.get("intensity").and_then(Value::as_f64) {
            s.set_intensity(v as f32);
        }
        if let Some(v) = obj.get("soundEnabled").and_then(Value::as_bool) {
            s.sound_enabled = v;
        }
        if let Some(v) = obj.get("hapticEnabled").and_then(Value::as_bool) {
            s.haptic_enabled = v;
        }
        Ok(s)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Clamp into the supported range; non-finite input keeps the current value.
    pub fn set_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.intensity = intensity.clamp(INTENSITY_MIN, INTENSITY_MAX);
        }
    }
}
