use crate::dom;
use joy_core::Settings;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CANVAS_ID: &str = "joy-canvas";
pub const STATUS_ID: &str = "status";
pub const MODE_BUTTON_ID: &str = "mode-toggle";
pub const SOUND_BUTTON_ID: &str = "sound-toggle";
pub const HAPTIC_BUTTON_ID: &str = "haptic-toggle";
pub const INTENSITY_SLIDER_ID: &str = "intensity";

/// Mirror the settings into the button labels and the slider.
pub fn render(document: &web::Document, settings: &Settings) {
    dom::set_text(document, MODE_BUTTON_ID, &format!("MODE: {}", settings.mode.label()));
    dom::set_pressed(document, SOUND_BUTTON_ID, settings.sound_enabled);
    dom::set_text(
        document,
        SOUND_BUTTON_ID,
        if settings.sound_enabled { "SOUND ON" } else { "SOUND OFF" },
    );
    dom::set_pressed(document, HAPTIC_BUTTON_ID, settings.haptic_enabled);
    dom::set_text(
        document,
        HAPTIC_BUTTON_ID,
        if settings.haptic_enabled { "VIBE ON" } else { "VIBE OFF" },
    );
    if let Some(slider) = document
        .get_element_by_id(INTENSITY_SLIDER_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        slider.set_value(&format!("{}", settings.intensity));
    }
}

pub fn slider_value(document: &web::Document) -> Option<f32> {
    document
        .get_element_by_id(INTENSITY_SLIDER_ID)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?
        .value()
        .parse()
        .ok()
}
