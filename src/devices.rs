use joy_core::{HapticDevice, StatusDisplay};
use wasm_bindgen::JsValue;
use web_sys as web;

/// Vibration through `navigator.vibrate`, silently absent where unsupported.
pub struct Vibrator {
    navigator: Option<web::Navigator>,
}

impl Vibrator {
    pub fn new() -> Self {
        let navigator = web::window()
            .map(|w| w.navigator())
            .filter(|n| js_sys::Reflect::has(n, &JsValue::from_str("vibrate")).unwrap_or(false));
        if navigator.is_none() {
            log::info!("[haptics] vibration not supported");
        }
        Self { navigator }
    }
}

impl HapticDevice for Vibrator {
    fn vibrate(&mut self, pattern: &[u32]) {
        let Some(nav) = self.navigator.as_ref() else {
            return;
        };
        let arr = js_sys::Array::new();
        for ms in pattern {
            arr.push(&JsValue::from(*ms));
        }
        let _ = nav.vibrate_with_pattern(&arr);
    }
}

/// Writes status lines into the live region element.
pub struct StatusLabel {
    el: Option<web::Element>,
}

impl StatusLabel {
    pub fn new(document: &web::Document, id: &str) -> Self {
        Self {
            el: document.get_element_by_id(id),
        }
    }
}

impl StatusDisplay for StatusLabel {
    fn show(&mut self, text: &str) {
        if let Some(el) = self.el.as_ref() {
            el.set_text_content(Some(text));
        }
    }
}
