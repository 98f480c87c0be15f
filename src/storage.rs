use joy_core::{Settings, STORAGE_KEY};
use web_sys as web;

fn local_storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Stored settings, or the defaults when storage is empty or blocked.
pub fn load() -> Settings {
    match local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
        Some(raw) => Settings::from_json_lenient(&raw),
        None => Settings::default(),
    }
}

pub fn save(settings: &Settings) {
    let Some(storage) = local_storage() else {
        return;
    };
    match settings.to_json() {
        Ok(json) => {
            if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
                log::warn!("[settings] could not save: {:?}", e);
            }
        }
        Err(e) => log::warn!("[settings] could not encode: {}", e),
    }
}
