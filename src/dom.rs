use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Backing-store scale is capped so large HiDPI screens stay cheap to fill.
const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has the wrong element type: {:?}", id, e))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Attach a long-lived listener for `event` on `target`.
pub fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_pressed(document: &web::Document, id: &str, pressed: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
    }
}

/// Match the canvas backing store to its CSS box times the device pixel
/// ratio. Returns the CSS size and the ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (Vec2, f64) {
    let dpr = web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .clamp(1.0, MAX_DEVICE_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr).round() as u32;
    let h_px = (rect.height() * dpr).round() as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    (Vec2::new(rect.width() as f32, rect.height() as f32), dpr)
}
