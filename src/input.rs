use crate::app::SharedApp;
use crate::controls;
use crate::dom;
use crate::keys;
use glam::Vec2;
use joy_core::PointerId;
use web_sys as web;

#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    )
}

fn pointer_id(ev: &web::PointerEvent) -> PointerId {
    ev.pointer_id()
}

pub fn wire_pointer_handlers(app: &SharedApp, canvas: &web::HtmlCanvasElement) {
    let target: &web::EventTarget = canvas.as_ref();

    let a = app.clone();
    dom::listen(target, "pointerdown", move |ev: web::PointerEvent| {
        ev.prevent_default();
        let mut app = a.borrow_mut();
        let _ = app.canvas.set_pointer_capture(ev.pointer_id());
        let pos = pointer_canvas_css(&ev, &app.canvas);
        app.playground.pointer_down(pointer_id(&ev), pos, instant::now());
        app.sync();
    });

    let a = app.clone();
    dom::listen(target, "pointermove", move |ev: web::PointerEvent| {
        let mut app = a.borrow_mut();
        let pos = pointer_canvas_css(&ev, &app.canvas);
        if app.playground.pointer_move(pointer_id(&ev), pos, instant::now()) {
            ev.prevent_default();
            app.sync();
        }
    });

    for event in ["pointerup", "pointercancel"] {
        let a = app.clone();
        dom::listen(target, event, move |ev: web::PointerEvent| {
            let mut app = a.borrow_mut();
            let id = pointer_id(&ev);
            let now = instant::now();
            let handled = if ev.type_() == "pointercancel" {
                app.playground.pointer_cancel(id, now)
            } else {
                app.playground.pointer_up(id, now)
            };
            if handled {
                ev.prevent_default();
                let _ = app.canvas.release_pointer_capture(ev.pointer_id());
                app.sync();
            }
        });
    }
}

pub fn wire_keyboard(app: &SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    let a = app.clone();
    dom::listen(window.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() && ev.code() != "ArrowUp" && ev.code() != "ArrowDown" {
            return;
        }
        let Some(cmd) = keys::command_for_code(&ev.code()) else {
            return;
        };
        ev.prevent_default();
        let mut app = a.borrow_mut();
        keys::apply(cmd, &mut app.playground, instant::now());
        app.sync();
    });
}

pub fn wire_controls(app: &SharedApp, document: &web::Document) {
    let a = app.clone();
    dom::add_click_listener(document, controls::MODE_BUTTON_ID, move || {
        let mut app = a.borrow_mut();
        app.playground.cycle_mode();
        app.sync();
    });

    let a = app.clone();
    dom::add_click_listener(document, controls::SOUND_BUTTON_ID, move || {
        let mut app = a.borrow_mut();
        app.playground.toggle_sound();
        app.sync();
    });

    let a = app.clone();
    dom::add_click_listener(document, controls::HAPTIC_BUTTON_ID, move || {
        let mut app = a.borrow_mut();
        app.playground.toggle_haptics();
        app.sync();
    });

    if let Some(slider) = document.get_element_by_id(controls::INTENSITY_SLIDER_ID) {
        let a = app.clone();
        dom::listen(slider.as_ref(), "input", move |_: web::Event| {
            let mut app = a.borrow_mut();
            let Some(v) = controls::slider_value(&app.document) else {
                return;
            };
            app.playground.set_intensity(v);
            app.sync();
        });
    }
}

pub fn wire_resize(app: &SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    let a = app.clone();
    dom::listen(window.as_ref(), "resize", move |_: web::Event| {
        let mut app = a.borrow_mut();
        let (size, dpr) = dom::sync_canvas_backing_size(&app.canvas);
        app.surface.set_pixel_ratio(dpr);
        app.playground.resize(size);
    });
}

/// Keep the canvas from scrolling or zooming the page under touch.
pub fn block_touch_gestures(canvas: &web::HtmlCanvasElement) {
    for event in ["touchstart", "touchmove"] {
        dom::listen(canvas.as_ref(), event, |ev: web::Event| {
            if ev.cancelable() {
                ev.prevent_default();
            }
        });
    }
    let _ = canvas.style().set_property("touch-action", "none");
}
