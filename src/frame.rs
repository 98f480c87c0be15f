use crate::app::SharedApp;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn request_frame(f: &Closure<dyn FnMut()>) {
    if let Some(w) = web::window() {
        if let Err(e) = w.request_animation_frame(f.as_ref().unchecked_ref()) {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// Drive `Playground::frame` from requestAnimationFrame for the page lifetime.
pub fn start_loop(app: SharedApp) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let mut guard = app.borrow_mut();
            let app = &mut *guard;
            app.playground.frame(instant::now(), &mut app.surface);
        }
        if let Some(cb) = f.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut()>));
    if let Some(cb) = g.borrow().as_ref() {
        request_frame(cb);
    };
}
