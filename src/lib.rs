//! Browser front-end: Canvas 2D drawing, WebAudio tones, vibration and the
//! DOM controls around a [`joy_core::Playground`].

#![cfg(target_arch = "wasm32")]

use joy_core::{Collaborators, Playground};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod app;
mod audio;
mod canvas;
mod controls;
mod devices;
mod dom;
mod frame;
mod input;
mod keys;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("joy-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element(&document, controls::CANVAS_ID)?;

    let settings = storage::load();
    controls::render(&document, &settings);

    let (size, dpr) = dom::sync_canvas_backing_size(&canvas);
    let surface = canvas::CanvasSurface::new(&canvas)?;
    surface.set_pixel_ratio(dpr);

    let collaborators = Collaborators {
        tone: Box::new(audio::WebAudio::new()),
        haptics: Box::new(devices::Vibrator::new()),
        status: Box::new(devices::StatusLabel::new(&document, controls::STATUS_ID)),
    };
    let seed: u64 = rand::random();
    let mut playground = Playground::new(size, settings, seed, collaborators);
    playground.seed_ambient();
    playground.announce("Ready. Click or drag.");

    let app: app::SharedApp = Rc::new(RefCell::new(app::App {
        playground,
        surface,
        canvas: canvas.clone(),
        document: document.clone(),
    }));

    input::block_touch_gestures(&canvas);
    input::wire_pointer_handlers(&app, &canvas);
    input::wire_keyboard(&app);
    input::wire_controls(&app, &document);
    input::wire_resize(&app);
    frame::start_loop(app);
    Ok(())
}
