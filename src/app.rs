use crate::canvas::CanvasSurface;
use crate::controls;
use crate::storage;
use joy_core::Playground;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything the event closures and the frame loop share.
pub struct App {
    pub playground: Playground,
    pub surface: CanvasSurface,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    /// Persist and redraw the controls after anything that may have
    /// changed the settings.
    pub fn sync(&mut self) {
        if self.playground.take_settings_changed() {
            let settings = self.playground.settings();
            storage::save(settings);
            controls::render(&self.document, settings);
        }
    }
}
