use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, Window};

use crate::viewport::sections::{SectionId, SectionLayout};

/// Window `scroll` listener that is removed again when dropped.
pub struct ScrollListener {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl ScrollListener {
    pub fn attach(window: &Window, handler: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            callback,
        })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("scroll", self.callback.as_ref().unchecked_ref())
        {
            warn!("failed to remove scroll listener: {:?}", e);
        }
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or_else(|e| {
        warn!("scroll offset unavailable: {:?}", e);
        0.0
    })
}

/// Section geometry read from `getBoundingClientRect` of each anchor.
pub struct DocumentSections {
    document: Document,
}

impl DocumentSections {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl SectionLayout for DocumentSections {
    fn bounds(&self, id: SectionId) -> Option<(f64, f64)> {
        let element = self.document.get_element_by_id(id.anchor())?;
        let rect = element.get_bounding_client_rect();
        Some((rect.top(), rect.bottom()))
    }
}

pub fn scroll_to_section(id: SectionId) {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id.anchor()))
    else {
        warn!("no anchor #{} to scroll to", id.anchor());
        return;
    };

    let mut options = ScrollIntoViewOptions::new();
    options.behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
