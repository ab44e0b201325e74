use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::timer::TimeoutScheduler;
use crate::viewport::reveal::{ElementId, RevealController};
use crate::viewport::VISIBILITY_THRESHOLD;

const REVEAL_ID_ATTRIBUTE: &str = "data-reveal-id";

/// Observation is `None` when the browser has no IntersectionObserver.
pub type DomRevealController = RevealController<TimeoutScheduler, Option<Observation>>;

struct ObserverInner {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ObserverInner {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// One IntersectionObserver shared by every revealable element on the page,
/// forwarding enter signals to the reveal controller.
#[derive(Clone)]
pub struct VisibilityObserver {
    inner: Rc<ObserverInner>,
}

impl VisibilityObserver {
    pub fn new(controller: DomRevealController) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() || entry.intersection_ratio() < VISIBILITY_THRESHOLD {
                    continue;
                }
                match element_id(&entry.target()) {
                    Some(id) => controller.on_visibility_enter(id),
                    None => debug!("intersection for untracked element, ignored"),
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let mut options = IntersectionObserverInit::new();
        options.threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            inner: Rc::new(ObserverInner {
                observer,
                _callback: callback,
            }),
        })
    }

    pub fn observe(&self, element: &Element, id: ElementId) -> Observation {
        if let Err(e) = element.set_attribute(REVEAL_ID_ATTRIBUTE, &id.to_string()) {
            warn!("could not tag element {}: {:?}", id, e);
        }
        self.inner.observer.observe(element);
        Observation {
            observer: self.inner.observer.clone(),
            element: element.clone(),
        }
    }
}

/// Stops observing its element when dropped.
pub struct Observation {
    observer: IntersectionObserver,
    element: Element,
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.observer.unobserve(&self.element);
    }
}

fn element_id(element: &Element) -> Option<ElementId> {
    element
        .get_attribute(REVEAL_ID_ATTRIBUTE)?
        .parse::<u64>()
        .ok()
        .map(ElementId::from)
}
