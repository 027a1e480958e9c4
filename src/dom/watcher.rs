// Viewport watcher over the platform IntersectionObserver.
// Inert when the primitive is missing: nothing registers, nothing fires, no error.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::types::WatchSettings;
use crate::watcher::{IntersectionReport, WatchId, WatchRegistry};

type VisibleCallback = Box<dyn FnOnce(&Element)>;
type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct ViewportWatcher {
    /// Attribute that carries the [`WatchId`] on each observed element.
    attribute: &'static str,
    registry: Rc<RefCell<WatchRegistry<VisibleCallback>>>,
    observer: Option<IntersectionObserver>,
    _on_entries: Option<EntriesCallback>,
}

impl ViewportWatcher {
    pub fn new(window: &Window, settings: WatchSettings, attribute: &'static str) -> Self {
        let registry = Rc::new(RefCell::new(WatchRegistry::new(settings)));
        let inert = |registry| ViewportWatcher {
            attribute,
            registry,
            observer: None,
            _on_entries: None,
        };

        if !supports_intersection_observer(window) {
            console::warn!("IntersectionObserver unavailable, skipping", attribute);
            return inert(registry);
        }

        let on_entries: EntriesCallback = {
            let registry = Rc::clone(&registry);
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                dispatch(&registry, attribute, &entries, &observer);
            })
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(settings.threshold));
        options.set_root_margin(&settings.root_margin());

        match IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options)
        {
            Ok(observer) => ViewportWatcher {
                attribute,
                registry,
                observer: Some(observer),
                _on_entries: Some(on_entries),
            },
            Err(err) => {
                console::warn!("IntersectionObserver rejected options", err);
                inert(registry)
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    /// Call `on_visible` once, the first time `element` crosses the threshold.
    pub fn register<F>(&self, element: &Element, on_visible: F)
    where
        F: FnOnce(&Element) + 'static,
    {
        let Some(observer) = self.observer.as_ref() else {
            return;
        };
        let id = self.registry.borrow_mut().register(Box::new(on_visible));
        let _ = element.set_attribute(self.attribute, &id.as_u32().to_string());
        observer.observe(element);
    }
}

impl Drop for ViewportWatcher {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn dispatch(
    registry: &RefCell<WatchRegistry<VisibleCallback>>,
    attribute: &str,
    entries: &Array,
    observer: &IntersectionObserver,
) {
    let mut targets: Vec<(WatchId, Element)> = Vec::new();
    let mut reports = Vec::new();

    for value in entries.iter() {
        let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() else {
            continue;
        };
        let target = entry.target();
        let Some(id) = target
            .get_attribute(attribute)
            .and_then(|raw| WatchId::parse(&raw))
        else {
            continue;
        };
        reports.push(IntersectionReport {
            id,
            is_intersecting: entry.is_intersecting(),
            ratio: entry.intersection_ratio(),
        });
        targets.push((id, target));
    }

    // Release the registry before running callbacks.
    let fired = registry.borrow_mut().process(reports);
    for (id, on_visible) in fired {
        if let Some((_, target)) = targets.iter().find(|(candidate, _)| *candidate == id) {
            observer.unobserve(target);
            on_visible(target);
        }
    }
}
