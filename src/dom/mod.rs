// Browser plumbing. Binds the pure controllers to the live document through web-sys.
// Every feature mounts independently: a missing element disables that feature only.

mod anime;
mod form;
mod modal;
mod motion;
mod nav;
mod reveal;
mod watcher;

use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::PortfolioError;
use crate::reveal::RevealTarget;
use crate::types::{Millis, PortfolioConfig, WatchSettings};

pub use anime::{select_embellisher, AnimeEmbellisher};
pub use form::{ConsoleTransport, ContactForm};
pub use modal::ModalView;
pub use reveal::SharedDispatcher;
pub use watcher::ViewportWatcher;

/// Everything mounted on the page. Dropping it detaches all listeners and observers.
pub struct Page {
    modal: Rc<ModalView>,
    _contact: Option<Rc<ContactForm>>,
    _reveals: Option<SharedDispatcher>,
    _watchers: Vec<ViewportWatcher>,
    _listeners: Vec<EventListener>,
}

impl Page {
    pub fn mount(config: PortfolioConfig) -> Result<Self, PortfolioError> {
        let window = window()?;
        let document = document(&window)?;
        let engine = select_embellisher(&window);
        let mut listeners = Vec::new();

        listeners.extend(nav::mount_header_style(&window, &document, config.scroll));
        listeners.extend(report(nav::mount_menu(&document)).unwrap_or_default());
        listeners.extend(nav::mount_smooth_scroll(&window, &document, config.scroll));

        let contact = report(ContactForm::mount(
            &document,
            config.banner,
            Box::new(ConsoleTransport),
        ));

        let reveal_watcher = ViewportWatcher::new(&window, config.watch, "data-reveal-id");
        let reveals = reveal::mount_reveals(
            &document,
            &reveal_watcher,
            &config.stagger,
            Rc::clone(&engine),
        );

        let modal = ModalView::new(document.clone(), config.modal, Rc::clone(&engine));
        listeners.extend(modal::mount_project_buttons(&document, &modal));

        let title_watcher =
            ViewportWatcher::new(&window, WatchSettings::immediate(), "data-title-id");
        listeners.extend(motion::mount_entrance_animations(
            &document,
            &title_watcher,
            &engine,
        ));

        let skill_watcher =
            ViewportWatcher::new(&window, WatchSettings::immediate(), "data-skill-id");
        motion::mount_skill_bars(&document, &skill_watcher, config.skill_bar_delay());
        motion::mount_floating_shapes(&document, &engine);

        Ok(Page {
            modal,
            _contact: contact,
            _reveals: reveals,
            _watchers: vec![reveal_watcher, title_watcher, skill_watcher],
            _listeners: listeners,
        })
    }

    pub fn modal(&self) -> &Rc<ModalView> {
        &self.modal
    }
}

/// Log a feature setup failure and carry on without it.
fn report<T>(result: Result<T, PortfolioError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            console::error!(err.to_string());
            None
        }
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

pub(crate) fn window() -> Result<Window, PortfolioError> {
    web_sys::window().ok_or_else(|| PortfolioError::MissingElement("window".to_string()))
}

pub(crate) fn document(window: &Window) -> Result<Document, PortfolioError> {
    window
        .document()
        .ok_or_else(|| PortfolioError::MissingElement("document".to_string()))
}

pub(crate) fn by_id(document: &Document, id: &str) -> Result<Element, PortfolioError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PortfolioError::MissingElement(format!("#{id}")))
}

/// All elements matching `selector`, in document order. Invalid selectors match nothing.
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Result<Element, PortfolioError> {
    let element = document
        .create_element(tag)
        .map_err(|err| PortfolioError::Dom(js_err(err)))?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

pub(crate) fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub(crate) fn clear_style(element: &Element, property: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property(property);
    }
}

impl RevealTarget for Element {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn set_transition_delay(&self, delay: Millis) {
        set_style(self, "transition-delay", &delay.to_css_seconds());
    }
}
