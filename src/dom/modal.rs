// Project modal view: renders the overlay, mirrors ModalController transitions onto the DOM.
// Deferred steps (show tick, engine rotate-in, removal) hold the overlay id and are
// cancelled when a newer overlay replaces this one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use super::{clear_style, create, js_err, query_all, set_style};
use crate::animation::{self, Embellisher};
use crate::error::PortfolioError;
use crate::modal::{DismissTrigger, ModalController, OverlayId};
use crate::projects::{self, ProjectDescriptor};
use crate::types::{ModalSettings, OverlayState};

const STYLE_ID: &str = "modal-styles";

const MODAL_STYLES: &str = r#"
.modal { position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: 2000; display: flex; align-items: center; justify-content: center; opacity: 0; visibility: hidden; transition: all 0.3s ease; }
.modal.show { opacity: 1; visibility: visible; }
.modal.hidden { opacity: 0; visibility: hidden; }
.modal__overlay { position: absolute; top: 0; left: 0; width: 100%; height: 100%; background: rgba(0, 0, 0, 0.8); backdrop-filter: blur(4px); }
.modal__content { position: relative; background: var(--color-surface); border-radius: 16px; max-width: 600px; width: 90%; max-height: 80vh; overflow-y: auto; transform: scale(0.9); transition: transform 0.3s ease; border: 1px solid var(--color-card-border); }
.modal.show .modal__content { transform: scale(1); }
.modal__header { padding: 24px; border-bottom: 1px solid var(--color-border); display: flex; justify-content: space-between; align-items: center; }
.modal__title { margin: 0; color: var(--color-text); font-size: var(--font-size-xl); }
.modal__close { background: none; border: none; font-size: 24px; cursor: pointer; color: var(--color-text-secondary); padding: 8px; border-radius: 4px; transition: background-color 0.2s ease; }
.modal__close:hover { background: var(--color-secondary); }
.modal__body { padding: 24px; }
.modal__description { color: var(--color-text-secondary); line-height: 1.6; margin-bottom: 24px; }
.modal__features h3, .modal__tech h3 { color: var(--color-text); margin-bottom: 12px; font-size: var(--font-size-lg); }
.modal__features ul { color: var(--color-text-secondary); line-height: 1.6; margin-bottom: 24px; padding-left: 20px; }
.modal__tech-list { display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 24px; }
.modal__links { display: flex; gap: 16px; flex-wrap: wrap; }
.btn__icon { margin-right: 8px; }
@media (max-width: 768px) {
  .modal__content { width: 95%; max-height: 90vh; }
  .modal__links { flex-direction: column; }
  .modal__links .btn { width: 100%; }
}
"#;

struct MountedOverlay {
    id: OverlayId,
    root: Element,
    _listeners: Vec<EventListener>,
    escape: Option<EventListener>,
}

/// DOM side of the modal. Owns the controller; all mutation goes through it.
pub struct ModalView {
    document: Document,
    settings: ModalSettings,
    engine: Rc<dyn Embellisher<Element>>,
    controller: RefCell<ModalController>,
    mounted: RefCell<Option<MountedOverlay>>,
    show_frame: RefCell<Option<AnimationFrame>>,
    engine_timer: RefCell<Option<Timeout>>,
    removal_timer: RefCell<Option<Timeout>>,
}

impl ModalView {
    pub fn new(
        document: Document,
        settings: ModalSettings,
        engine: Rc<dyn Embellisher<Element>>,
    ) -> Rc<Self> {
        Rc::new(ModalView {
            document,
            settings,
            engine,
            controller: RefCell::new(ModalController::new()),
            mounted: RefCell::new(None),
            show_frame: RefCell::new(None),
            engine_timer: RefCell::new(None),
            removal_timer: RefCell::new(None),
        })
    }

    pub fn state(&self) -> OverlayState {
        self.controller.borrow().state()
    }

    pub fn scroll_locked(&self) -> bool {
        self.controller.borrow().scroll_locked()
    }

    /// Show project `index`, replacing any overlay outright.
    pub fn open(self: &Rc<Self>, index: usize) -> Result<(), PortfolioError> {
        let transition = self.controller.borrow_mut().open(index);
        if transition.replaced.is_some() {
            self.detach();
        }

        let project = projects::project_at(transition.project_index);
        console::log!("Opening modal for project:", transition.project_index as u32, project.title);

        let built = self.ensure_styles().and_then(|_| self.build(project));
        let root = match built {
            Ok(root) => root,
            Err(err) => {
                // Keep the slot and the scroll lock consistent with the page.
                let mut controller = self.controller.borrow_mut();
                if controller.close().is_some() {
                    controller.finish_close(transition.overlay);
                }
                drop(controller);
                self.sync_scroll_lock();
                return Err(err);
            }
        };

        let listeners = self.bind_dismissal(&root);
        let escape = self.bind_escape();
        *self.mounted.borrow_mut() = Some(MountedOverlay {
            id: transition.overlay,
            root,
            _listeners: listeners,
            escape: Some(escape),
        });
        self.sync_scroll_lock();

        let id = transition.overlay;
        let view = Rc::downgrade(self);
        *self.show_frame.borrow_mut() = Some(request_animation_frame(move |_timestamp| {
            if let Some(view) = view.upgrade() {
                view.on_shown(id);
            }
        }));

        if self.engine.is_active() {
            let view = Rc::downgrade(self);
            *self.engine_timer.borrow_mut() = Some(Timeout::new(
                self.settings.engine_delay().as_millis(),
                move || {
                    if let Some(view) = view.upgrade() {
                        view.animate_content(id);
                    }
                },
            ));
        }

        Ok(())
    }

    /// Fade out, release scroll, and remove after the transition.
    pub fn dismiss(self: &Rc<Self>, trigger: DismissTrigger) {
        let Some(id) = self.controller.borrow_mut().dismiss(trigger) else {
            return;
        };

        if let Some(mounted) = self.mounted.borrow_mut().as_mut() {
            if mounted.id == id {
                let classes = mounted.root.class_list();
                let _ = classes.remove_1("show");
                let _ = classes.add_1("hidden");
                mounted.escape.take();
            }
        }
        self.sync_scroll_lock();

        let view = Rc::downgrade(self);
        *self.removal_timer.borrow_mut() = Some(Timeout::new(
            self.settings.transition().as_millis(),
            move || {
                if let Some(view) = view.upgrade() {
                    view.finish(id);
                }
            },
        ));
    }

    fn on_shown(&self, id: OverlayId) {
        if !self.controller.borrow_mut().mark_shown(id) {
            return;
        }
        if let Some(mounted) = self.mounted.borrow().as_ref() {
            let classes = mounted.root.class_list();
            let _ = classes.remove_1("hidden");
            let _ = classes.add_1("show");
        }
    }

    fn animate_content(&self, id: OverlayId) {
        let mounted = self.mounted.borrow();
        let Some(mounted) = mounted.as_ref().filter(|mounted| mounted.id == id) else {
            return;
        };
        if let Ok(Some(content)) = mounted.root.query_selector(".modal__content") {
            self.engine.embellish(&content, &animation::modal_content());
        }
    }

    fn finish(&self, id: OverlayId) {
        if !self.controller.borrow_mut().finish_close(id) {
            return;
        }
        let mounted = self.mounted.borrow_mut().take();
        if let Some(mounted) = mounted {
            mounted.root.remove();
        }
    }

    /// Synchronous teardown of the previous overlay, pending steps included.
    fn detach(&self) {
        self.show_frame.borrow_mut().take();
        self.engine_timer.borrow_mut().take();
        self.removal_timer.borrow_mut().take();
        let mounted = self.mounted.borrow_mut().take();
        if let Some(mounted) = mounted {
            mounted.root.remove();
        }
    }

    fn sync_scroll_lock(&self) {
        let Some(body) = self.document.body() else {
            return;
        };
        if self.controller.borrow().scroll_locked() {
            set_style(&body, "overflow", "hidden");
        } else {
            clear_style(&body, "overflow");
        }
    }

    fn bind_dismissal(self: &Rc<Self>, root: &Element) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        let targets = [
            (".modal__close", DismissTrigger::CloseButton),
            (".modal__overlay", DismissTrigger::Backdrop),
        ];
        for (selector, trigger) in targets {
            let Ok(Some(element)) = root.query_selector(selector) else {
                continue;
            };
            let view: Weak<ModalView> = Rc::downgrade(self);
            listeners.push(EventListener::new(&element, "click", move |_event: &Event| {
                if let Some(view) = view.upgrade() {
                    view.dismiss(trigger);
                }
            }));
        }
        listeners
    }

    fn bind_escape(self: &Rc<Self>) -> EventListener {
        let view = Rc::downgrade(self);
        EventListener::new(&self.document, "keydown", move |event: &Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let (Some(trigger), Some(view)) = (DismissTrigger::from_key(&key), view.upgrade())
            else {
                return;
            };
            view.dismiss(trigger);
        })
    }

    fn ensure_styles(&self) -> Result<(), PortfolioError> {
        if self.document.get_element_by_id(STYLE_ID).is_some() {
            return Ok(());
        }
        let head = self
            .document
            .head()
            .ok_or_else(|| PortfolioError::MissingElement("head".to_string()))?;
        let style = create(&self.document, "style", "")?;
        style.set_id(STYLE_ID);
        style.set_text_content(Some(MODAL_STYLES));
        head.append_child(&style)
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;
        Ok(())
    }

    fn build(&self, project: &ProjectDescriptor) -> Result<Element, PortfolioError> {
        let doc = &self.document;
        let body = doc
            .body()
            .ok_or_else(|| PortfolioError::MissingElement("body".to_string()))?;

        let root = create(doc, "div", "modal hidden")?;
        let overlay = create(doc, "div", "modal__overlay")?;
        let content = create(doc, "div", "modal__content")?;

        let header = create(doc, "div", "modal__header")?;
        let title = create(doc, "h2", "modal__title")?;
        title.set_text_content(Some(project.title));
        let close = create(doc, "button", "modal__close")?;
        close
            .set_attribute("aria-label", "Close modal")
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;
        close.set_text_content(Some("\u{00d7}"));
        append(&header, &[&title, &close])?;

        let body_panel = create(doc, "div", "modal__body")?;
        let description = create(doc, "p", "modal__description")?;
        description.set_text_content(Some(project.full_description));

        let features = create(doc, "div", "modal__features")?;
        let features_heading = create(doc, "h3", "")?;
        features_heading.set_text_content(Some("Key Features"));
        let list = create(doc, "ul", "")?;
        for feature in project.features.iter().copied() {
            let item = create(doc, "li", "")?;
            item.set_text_content(Some(feature));
            append(&list, &[&item])?;
        }
        append(&features, &[&features_heading, &list])?;

        let tech = create(doc, "div", "modal__tech")?;
        let tech_heading = create(doc, "h3", "")?;
        tech_heading.set_text_content(Some("Technologies Used"));
        let tech_list = create(doc, "div", "modal__tech-list")?;
        for technology in project.technologies.iter().copied() {
            let tag = create(doc, "span", "tech__tag")?;
            tag.set_text_content(Some(technology));
            append(&tech_list, &[&tag])?;
        }
        append(&tech, &[&tech_heading, &tech_list])?;

        let links = create(doc, "div", "modal__links")?;
        let repo = link(doc, project.github_url, "btn btn--outline", "\u{1f4bb}", "View Project Details")?;
        let demo = link(doc, project.demo_url, "btn btn--primary", "\u{1f680}", "Live Demo")?;
        append(&links, &[&repo, &demo])?;

        append(&body_panel, &[&description, &features, &tech, &links])?;
        append(&content, &[&header, &body_panel])?;
        append(&root, &[&overlay, &content])?;
        append(&body, &[&root])?;
        Ok(root)
    }
}

fn append(parent: &Element, children: &[&Element]) -> Result<(), PortfolioError> {
    for child in children {
        parent
            .append_child(child)
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;
    }
    Ok(())
}

/// Outbound link that opens in a new browsing context.
fn link(
    doc: &Document,
    href: &str,
    class: &str,
    icon: &str,
    label: &str,
) -> Result<Element, PortfolioError> {
    let anchor = create(doc, "a", class)?;
    for (name, value) in [
        ("href", href),
        ("target", "_blank"),
        ("rel", "noopener noreferrer"),
    ] {
        anchor
            .set_attribute(name, value)
            .map_err(|err| PortfolioError::Dom(js_err(err)))?;
    }
    let icon_span = create(doc, "span", "btn__icon")?;
    icon_span.set_text_content(Some(icon));
    append(&anchor, &[&icon_span])?;
    anchor
        .append_with_str_1(label)
        .map_err(|err| PortfolioError::Dom(js_err(err)))?;
    Ok(anchor)
}

/// The Nth `.project__btn` opens the Nth project.
pub fn mount_project_buttons(document: &Document, view: &Rc<ModalView>) -> Vec<EventListener> {
    let buttons = query_all(document, ".project__btn");
    let listeners: Vec<EventListener> = buttons
        .iter()
        .enumerate()
        .map(|(index, button)| {
            let view = Rc::downgrade(view);
            EventListener::new(button, "click", move |event: &Event| {
                event.prevent_default();
                console::log!("Project button clicked:", index as u32);
                let Some(view) = view.upgrade() else {
                    return;
                };
                if let Err(err) = view.open(index) {
                    console::error!("project modal failed", err.to_string());
                }
            })
        })
        .collect();
    console::log!("Project buttons initialized:", listeners.len() as u32);
    listeners
}
