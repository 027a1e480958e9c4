// Mobile menu, header scroll style and in-page anchor scrolling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, Node, ScrollBehavior, ScrollToOptions, Window,
};

use super::{by_id, query_all, set_style};
use crate::error::PortfolioError;
use crate::navigation::{anchor_selector, scroll_target, HeaderStyle, NavMenu, SmoothScroll};
use crate::types::ScrollSettings;

const ACTIVE_CLASS: &str = "active";

struct MenuView {
    menu: Element,
    toggle: Element,
    state: Cell<NavMenu>,
}

impl MenuView {
    fn toggle(&self) {
        let mut state = self.state.get();
        let open = state.toggle();
        self.state.set(state);
        self.render(open);
    }

    fn close(&self) {
        let mut state = self.state.get();
        state.close();
        self.state.set(state);
        self.render(false);
    }

    fn render(&self, open: bool) {
        for element in [&self.menu, &self.toggle] {
            let _ = element.class_list().toggle_with_force(ACTIVE_CLASS, open);
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.menu.contains(target) || self.toggle.contains(target)
    }
}

/// Solid header once the page scrolls past the threshold. Inert without `#header`.
pub fn mount_header_style(
    window: &Window,
    document: &Document,
    settings: ScrollSettings,
) -> Option<EventListener> {
    let header = document.get_element_by_id("header")?;
    let scroller = window.clone();
    Some(EventListener::new(window, "scroll", move |_event: &Event| {
        let scroll_y = scroller.scroll_y().unwrap_or(0.0);
        let style = HeaderStyle::for_scroll(scroll_y, &settings);
        set_style(&header, "background", style.background);
        set_style(&header, "box-shadow", style.box_shadow);
    }))
}

/// Mobile menu: toggle button, close on link click, close on outside click.
pub fn mount_menu(document: &Document) -> Result<Vec<EventListener>, PortfolioError> {
    let menu = Rc::new(MenuView {
        menu: by_id(document, "nav-menu")?,
        toggle: by_id(document, "nav-toggle")?,
        state: Cell::new(NavMenu::default()),
    });
    let mut listeners = Vec::new();

    {
        let menu = Rc::clone(&menu);
        let toggle = menu.toggle.clone();
        listeners.push(EventListener::new(&toggle, "click", move |_event: &Event| {
            menu.toggle();
        }));
    }

    for link in query_all(document, ".nav__link") {
        let menu = Rc::clone(&menu);
        listeners.push(EventListener::new(&link, "click", move |_event: &Event| {
            menu.close();
        }));
    }

    listeners.push(EventListener::new(document, "click", move |event: &Event| {
        let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
        if !menu.contains(target.as_ref()) {
            menu.close();
        }
    }));

    Ok(listeners)
}

/// Anchor links scroll to their section, leaving room for the fixed header.
pub fn mount_smooth_scroll(
    window: &Window,
    document: &Document,
    settings: ScrollSettings,
) -> Vec<EventListener> {
    let fallback = Rc::new(FallbackScroll {
        window: window.clone(),
        frame: RefCell::new(None),
    });
    let native = supports_smooth_behavior(document);

    query_all(document, "a[href^=\"#\"]")
        .into_iter()
        .map(|link| {
            let window = window.clone();
            let document = document.clone();
            let fallback = Rc::clone(&fallback);
            let href = link.get_attribute("href").unwrap_or_default();
            EventListener::new(&link, "click", move |event: &Event| {
                event.prevent_default();
                let Some(selector) = anchor_selector(&href) else {
                    return;
                };
                let Some(section) = document
                    .query_selector(selector)
                    .ok()
                    .flatten()
                    .and_then(|section| section.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };

                let header_height = document
                    .get_element_by_id("header")
                    .and_then(|header| header.dyn_into::<HtmlElement>().ok())
                    .map(|header| f64::from(header.offset_height()));
                let top = scroll_target(f64::from(section.offset_top()), header_height, &settings);

                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);

                if !native {
                    let start = window.scroll_y().unwrap_or(0.0);
                    fallback.run(SmoothScroll::new(start, top, settings.fallback_duration_ms));
                }
            })
        })
        .collect()
}

fn supports_smooth_behavior(document: &Document) -> bool {
    document
        .document_element()
        .and_then(|root| root.dyn_into::<HtmlElement>().ok())
        .map(|root| {
            Reflect::has(&root.style(), &JsValue::from_str("scrollBehavior")).unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Frame-driven scroll. Starting a new one drops, and so cancels, the previous.
struct FallbackScroll {
    window: Window,
    frame: RefCell<Option<AnimationFrame>>,
}

impl FallbackScroll {
    fn run(self: &Rc<Self>, mut scroll: SmoothScroll) {
        let weak = Rc::downgrade(self);
        let frame = request_animation_frame(move |now| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let step = scroll.step(now);
            this.window.scroll_to_with_x_and_y(0.0, step.position);
            if step.done {
                this.frame.borrow_mut().take();
            } else {
                this.run(scroll);
            }
        });
        *self.frame.borrow_mut() = Some(frame);
    }
}
