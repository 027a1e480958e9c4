// Decorative motion: hero entrance, section titles, card hover tilt, skill bars, floating shapes.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::{Document, Element, Event};

use super::watcher::ViewportWatcher;
use super::{query_all, set_style};
use crate::animation::{self, AnimationSpec, Embellisher};
use crate::motion::{skill_width_css, SHAPE_WILL_CHANGE};
use crate::types::Millis;

type Engine = Rc<dyn Embellisher<Element>>;

const HOVER_SELECTORS: &str = ".project__card, .skill__card, .achievement__card";

/// Hero cascade, section titles and hover tilt. Engine only: without it the
/// page keeps its static layout and titles are never hidden.
pub fn mount_entrance_animations(
    document: &Document,
    title_watcher: &ViewportWatcher,
    engine: &Engine,
) -> Vec<EventListener> {
    if !engine.is_active() {
        return Vec::new();
    }

    let hero: [(&str, fn() -> AnimationSpec); 3] = [
        (".hero__title", animation::hero_title),
        (".hero__subtitle", animation::hero_subtitle),
        (".hero__tagline", animation::hero_tagline),
    ];
    for (selector, spec) in hero {
        for element in query_all(document, selector) {
            engine.embellish(&element, &spec());
        }
    }
    for (index, button) in query_all(document, ".hero__cta .btn").iter().enumerate() {
        engine.embellish(button, &animation::hero_cta_button(index));
    }

    if title_watcher.is_active() {
        for title in query_all(document, ".section__title") {
            set_style(&title, "opacity", "0");
            let engine = Rc::clone(engine);
            title_watcher.register(&title, move |title| {
                engine.embellish(title, &animation::section_title());
            });
        }
    }

    let mut listeners = Vec::new();
    for card in query_all(document, HOVER_SELECTORS) {
        for (event, spec) in [
            ("mouseenter", animation::card_hover_enter()),
            ("mouseleave", animation::card_hover_leave()),
        ] {
            let engine = Rc::clone(engine);
            let target = card.clone();
            listeners.push(EventListener::new(&card, event, move |_event: &Event| {
                engine.embellish(&target, &spec);
            }));
        }
    }
    listeners
}

/// Fill each `.skill__bar` to its `data-width` shortly after it first shows.
pub fn mount_skill_bars(document: &Document, watcher: &ViewportWatcher, delay: Millis) {
    for bar in query_all(document, ".skill__bar") {
        watcher.register(&bar, move |bar| {
            let Some(width) = bar.get_attribute("data-width").and_then(|raw| skill_width_css(&raw))
            else {
                return;
            };
            let bar = bar.clone();
            Timeout::new(delay.as_millis(), move || set_style(&bar, "width", &width)).forget();
        });
    }
}

pub fn mount_floating_shapes(document: &Document, engine: &Engine) {
    for (index, shape) in query_all(document, ".floating-shapes .shape").iter().enumerate() {
        set_style(shape, "will-change", SHAPE_WILL_CHANGE);
        if engine.is_active() {
            engine.embellish(shape, &animation::floating_shape(index));
        }
    }
}
