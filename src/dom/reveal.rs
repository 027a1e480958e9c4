// Registers the page's reveal groups with the dispatcher and the viewport watcher.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_sys::{Document, Element};

use super::query_all;
use super::watcher::ViewportWatcher;
use crate::animation::Embellisher;
use crate::reveal::{RevealCategory, RevealDispatcher, RevealId};
use crate::types::StaggerSettings;

pub type SharedDispatcher = Rc<RefCell<RevealDispatcher<Element>>>;

const FADE_SELECTORS: &str = ".about__content, .skills__grid, .projects__grid, .values__grid, \
     .achievements__grid, .contact__content, .hero__content";

const CARD_SELECTORS: &str =
    ".highlight__card, .skill__card, .project__card, .value__card, .achievement__card";

const TIMELINE_SELECTOR: &str = ".timeline__item";

fn card_category(card: &Element) -> RevealCategory {
    if card.class_list().contains("skill__card") {
        RevealCategory::SkillCard
    } else {
        RevealCategory::Card
    }
}

/// Returns `None` without touching the page when the watcher is inert, so
/// content never gets stuck behind an initial hidden class.
pub fn mount_reveals(
    document: &Document,
    watcher: &ViewportWatcher,
    stagger: &StaggerSettings,
    engine: Rc<dyn Embellisher<Element>>,
) -> Option<SharedDispatcher> {
    if !watcher.is_active() {
        return None;
    }

    let dispatcher: SharedDispatcher =
        Rc::new(RefCell::new(RevealDispatcher::new(Box::new(engine))));

    let ids: Vec<RevealId> = {
        let mut registry = dispatcher.borrow_mut();
        let mut ids: Vec<RevealId> = query_all(document, FADE_SELECTORS)
            .into_iter()
            .map(|element| registry.register(RevealCategory::Fade, element))
            .collect();

        let cards = query_all(document, CARD_SELECTORS)
            .into_iter()
            .map(|card| (card_category(&card), card));
        ids.extend(registry.register_staggered(cards, stagger.card_step()));

        let timeline = query_all(document, TIMELINE_SELECTOR)
            .into_iter()
            .map(|item| (RevealCategory::Timeline, item));
        ids.extend(registry.register_staggered(timeline, stagger.timeline_step()));
        ids
    };

    for id in ids {
        let Some(target) = dispatcher.borrow().target(id).cloned() else {
            continue;
        };
        let weak: Weak<RefCell<RevealDispatcher<Element>>> = Rc::downgrade(&dispatcher);
        watcher.register(&target, move |_element| {
            if let Some(dispatcher) = weak.upgrade() {
                dispatcher.borrow_mut().reveal(id);
            }
        });
    }

    Some(dispatcher)
}
