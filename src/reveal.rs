// Reveal animation dispatcher: one-shot `visible` class plus optional engine keyframes.

use crate::animation::{self, AnimationSpec, Embellisher};
use crate::types::Millis;

/// Terminal class added on first visibility. Never removed.
pub const VISIBLE_CLASS: &str = "visible";

/// Kind of revealed element; picks the initial class and engine keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealCategory {
    /// Section-level block fading in.
    Fade,
    /// Grid card fading in.
    Card,
    /// Card that also flips up when the engine is present.
    SkillCard,
    /// Timeline entry sliding in from the left.
    Timeline,
}

impl RevealCategory {
    pub fn initial_class(&self) -> &'static str {
        match self {
            RevealCategory::Fade | RevealCategory::Card | RevealCategory::SkillCard => "fade-in",
            RevealCategory::Timeline => "slide-in-left",
        }
    }

    pub fn keyframes(&self) -> Option<AnimationSpec> {
        match self {
            RevealCategory::SkillCard => Some(animation::skill_card()),
            RevealCategory::Timeline => Some(animation::timeline_item()),
            RevealCategory::Fade | RevealCategory::Card => None,
        }
    }
}

/// What the dispatcher needs from a page element.
pub trait RevealTarget {
    fn add_class(&self, class: &str);
    fn set_transition_delay(&self, delay: Millis);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    Pending,
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealId(usize);

struct Registration<T> {
    target: T,
    category: RevealCategory,
    delay: Millis,
    state: FireState,
}

/// Registered animated elements and their fire-once flags.
pub struct RevealDispatcher<T> {
    entries: Vec<Registration<T>>,
    embellisher: Box<dyn Embellisher<T>>,
}

impl<T: RevealTarget> RevealDispatcher<T> {
    pub fn new(embellisher: Box<dyn Embellisher<T>>) -> Self {
        RevealDispatcher {
            entries: Vec::new(),
            embellisher,
        }
    }

    /// Register one element with no stagger.
    pub fn register(&mut self, category: RevealCategory, target: T) -> RevealId {
        target.add_class(category.initial_class());
        self.push(category, target, Millis::ZERO)
    }

    /// Register a list together; element `i` is delayed by `i * step`.
    pub fn register_staggered<I>(&mut self, items: I, step: Millis) -> Vec<RevealId>
    where
        I: IntoIterator<Item = (RevealCategory, T)>,
    {
        items
            .into_iter()
            .enumerate()
            .map(|(index, (category, target))| {
                let delay = step.times(index);
                target.add_class(category.initial_class());
                target.set_transition_delay(delay);
                self.push(category, target, delay)
            })
            .collect()
    }

    fn push(&mut self, category: RevealCategory, target: T, delay: Millis) -> RevealId {
        let id = RevealId(self.entries.len());
        self.entries.push(Registration {
            target,
            category,
            delay,
            state: FireState::Pending,
        });
        id
    }

    /// First visibility of `id`. Returns `false` if it already fired.
    pub fn reveal(&mut self, id: RevealId) -> bool {
        let Some(entry) = self.entries.get_mut(id.0) else {
            return false;
        };
        if entry.state == FireState::Fired {
            return false;
        }
        entry.state = FireState::Fired;
        entry.target.add_class(VISIBLE_CLASS);

        if self.embellisher.is_active() {
            if let Some(spec) = entry.category.keyframes() {
                self.embellisher
                    .embellish(&entry.target, &spec.with_delay(entry.delay));
            }
        }
        true
    }

    pub fn state(&self, id: RevealId) -> Option<FireState> {
        self.entries.get(id.0).map(|entry| entry.state)
    }

    pub fn delay(&self, id: RevealId) -> Option<Millis> {
        self.entries.get(id.0).map(|entry| entry.delay)
    }

    pub fn target(&self, id: RevealId) -> Option<&T> {
        self.entries.get(id.0).map(|entry| &entry.target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fired_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state == FireState::Fired)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NoopEmbellisher;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeNode {
        classes: RefCell<Vec<String>>,
        delay: Cell<Option<Millis>>,
    }

    impl FakeNode {
        fn has(&self, class: &str) -> bool {
            self.classes.borrow().iter().any(|c| c == class)
        }
    }

    impl RevealTarget for Rc<FakeNode> {
        fn add_class(&self, class: &str) {
            if !self.has(class) {
                self.classes.borrow_mut().push(class.to_string());
            }
        }

        fn set_transition_delay(&self, delay: Millis) {
            self.delay.set(Some(delay));
        }
    }

    #[derive(Clone, Default)]
    struct RecordingEngine {
        runs: Rc<RefCell<Vec<AnimationSpec>>>,
    }

    impl Embellisher<Rc<FakeNode>> for RecordingEngine {
        fn is_active(&self) -> bool {
            true
        }

        fn embellish(&self, _target: &Rc<FakeNode>, spec: &AnimationSpec) {
            self.runs.borrow_mut().push(spec.clone());
        }
    }

    fn nodes(count: usize) -> Vec<Rc<FakeNode>> {
        (0..count).map(|_| Rc::new(FakeNode::default())).collect()
    }

    #[test]
    fn reveal_adds_visible_once() {
        let mut dispatcher = RevealDispatcher::new(Box::new(NoopEmbellisher));
        let node = Rc::new(FakeNode::default());
        let id = dispatcher.register(RevealCategory::Fade, Rc::clone(&node));

        assert!(node.has("fade-in"));
        assert!(!node.has(VISIBLE_CLASS));
        assert_eq!(dispatcher.state(id), Some(FireState::Pending));

        assert!(dispatcher.reveal(id));
        assert!(node.has(VISIBLE_CLASS));
        assert!(!dispatcher.reveal(id));
        assert_eq!(dispatcher.state(id), Some(FireState::Fired));
        assert_eq!(dispatcher.fired_count(), 1);
    }

    #[test]
    fn timeline_stagger_is_two_tenths() {
        let mut dispatcher = RevealDispatcher::new(Box::new(NoopEmbellisher));
        let items = nodes(3);
        let ids = dispatcher.register_staggered(
            items.iter().map(|n| (RevealCategory::Timeline, Rc::clone(n))),
            Millis::from_millis(200),
        );

        assert_eq!(dispatcher.delay(ids[2]), Some(Millis::from_millis(400)));
        assert_eq!(items[0].delay.get(), Some(Millis::ZERO));
        assert_eq!(items[1].delay.get().unwrap().to_css_seconds(), "0.2s");
        assert!(items.iter().all(|n| n.has("slide-in-left")));
    }

    #[test]
    fn class_fallback_works_without_engine() {
        let mut dispatcher = RevealDispatcher::new(Box::new(NoopEmbellisher));
        let node = Rc::new(FakeNode::default());
        let id = dispatcher.register(RevealCategory::SkillCard, Rc::clone(&node));
        assert!(dispatcher.reveal(id));
        assert!(node.has(VISIBLE_CLASS));
    }

    #[test]
    fn engine_runs_category_keyframes_with_stagger() {
        let engine = RecordingEngine::default();
        let mut dispatcher = RevealDispatcher::new(Box::new(engine.clone()));
        let items = nodes(3);
        let ids = dispatcher.register_staggered(
            vec![
                (RevealCategory::Card, Rc::clone(&items[0])),
                (RevealCategory::SkillCard, Rc::clone(&items[1])),
                (RevealCategory::Card, Rc::clone(&items[2])),
            ],
            Millis::from_millis(100),
        );

        for id in &ids {
            dispatcher.reveal(*id);
        }

        let runs = engine.runs.borrow();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].duration, 600);
        assert_eq!(runs[0].delay, 100);
        assert!(items.iter().all(|n| n.has(VISIBLE_CLASS)));
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut dispatcher: RevealDispatcher<Rc<FakeNode>> =
            RevealDispatcher::new(Box::new(NoopEmbellisher));
        assert!(!dispatcher.reveal(RevealId(3)));
        assert!(dispatcher.is_empty());
    }

    proptest! {
        #[test]
        fn stagger_is_linear_and_reveals_fire_once(
            count in 0usize..40,
            step in 0u32..1000,
            order in proptest::collection::vec(0usize..40, 0..80),
        ) {
            let mut dispatcher = RevealDispatcher::new(Box::new(NoopEmbellisher));
            let items = nodes(count);
            let ids = dispatcher.register_staggered(
                items.iter().map(|n| (RevealCategory::Card, Rc::clone(n))),
                Millis::from_millis(step),
            );

            for (index, id) in ids.iter().enumerate() {
                prop_assert_eq!(dispatcher.delay(*id), Some(Millis::from_millis(step * index as u32)));
            }
            prop_assert_eq!(dispatcher.fired_count(), 0);

            let mut seen = HashSet::new();
            for index in order.into_iter().filter(|index| *index < count) {
                let first = seen.insert(index);
                prop_assert_eq!(dispatcher.reveal(ids[index]), first);
                prop_assert!(items[index].has(VISIBLE_CLASS));
            }
            prop_assert_eq!(dispatcher.fired_count(), seen.len());
        }
    }
}
