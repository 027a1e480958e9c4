// Project modal lifecycle: closed -> opening -> open -> closing -> closed.
// Owns the single overlay slot and the page scroll lock; nothing else mutates them.

use crate::projects::{self, ProjectDescriptor};
use crate::types::OverlayState;

/// Identity of one overlay instance. Deferred callbacks carry it so they can
/// tell whether the overlay they were scheduled for is still the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

/// The live overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub id: OverlayId,
    pub state: OverlayState,
    pub project_index: usize,
}

impl Overlay {
    pub fn project(&self) -> &'static ProjectDescriptor {
        projects::project_at(self.project_index)
    }
}

/// What `open` did, for the view to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTransition {
    /// Prior overlay that must be detached immediately, without animation.
    pub replaced: Option<OverlayId>,
    pub overlay: OverlayId,
    pub project_index: usize,
}

/// Ways the user can dismiss the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    CloseButton,
    Backdrop,
    EscapeKey,
}

impl DismissTrigger {
    /// Map a `keydown` key name to a dismissal.
    pub fn from_key(key: &str) -> Option<Self> {
        (key == "Escape").then_some(DismissTrigger::EscapeKey)
    }
}

/// Modal state machine. At most one overlay exists; the scroll lock is held
/// iff that overlay is opening or open.
#[derive(Debug, Default)]
pub struct ModalController {
    current: Option<Overlay>,
    scroll_locked: bool,
    next_id: u64,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any overlay with a fresh one for `index` (clamped into the catalog).
    pub fn open(&mut self, index: usize) -> OpenTransition {
        let replaced = self.current.take().map(|overlay| overlay.id);

        let id = OverlayId(self.next_id);
        self.next_id += 1;
        let project_index = projects::resolve_index(index);

        self.current = Some(Overlay {
            id,
            state: OverlayState::Opening,
            project_index,
        });
        self.scroll_locked = true;

        OpenTransition {
            replaced,
            overlay: id,
            project_index,
        }
    }

    /// Next paint after insertion. Stale ids and non-opening states are ignored.
    pub fn mark_shown(&mut self, id: OverlayId) -> bool {
        match self.current.as_mut() {
            Some(overlay) if overlay.id == id && overlay.state == OverlayState::Opening => {
                overlay.state = OverlayState::Open;
                true
            }
            _ => false,
        }
    }

    /// Start the fade-out and release the scroll lock. Returns the overlay to
    /// remove once the transition finishes, or `None` if nothing was live.
    pub fn close(&mut self) -> Option<OverlayId> {
        let overlay = self.current.as_mut()?;
        if !overlay.state.holds_scroll_lock() {
            return None;
        }
        overlay.state = OverlayState::Closing;
        self.scroll_locked = false;
        Some(overlay.id)
    }

    pub fn dismiss(&mut self, _trigger: DismissTrigger) -> Option<OverlayId> {
        self.close()
    }

    /// Transition finished. Only the overlay that is still closing is removed.
    pub fn finish_close(&mut self, id: OverlayId) -> bool {
        match self.current {
            Some(overlay) if overlay.id == id && overlay.state == OverlayState::Closing => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.current
            .map(|overlay| overlay.state)
            .unwrap_or(OverlayState::Closed)
    }

    pub fn current(&self) -> Option<&Overlay> {
        self.current.as_ref()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Escape is only listened for while the overlay can still be dismissed.
    pub fn accepts_dismissal(&self) -> bool {
        self.state().holds_scroll_lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_lifecycle() {
        let mut modal = ModalController::new();
        assert_eq!(modal.state(), OverlayState::Closed);

        let opened = modal.open(2);
        assert_eq!(opened.replaced, None);
        assert_eq!(modal.state(), OverlayState::Opening);
        assert!(modal.scroll_locked());
        assert_eq!(modal.current().unwrap().project().title, "E-yantra Drawing Robot");

        assert!(modal.mark_shown(opened.overlay));
        assert_eq!(modal.state(), OverlayState::Open);

        let closing = modal.dismiss(DismissTrigger::EscapeKey);
        assert_eq!(closing, Some(opened.overlay));
        assert_eq!(modal.state(), OverlayState::Closing);
        assert!(!modal.scroll_locked());

        assert!(modal.finish_close(opened.overlay));
        assert_eq!(modal.state(), OverlayState::Closed);
        assert!(modal.current().is_none());
    }

    #[test]
    fn reopen_replaces_without_stacking() {
        let mut modal = ModalController::new();
        let first = modal.open(1);
        let second = modal.open(3);

        assert_eq!(second.replaced, Some(first.overlay));
        assert_eq!(modal.current().unwrap().id, second.overlay);
        assert_eq!(modal.current().unwrap().project_index, 3);
        assert!(modal.scroll_locked());
    }

    #[test]
    fn reopen_during_close_cancels_pending_removal() {
        let mut modal = ModalController::new();
        let first = modal.open(0);
        modal.close();
        let second = modal.open(1);

        assert_eq!(second.replaced, Some(first.overlay));
        // The stale removal timer fires after the reopen.
        assert!(!modal.finish_close(first.overlay));
        assert_eq!(modal.state(), OverlayState::Opening);
        assert!(modal.scroll_locked());
    }

    #[test]
    fn stale_show_tick_is_ignored() {
        let mut modal = ModalController::new();
        let first = modal.open(0);
        modal.open(1);
        assert!(!modal.mark_shown(first.overlay));
        assert_eq!(modal.state(), OverlayState::Opening);
    }

    #[test]
    fn close_before_show_tick() {
        let mut modal = ModalController::new();
        let opened = modal.open(0);
        assert!(modal.close().is_some());
        assert!(!modal.mark_shown(opened.overlay));
        assert_eq!(modal.state(), OverlayState::Closing);
    }

    #[test]
    fn close_is_idempotent() {
        let mut modal = ModalController::new();
        assert_eq!(modal.close(), None);
        modal.open(0);
        assert!(modal.close().is_some());
        assert_eq!(modal.close(), None);
        assert!(!modal.accepts_dismissal());
    }

    #[test]
    fn out_of_range_index_shows_first_project() {
        let mut modal = ModalController::new();
        let opened = modal.open(42);
        assert_eq!(opened.project_index, 0);
    }

    #[test]
    fn only_escape_dismisses() {
        assert_eq!(
            DismissTrigger::from_key("Escape"),
            Some(DismissTrigger::EscapeKey)
        );
        assert_eq!(DismissTrigger::from_key("Enter"), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Open(usize),
        Close,
        ShowLatest,
        FinishLatest,
        FinishStale,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..8).prop_map(Op::Open),
            Just(Op::Close),
            Just(Op::ShowLatest),
            Just(Op::FinishLatest),
            Just(Op::FinishStale),
        ]
    }

    proptest! {
        /// Scroll lock tracks the overlay state under any call sequence.
        #[test]
        fn lock_matches_state(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut modal = ModalController::new();
            let mut ids: Vec<OverlayId> = Vec::new();

            for op in ops {
                match op {
                    Op::Open(i) => {
                        let opened = modal.open(i);
                        ids.push(opened.overlay);
                        prop_assert_eq!(modal.current().unwrap().id, opened.overlay);
                    }
                    Op::Close => {
                        modal.close();
                    }
                    Op::ShowLatest => {
                        if let Some(id) = ids.last() {
                            modal.mark_shown(*id);
                        }
                    }
                    Op::FinishLatest => {
                        if let Some(id) = ids.last() {
                            modal.finish_close(*id);
                        }
                    }
                    Op::FinishStale => {
                        if ids.len() >= 2 {
                            let stale = ids[ids.len() - 2];
                            prop_assert!(!modal.finish_close(stale));
                        }
                    }
                }
                prop_assert_eq!(modal.scroll_locked(), modal.state().holds_scroll_lock());
            }

            // Any sequence can be drained to closed with the lock released.
            if let Some(id) = modal.close() {
                prop_assert!(modal.finish_close(id));
            } else if let Some(overlay) = modal.current().copied() {
                prop_assert!(modal.finish_close(overlay.id));
            }
            prop_assert_eq!(modal.state(), OverlayState::Closed);
            prop_assert!(!modal.scroll_locked());
        }
    }
}
