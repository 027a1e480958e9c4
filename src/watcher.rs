// Fire-once visibility registry behind the viewport watcher.
// The platform observer only reports; this decides who fires, and only once.

use crate::types::WatchSettings;

/// Handle for one watched element. Stored on the element so observer
/// entries can be mapped back to their registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(u32);

impl WatchId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(WatchId)
    }
}

/// One observer entry, reduced to what the registry needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionReport {
    pub id: WatchId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionReport {
    /// Whether this report counts as the element becoming visible.
    pub fn crosses(&self, settings: &WatchSettings) -> bool {
        const EPSILON: f64 = 1e-6;
        self.is_intersecting && self.ratio + EPSILON >= settings.threshold
    }
}

#[derive(Debug)]
enum Slot<C> {
    Pending(C),
    Fired,
}

/// Callbacks keyed by [`WatchId`]. Each transitions pending -> fired exactly once.
#[derive(Debug)]
pub struct WatchRegistry<C> {
    settings: WatchSettings,
    slots: Vec<Slot<C>>,
}

impl<C> WatchRegistry<C> {
    pub fn new(settings: WatchSettings) -> Self {
        WatchRegistry {
            settings,
            slots: Vec::new(),
        }
    }

    pub fn settings(&self) -> &WatchSettings {
        &self.settings
    }

    pub fn register(&mut self, on_visible: C) -> WatchId {
        let id = WatchId(self.slots.len() as u32);
        self.slots.push(Slot::Pending(on_visible));
        id
    }

    /// Take the callback for `id` if it has not fired yet.
    pub fn fire(&mut self, id: WatchId) -> Option<C> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        match std::mem::replace(slot, Slot::Fired) {
            Slot::Pending(callback) => Some(callback),
            Slot::Fired => None,
        }
    }

    /// Resolve a batch of observer entries into the callbacks to run, in report order.
    pub fn process<I>(&mut self, reports: I) -> Vec<(WatchId, C)>
    where
        I: IntoIterator<Item = IntersectionReport>,
    {
        let settings = self.settings;
        reports
            .into_iter()
            .filter(|report| report.crosses(&settings))
            .filter_map(|report| self.fire(report.id).map(|callback| (report.id, callback)))
            .collect()
    }

    pub fn is_fired(&self, id: WatchId) -> bool {
        matches!(self.slots.get(id.0 as usize), Some(Slot::Fired))
    }

    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Pending(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn report(id: WatchId, ratio: f64) -> IntersectionReport {
        IntersectionReport {
            id,
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    #[test]
    fn fires_once_then_stops() {
        let mut registry = WatchRegistry::new(WatchSettings::default());
        let id = registry.register("hero");

        assert_eq!(registry.process([report(id, 0.5)]), vec![(id, "hero")]);
        assert!(registry.is_fired(id));
        assert!(registry.process([report(id, 0.9)]).is_empty());
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn below_threshold_waits() {
        let mut registry = WatchRegistry::new(WatchSettings::default());
        let id = registry.register(());

        assert!(registry.process([report(id, 0.05)]).is_empty());
        assert!(!registry.is_fired(id));
        assert_eq!(registry.process([report(id, 0.1)]).len(), 1);
    }

    #[test]
    fn immediate_settings_fire_on_any_overlap() {
        let mut registry = WatchRegistry::new(WatchSettings::immediate());
        let id = registry.register(());
        assert_eq!(registry.process([report(id, 0.0001)]).len(), 1);
        assert!(registry.process([report(id, 0.0)]).is_empty());
    }

    #[test]
    fn firing_follows_report_order() {
        let mut registry = WatchRegistry::new(WatchSettings::default());
        let a = registry.register('a');
        let b = registry.register('b');
        let fired: Vec<char> = registry
            .process([report(b, 1.0), report(a, 1.0)])
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        assert_eq!(fired, vec!['b', 'a']);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut registry: WatchRegistry<()> = WatchRegistry::new(WatchSettings::default());
        assert!(registry.fire(WatchId(7)).is_none());
        assert_eq!(WatchId::parse(" 12 "), Some(WatchId(12)));
        assert_eq!(WatchId::parse("x"), None);
    }

    proptest! {
        /// No matter how often or in what order elements are reported, each fires at most once.
        #[test]
        fn each_registration_fires_at_most_once(
            count in 1usize..12,
            hits in prop::collection::vec((0usize..12, 0.0f64..1.0), 0..64)
        ) {
            let mut registry = WatchRegistry::new(WatchSettings::default());
            let ids: Vec<WatchId> = (0..count).map(|i| registry.register(i)).collect();
            let mut fired = vec![0u32; count];

            for (index, ratio) in hits {
                let Some(id) = ids.get(index) else { continue };
                for (_, value) in registry.process([report(*id, ratio)]) {
                    fired[value] += 1;
                }
            }

            for (i, times) in fired.iter().enumerate() {
                prop_assert!(*times <= 1);
                prop_assert_eq!(*times == 1, registry.is_fired(ids[i]));
            }
        }
    }
}
