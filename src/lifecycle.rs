//! Frame scheduling and event-listener bookkeeping for mounted widgets.
//!
//! Everything runs on the single UI thread. A widget asks for one frame at a
//! time, the host drains the requests once per display tick, and unmounting
//! cancels the pending request and drops every listener the widget added.

use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    PointerMove,
    PointerLeave,
}

/// Which widgets want which host events
#[derive(Debug, Default)]
pub struct Listeners {
    by_owner: HashMap<WidgetId, HashSet<ListenerKind>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the owner was already listening for `kind`
    pub fn add(&mut self, owner: WidgetId, kind: ListenerKind) -> bool {
        self.by_owner.entry(owner).or_default().insert(kind)
    }

    pub fn remove_all(&mut self, owner: WidgetId) -> usize {
        self.by_owner.remove(&owner).map_or(0, |kinds| kinds.len())
    }

    pub fn is_listening(&self, owner: WidgetId, kind: ListenerKind) -> bool {
        self.by_owner
            .get(&owner)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    pub fn count(&self, owner: WidgetId) -> usize {
        self.by_owner.get(&owner).map_or(0, |kinds| kinds.len())
    }

    pub fn total(&self) -> usize {
        self.by_owner.values().map(|kinds| kinds.len()).sum()
    }
}

/// Start/stop switch for one animation loop
#[derive(Debug, Default)]
pub struct AnimationHandle {
    running: bool,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Idempotent. Returns whether the loop was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Pending one-shot frame requests, one per widget
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: BTreeSet<WidgetId>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&mut self, owner: WidgetId) {
        self.pending.insert(owner);
    }

    pub fn cancel(&mut self, owner: WidgetId) -> bool {
        self.pending.remove(&owner)
    }

    pub fn is_pending(&self, owner: WidgetId) -> bool {
        self.pending.contains(&owner)
    }

    /// Drains the requests due this tick. Widgets must ask again for the next one.
    pub fn take_due(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: WidgetId = WidgetId(1);
    const SPHERE: WidgetId = WidgetId(2);

    #[test]
    fn remove_all_drops_only_that_owner() {
        let mut listeners = Listeners::new();
        assert!(listeners.add(HERO, ListenerKind::Resize));
        assert!(listeners.add(HERO, ListenerKind::PointerMove));
        assert!(!listeners.add(HERO, ListenerKind::PointerMove));
        listeners.add(SPHERE, ListenerKind::PointerMove);

        assert_eq!(listeners.remove_all(HERO), 2);
        assert_eq!(listeners.count(HERO), 0);
        assert!(listeners.is_listening(SPHERE, ListenerKind::PointerMove));
        assert_eq!(listeners.total(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut handle = AnimationHandle::new();
        handle.start();
        assert!(handle.stop());
        assert!(!handle.stop());
        assert!(!handle.is_running());
    }

    #[test]
    fn frames_are_one_shot() {
        let mut frames = FrameScheduler::new();
        frames.request_frame(HERO);
        frames.request_frame(HERO);
        frames.request_frame(SPHERE);
        assert_eq!(frames.take_due(), vec![HERO, SPHERE]);
        assert!(frames.take_due().is_empty());
    }

    #[test]
    fn cancelled_frame_is_not_delivered() {
        let mut frames = FrameScheduler::new();
        frames.request_frame(HERO);
        assert!(frames.cancel(HERO));
        assert!(!frames.cancel(HERO));
        assert!(frames.take_due().is_empty());
    }
}
