//! Shortcut routing: edge-triggered on/off callbacks over chord state.
//!
//! The router owns a [`ChordTracker`] and re-evaluates every subscription
//! synchronously after each key-state mutation, before the mutating call
//! returns. Activation and deactivation fire only on transitions, never
//! repeatedly while a chord stays held.

use crate::chord::{ChordTracker, KeyChord};

/// One registered chord subscription.
///
/// `is_active` is the last observed match result; it is what makes
/// deactivation edge-triggered (fire only on the active → inactive
/// transition, and only if a deactivate callback was supplied).
struct Subscription {
    chords: Vec<KeyChord>,
    on_activate: Box<dyn FnMut()>,
    on_deactivate: Option<Box<dyn FnMut()>>,
    is_active: bool,
}

/// Registers named chord subscriptions and fires their callbacks on edges.
pub struct ShortcutRouter {
    tracker: ChordTracker,
    subscriptions: Vec<Subscription>,
    /// Cleared by [`teardown`](Self::teardown); a torn-down router reports
    /// nothing as held and ignores further key events.
    active: bool,
}

impl Default for ShortcutRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutRouter {
    pub fn new() -> Self {
        Self {
            tracker: ChordTracker::new(),
            subscriptions: Vec::new(),
            active: true,
        }
    }

    /// Register a subscription for one or more chord specs (any-of match).
    ///
    /// All specs are parsed and normalized here, once — not per check.
    /// Errors if any spec is invalid; no subscription is added in that case.
    pub fn subscribe(
        &mut self,
        specs: &[&str],
        on_activate: impl FnMut() + 'static,
        on_deactivate: Option<Box<dyn FnMut()>>,
    ) -> Result<(), String> {
        if specs.is_empty() {
            return Err("subscription needs at least one chord spec".to_string());
        }
        let chords = specs
            .iter()
            .map(|spec| KeyChord::parse(spec))
            .collect::<Result<Vec<_>, _>>()?;

        self.subscriptions.push(Subscription {
            chords,
            on_activate: Box::new(on_activate),
            on_deactivate,
            is_active: false,
        });
        Ok(())
    }

    /// Feed a key press; re-evaluates all subscriptions before returning.
    pub fn key_down(&mut self, key: &str) {
        if !self.active {
            return;
        }
        self.tracker.key_down(key);
        self.evaluate_all();
    }

    /// Feed a key release; re-evaluates all subscriptions before returning.
    pub fn key_up(&mut self, key: &str) {
        if !self.active {
            return;
        }
        self.tracker.key_up(key);
        self.evaluate_all();
    }

    /// Window lost focus: clear the held-set and force any active
    /// subscriptions to deactivate.
    pub fn blur(&mut self) {
        if !self.active {
            return;
        }
        self.tracker.clear();
        self.evaluate_all();
    }

    /// Re-check every subscription against the current held-set and fire
    /// edge callbacks. Evaluation runs in subscription insertion order.
    pub fn evaluate_all(&mut self) {
        let tracker = &self.tracker;
        for sub in &mut self.subscriptions {
            let held = sub.chords.iter().any(|chord| tracker.is_chord_held(chord));
            if held && !sub.is_active {
                sub.is_active = true;
                log::debug!("shortcut activated: {:?}", sub.chords);
                (sub.on_activate)();
            } else if !held && sub.is_active {
                sub.is_active = false;
                log::debug!("shortcut deactivated: {:?}", sub.chords);
                if let Some(on_deactivate) = sub.on_deactivate.as_mut() {
                    on_deactivate();
                }
            }
        }
    }

    /// Level check (not edge-triggered): is this chord held right now?
    /// Used by the zoom/pan loop to gate per-frame behavior.
    pub fn is_held(&self, chord: &KeyChord) -> bool {
        self.active && self.tracker.is_chord_held(chord)
    }

    /// Read access to the underlying tracker.
    pub fn tracker(&self) -> &ChordTracker {
        &self.tracker
    }

    /// Drop all subscriptions and stop reacting to key events. After
    /// teardown every query reports "not held". Deactivate callbacks do
    /// not fire here; visual cleanup is the owner's job.
    pub fn teardown(&mut self) {
        self.subscriptions.clear();
        self.tracker.clear();
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counter pair shared with subscription callbacks.
    fn counters() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)))
    }

    fn subscribe_counting(
        router: &mut ShortcutRouter,
        specs: &[&str],
        on: &Rc<Cell<u32>>,
        off: &Rc<Cell<u32>>,
    ) {
        let on = on.clone();
        let off = off.clone();
        router
            .subscribe(
                specs,
                move || on.set(on.get() + 1),
                Some(Box::new(move || off.set(off.get() + 1))),
            )
            .unwrap();
    }

    #[test]
    fn activate_fires_once_per_transition() {
        let mut router = ShortcutRouter::new();
        let (on, off) = counters();
        subscribe_counting(&mut router, &["shift"], &on, &off);

        router.key_down("Shift");
        assert_eq!((on.get(), off.get()), (1, 0));

        // Holding: auto-repeat key-downs must not re-fire.
        router.key_down("Shift");
        router.key_down("Shift");
        assert_eq!(on.get(), 1);

        router.key_up("Shift");
        assert_eq!((on.get(), off.get()), (1, 1));

        // Second cycle fires again.
        router.key_down("Shift");
        assert_eq!((on.get(), off.get()), (2, 1));
    }

    #[test]
    fn extra_key_deactivates_strict_match() {
        let mut router = ShortcutRouter::new();
        let (on, off) = counters();
        subscribe_counting(&mut router, &["shift"], &on, &off);

        router.key_down("Shift");
        router.key_down("a");
        assert_eq!(
            (on.get(), off.get()),
            (1, 1),
            "superset must break the strict match"
        );

        router.key_up("a");
        assert_eq!((on.get(), off.get()), (2, 1));
    }

    #[test]
    fn multi_chord_subscription_matches_any() {
        let mut router = ShortcutRouter::new();
        let (on, off) = counters();
        subscribe_counting(&mut router, &["shift", "ctrl+shift"], &on, &off);

        router.key_down("Shift");
        assert_eq!(on.get(), 1);

        // Switching between the two specs keeps the subscription active
        // through the intermediate superset state... which here *is* the
        // second chord, so no deactivation happens.
        router.key_down("Control");
        assert_eq!((on.get(), off.get()), (1, 0));

        router.key_up("Shift");
        router.key_up("Control");
        assert_eq!((on.get(), off.get()), (1, 1));
    }

    #[test]
    fn missing_deactivate_callback_is_fine() {
        let mut router = ShortcutRouter::new();
        let on = Rc::new(Cell::new(0));
        let on2 = on.clone();
        router
            .subscribe(&["shift"], move || on2.set(on2.get() + 1), None)
            .unwrap();

        router.key_down("shift");
        router.key_up("shift");
        router.key_down("shift");
        assert_eq!(on.get(), 2);
    }

    #[test]
    fn blur_forces_deactivation() {
        let mut router = ShortcutRouter::new();
        let (on, off) = counters();
        subscribe_counting(&mut router, &["ctrl+shift"], &on, &off);

        router.key_down("Control");
        router.key_down("Shift");
        assert_eq!((on.get(), off.get()), (1, 0));

        router.blur();
        assert_eq!((on.get(), off.get()), (1, 1));
        assert!(router.tracker().held().is_empty());
    }

    #[test]
    fn invalid_spec_registers_nothing() {
        let mut router = ShortcutRouter::new();
        let result = router.subscribe(&["shift+"], || {}, None);
        assert!(result.is_err());

        // A bad spec in a list poisons the whole subscription.
        let result = router.subscribe(&["shift", ""], || {}, None);
        assert!(result.is_err());
    }

    #[test]
    fn evaluation_order_is_insertion_order() {
        let mut router = ShortcutRouter::new();
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let order = order.clone();
            router
                .subscribe(&["shift"], move || order.borrow_mut().push(name), None)
                .unwrap();
        }
        router.key_down("shift");
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn teardown_silences_everything() {
        let mut router = ShortcutRouter::new();
        let (on, off) = counters();
        subscribe_counting(&mut router, &["shift"], &on, &off);
        let chord = KeyChord::parse("shift").unwrap();

        router.key_down("shift");
        assert!(router.is_held(&chord));

        router.teardown();
        assert!(!router.is_held(&chord));

        router.key_down("shift");
        assert!(!router.is_held(&chord));
        assert_eq!(on.get(), 1, "no callbacks after teardown");
    }
}
