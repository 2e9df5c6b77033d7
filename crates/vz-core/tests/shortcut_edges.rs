//! Integration test: chord recognition and edge-triggered routing (vz-core).
//!
//! Exercises the ShortcutRouter + ChordTracker pair the way the browser
//! bridge drives it: raw `KeyboardEvent.key` values in, edge callbacks out.

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use vz_core::{KeyChord, ShortcutRouter};

/// Records every edge as `+name` / `-name`.
fn record(
    router: &mut ShortcutRouter,
    specs: &[&str],
    name: &'static str,
    log: &Rc<RefCell<Vec<String>>>,
) {
    let on_log = log.clone();
    let off_log = log.clone();
    router
        .subscribe(
            specs,
            move || on_log.borrow_mut().push(format!("+{name}")),
            Some(Box::new(move || off_log.borrow_mut().push(format!("-{name}")))),
        )
        .unwrap();
}

#[test]
fn chord_cycle_fires_each_edge_exactly_once() {
    let mut router = ShortcutRouter::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mut router, &["ctrl+shift+e"], "zoom", &log);

    // Build the chord up key by key; only the completing key activates.
    router.key_down("Control");
    router.key_down("Shift");
    assert!(log.borrow().is_empty());
    router.key_down("E");
    assert_eq!(*log.borrow(), vec!["+zoom"]);

    // Auto-repeat while held: silent.
    router.key_down("e");
    router.key_down("E");
    assert_eq!(log.borrow().len(), 1);

    // Any key leaving the chord deactivates, once.
    router.key_up("Shift");
    router.key_up("Control");
    assert_eq!(*log.borrow(), vec!["+zoom", "-zoom"]);
}

#[test]
fn alias_spec_matches_canonical_events() {
    let mut router = ShortcutRouter::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    // Spec written with aliases; events arrive with canonical DOM names.
    record(&mut router, &["cmd+option"], "grab", &log);

    router.key_down("Meta");
    router.key_down("Alt");
    assert_eq!(*log.borrow(), vec!["+grab"]);
}

#[test]
fn overlapping_subscriptions_fire_independently_in_order() {
    let mut router = ShortcutRouter::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mut router, &["shift"], "a", &log);
    record(&mut router, &["shift+x"], "b", &log);

    router.key_down("Shift");
    assert_eq!(*log.borrow(), vec!["+a"]);

    // Adding x flips `a` off and `b` on in the same evaluation pass,
    // in subscription insertion order.
    router.key_down("x");
    assert_eq!(*log.borrow(), vec!["+a", "-a", "+b"]);

    // Dropping x reverses both, again walking subscriptions in order:
    // `a` (first registered) re-activates before `b` deactivates.
    router.key_up("x");
    assert_eq!(*log.borrow(), vec!["+a", "-a", "+b", "+a", "-b"]);
}

#[test]
fn blur_deactivates_everything_held() {
    let mut router = ShortcutRouter::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mut router, &["shift"], "a", &log);
    let chord = KeyChord::parse("shift").unwrap();

    router.key_down("Shift");
    assert!(router.is_held(&chord));

    router.blur();
    assert!(!router.is_held(&chord));
    assert_eq!(*log.borrow(), vec!["+a", "-a"]);

    // Keys pressed while unfocused were cleared; a fresh press re-activates.
    router.key_down("Shift");
    assert_eq!(*log.borrow(), vec!["+a", "-a", "+a"]);
}

#[test]
fn level_query_is_not_edge_triggered() {
    let mut router = ShortcutRouter::new();
    let chord = KeyChord::parse("shift").unwrap();

    assert!(!router.is_held(&chord));
    router.key_down("Shift");
    // is_held stays true across repeated queries — a level, not an edge.
    assert!(router.is_held(&chord));
    assert!(router.is_held(&chord));
    router.key_up("Shift");
    assert!(!router.is_held(&chord));
}
