//! Integration tests for socket wiring and value movement.
//!
//! These exercise whole wiring scenarios across the port, socket, and value
//! layers together: fan-out pushes, multi-peer pulls, reconnect semantics,
//! and the behavior of sockets whose peers have been dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use patchbay_core::port::Port;
use patchbay_core::socket::{CallbackError, Cardinality, Event};
use patchbay_core::value::TypedValue;

/// Push through a wire, then pull the value back out the other end.
#[test]
fn push_then_pull_across_a_wire() {
    let source = Port::output(Cardinality::Single);
    let sink = Port::<i32>::input(Cardinality::Single);

    assert!(source.connect(&sink));
    source.update(41);

    assert_eq!(sink.get_value().single(), Ok(41));
}

/// The reference scenario: an output fanning out to two inputs, with a
/// recording callback on one of them.
#[test]
fn fan_out_with_recording_callback() {
    let source = Port::output(Cardinality::Multiple);
    let d1 = Port::input(Cardinality::Single);
    let d2 = Port::<i32>::input(Cardinality::Single);

    assert!(source.connect(&d1));
    assert!(source.connect(&d2));

    let recorded = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&recorded);
    d1.add_callback(Event::Updated, "updated", move |_, value: &i32| {
        recorder.borrow_mut().push(*value);
    });

    source.update(8);

    assert_eq!(d1.get_value().single(), Ok(8));
    assert_eq!(d2.get_value().single(), Ok(8));
    assert_eq!(*recorded.borrow(), vec![8]);
}

/// Reconnecting a Single-cardinality port replaces its previous peer on
/// both ends.
#[test]
fn single_side_reconnect_evicts_the_old_peer() {
    let a = Port::<i32>::output(Cardinality::Single);
    let b = Port::<i32>::input(Cardinality::Single);
    let c = Port::<i32>::input(Cardinality::Single);

    assert!(a.connect(&b));
    assert!(a.connect(&c));

    assert!(!a.is_connected_to(&b));
    assert!(!b.is_connected_to(&a));
    assert_eq!(b.peer_count(), 0);
    assert!(a.is_connected_to(&c));
    assert!(c.is_connected_to(&a));
}

/// A rejected wire leaves both peer sets untouched.
#[test]
fn rejected_wires_change_nothing() {
    let ints = Port::<i32>::output(Cardinality::Multiple);
    let strings = Port::<String>::input(Cardinality::Multiple);
    let other_output = Port::<i32>::output(Cardinality::Multiple);

    assert!(!ints.can_connect(&strings));
    assert!(!ints.connect(&strings));
    assert!(!ints.connect(&other_output));

    assert_eq!(ints.peer_count(), 0);
    assert_eq!(strings.peer_count(), 0);
    assert_eq!(other_output.peer_count(), 0);
}

/// A Multiple-cardinality input collects one value per upstream output, in
/// connection order.
#[test]
fn multiple_input_collects_in_connection_order() {
    let sink = Port::<i32>::input(Cardinality::Multiple);
    let p1 = Port::output(Cardinality::Single);
    let p2 = Port::output(Cardinality::Single);

    assert!(sink.connect(&p1));
    assert!(sink.connect(&p2));
    p1.update(1);
    p2.update(2);

    assert_eq!(sink.get_value().multiple(), Ok(vec![1, 2]));
}

/// One dropped upstream peer fails the whole Multiple collection closed.
#[test]
fn multiple_input_fails_closed_on_a_dead_peer() {
    let sink = Port::<i32>::input(Cardinality::Multiple);
    let p1 = Port::output(Cardinality::Single);
    let p2 = Port::output(Cardinality::Single);

    sink.connect(&p1);
    sink.connect(&p2);
    p1.update(1);
    p2.update(2);
    assert_eq!(sink.get_value().multiple(), Ok(vec![1, 2]));

    drop(p2);
    assert_eq!(sink.get_value(), TypedValue::Empty);
}

/// One non-Output upstream peer fails the whole Multiple collection closed.
#[test]
fn multiple_input_fails_closed_on_a_non_output_peer() {
    let sink = Port::<i32>::input(Cardinality::Multiple);
    let p1 = Port::output(Cardinality::Single);
    let p2 = Port::<i32>::bidirectional(Cardinality::Single);

    sink.connect(&p1);
    sink.connect(&p2);
    p1.update(1);

    assert_eq!(sink.get_value(), TypedValue::Empty);
}

/// A Single-cardinality input whose upstream peer is dropped reads Empty.
#[test]
fn dead_single_peer_pulls_empty() {
    let source = Port::output(Cardinality::Single);
    let sink = Port::<i32>::input(Cardinality::Single);

    source.connect(&sink);
    source.update(3);
    assert_eq!(sink.get_value().single(), Ok(3));

    drop(source);
    assert!(sink.get_value().is_empty());
}

/// Pushing through a duplicate edge delivers each input exactly one update.
#[test]
fn duplicate_edges_deliver_once_per_push() {
    let source = Port::output(Cardinality::Multiple);
    let sink = Port::<i32>::input(Cardinality::Multiple);

    // Connecting twice is permitted and yields two slots on each side.
    assert!(source.connect(&sink));
    assert!(source.connect(&sink));
    assert_eq!(source.peer_count(), 2);
    assert_eq!(sink.peer_count(), 2);

    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    sink.add_callback(Event::Updated, "count", move |_, _: &i32| {
        counter.set(counter.get() + 1);
    });

    source.update(3);
    assert_eq!(hits.get(), 1);

    // Both slots are live outputs, so the pull still sees both.
    assert_eq!(sink.get_value().multiple(), Ok(vec![3, 3]));
}

/// Two bidirectional sockets wired to each other form a loop; a push must
/// terminate anyway.
#[test]
fn cyclic_wiring_terminates() {
    let a = Port::bidirectional(Cardinality::Single);
    let b = Port::<i32>::bidirectional(Cardinality::Single);

    assert!(a.connect(&b));
    a.update(1);

    assert_eq!(a.get_value().single(), Ok(1));
    // Bidirectional peers are not auto-propagated to, and a's cache is not
    // strictly-Output upstream for b, so b stays empty.
    assert!(b.get_value().is_empty());
}

/// A strictly-Input port is a push terminus: its handlers fire but nothing
/// is recorded or forwarded.
#[test]
fn input_update_is_a_terminus() {
    let source = Port::<i32>::output(Cardinality::Single);
    let sink = Port::input(Cardinality::Single);
    source.connect(&sink);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen);
    sink.add_callback(Event::Updated, "record", move |_, value: &i32| {
        recorder.borrow_mut().push(*value);
    });

    sink.update(9);
    assert_eq!(*seen.borrow(), vec![9]);
    // Nothing was recorded or pushed upstream.
    assert!(source.get_value().is_empty());

    source.update(4);
    assert_eq!(*seen.borrow(), vec![9, 4]);
    assert_eq!(sink.get_value().single(), Ok(4));
}

/// A bidirectional port is satisfied permanently by its own pushes and only
/// derives from upstream while it has never been pushed.
#[test]
fn bidirectional_pull_memoizes_after_a_push() {
    let source = Port::output(Cardinality::Single);
    let tap = Port::<i32>::bidirectional(Cardinality::Single);
    assert!(source.connect(&tap));

    // Never pushed: derive from the upstream output.
    source.update(5);
    assert_eq!(tap.get_value().single(), Ok(5));

    // Pushed directly: the memo wins from here on.
    tap.update(6);
    assert_eq!(tap.get_value().single(), Ok(6));

    source.update(7);
    assert_eq!(tap.get_value().single(), Ok(6));
}

/// Connected/Disconnected are declared event kinds, but wiring operations
/// do not raise them.
#[test]
fn wiring_raises_no_events() {
    let source = Port::<i32>::output(Cardinality::Single);
    let sink = Port::<i32>::input(Cardinality::Single);

    let fired = Rc::new(Cell::new(0));
    for (event, name) in [
        (Event::Connected, "connected"),
        (Event::Disconnected, "disconnected"),
    ] {
        let counter = Rc::clone(&fired);
        source.add_callback(event, name, move |_, _: &i32| {
            counter.set(counter.get() + 1);
        });
    }

    source.connect(&sink);
    source.disconnect(&sink);
    assert_eq!(fired.get(), 0);
}

/// Removing callbacks for an event kind that never had any is caller
/// misuse and errs.
#[test]
fn remove_callback_for_unknown_kind_errs() {
    let port = Port::<i32>::output(Cardinality::Single);

    assert_eq!(
        port.remove_callback(Event::Updated, "missing"),
        Err(CallbackError::UnknownEvent(Event::Updated))
    );

    port.add_callback(Event::Updated, "present", |_, _| {});
    assert_eq!(port.remove_callback(Event::Updated, "missing"), Ok(()));
    assert_eq!(port.remove_callback(Event::Updated, "present"), Ok(()));
}
