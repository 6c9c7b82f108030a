//! Integration tests for signal delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use horizon_sourcing_core::logging::targets;
use horizon_sourcing_core::{ConnectionGuard, Signal};
use parking_lot::Mutex;

#[test]
fn test_each_slot_sees_emissions_in_order() {
    let signal = Signal::<u32>::new();
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));

    let log = first.clone();
    signal.connect(move |value| log.lock().push(*value));
    let log = second.clone();
    signal.connect(move |value| log.lock().push(*value));

    for value in 0..50 {
        signal.emit(value);
    }

    let expected: Vec<u32> = (0..50).collect();
    assert_eq!(*first.lock(), expected);
    assert_eq!(*second.lock(), expected);
}

#[test]
fn test_emit_from_another_thread() {
    let signal = Arc::new(Signal::<String>::new());
    let received = Arc::new(Mutex::new(Vec::new()));

    let log = received.clone();
    signal.connect(move |text| log.lock().push(text.clone()));

    let emitter = signal.clone();
    thread::spawn(move || emitter.emit("from worker".to_string()))
        .join()
        .unwrap();

    assert_eq!(*received.lock(), vec!["from worker".to_string()]);
}

#[test]
fn test_guards_in_a_collection() {
    let signal = Signal::<()>::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let mut guards: Vec<ConnectionGuard<()>> = (0..3)
        .map(|_| {
            let hits = hits.clone();
            signal.connect_scoped(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    signal.emit(());
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    guards.truncate(1);
    signal.emit(());
    assert_eq!(hits.load(Ordering::SeqCst), 4);
    assert_eq!(signal.connection_count(), 1);
}

#[test]
fn test_panicking_slot_is_resumed_after_delivery() {
    let signal = Signal::<i32>::new();
    let delivered = Arc::new(AtomicUsize::new(0));

    signal.connect(|_| panic!("first slot failed"));
    let count = delivered.clone();
    signal.connect(move |_| {
        count.fetch_add(1, Ordering::SeqCst);
    });

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| signal.emit(1)));
    let payload = outcome.unwrap_err();

    assert_eq!(payload.downcast_ref::<&str>(), Some(&"first slot failed"));
    assert_eq!(delivered.load(Ordering::SeqCst), 1);
    assert_eq!(signal.connection_count(), 2);
}

#[test]
fn test_emission_is_traced() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(format!("{}=trace", targets::SIGNAL))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let signal = Signal::<u8>::new();
        signal.connect(|_| {});
        signal.emit(7);
    });
}
