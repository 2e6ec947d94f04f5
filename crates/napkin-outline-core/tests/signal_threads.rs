//! Integration tests for signals shared between threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use napkin_outline_core::{ObjectKind, Signal};

#[test]
fn slots_run_on_emitting_thread() {
    let signal = Arc::new(Signal::<ObjectKind>::new());
    let count = Arc::new(AtomicUsize::new(0));

    let c = count.clone();
    let main_thread = thread::current().id();
    signal.connect(move |_| {
        assert_ne!(thread::current().id(), main_thread);
        c.fetch_add(1, Ordering::SeqCst);
    });

    let handles: Vec<_> = ObjectKind::ALL
        .into_iter()
        .map(|kind| {
            let signal = signal.clone();
            thread::spawn(move || signal.emit(kind))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(count.load(Ordering::SeqCst), ObjectKind::ALL.len());
}

#[test]
fn disconnect_from_another_thread() {
    let signal = Arc::new(Signal::<()>::new());
    let id = signal.connect(|_| {});

    let remote = signal.clone();
    thread::spawn(move || assert!(remote.disconnect(id)))
        .join()
        .unwrap();

    assert_eq!(signal.connection_count(), 0);
}
