//! Unit tests for environment helpers.

use std::sync::{Arc, Barrier};
use std::thread;

use super::*;

fn current(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn set_restores_absent_variable() {
    let key = "FLAGARIZE_TEST_HELPERS_ABSENT";
    let lock = lock();
    let cleared = lock.unset(key);
    {
        let _guard = lock.set(key, "on");
        assert_eq!(current(key).as_deref(), Some("on"));
    }
    assert_eq!(current(key), None);
    drop(cleared);
}

#[test]
fn stacked_guards_unwind_in_order() {
    let key = "FLAGARIZE_TEST_HELPERS_STACKED";
    let lock = lock();
    let base = lock.set(key, "base");
    let outer = lock.set(key, "outer");
    let inner = lock.unset(key);
    assert_eq!(current(key), None);
    drop(inner);
    assert_eq!(current(key).as_deref(), Some("outer"));
    drop(outer);
    assert_eq!(current(key).as_deref(), Some("base"));
    drop(base);
}

#[test]
fn with_vars_restores_repeated_keys() {
    let key = "FLAGARIZE_TEST_HELPERS_REPEATED";
    let _outer = set_var(key, "original");
    let seen = with_vars(&[(key, Some("first")), (key, None)], || current(key));
    assert_eq!(seen, None);
    assert_eq!(current(key).as_deref(), Some("original"));
}

#[test]
fn parallel_mutations_of_distinct_keys_do_not_leak() {
    let threads = 4;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|idx| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let key = format!("FLAGARIZE_TEST_HELPERS_THREAD_{idx}");
                barrier.wait();
                for round in 0..50 {
                    let value = format!("{idx}-{round}");
                    let lock = lock();
                    let guard = lock.set(&key, &value);
                    assert_eq!(current(&key).as_deref(), Some(value.as_str()));
                    drop(guard);
                    assert_eq!(current(&key), None);
                }
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().is_ok(), "worker panicked");
    }
}
