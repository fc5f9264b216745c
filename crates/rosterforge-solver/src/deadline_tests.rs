//! Tests for the deadline runner.

use super::*;
use std::cell::RefCell;
use std::sync::Arc;
use std::time::Instant;

#[test]
fn test_returns_result_within_limit() {
    let result = run_with_deadline("fast", Some(Duration::from_secs(5)), || "done").unwrap();
    assert_eq!(result, Some("done"));
}

#[test]
fn test_no_limit_waits_for_result() {
    let result = run_with_deadline("unbounded", None, || {
        thread::sleep(Duration::from_millis(20));
        7
    })
    .unwrap();
    assert_eq!(result, Some(7));
}

#[test]
fn test_deadline_returns_none() {
    let start = Instant::now();
    let result = run_with_deadline("slow", Some(Duration::from_millis(50)), || {
        thread::sleep(Duration::from_secs(2));
        1
    })
    .unwrap();
    assert_eq!(result, None);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn test_panicking_worker_is_lost() {
    let result = run_with_deadline("panics", Some(Duration::from_secs(5)), || -> u8 {
        panic!("backend exploded")
    });
    assert!(matches!(result, Err(SolverError::WorkerLost)));
}

thread_local! {
    static HELD: RefCell<Option<Arc<()>>> = const { RefCell::new(None) };
}

#[test]
fn test_delivering_worker_has_exited() {
    let shared = Arc::new(());
    let captured = Arc::clone(&shared);
    let result = run_with_deadline("joined", Some(Duration::from_secs(5)), move || {
        // Released by the thread-local destructor, after the result is sent.
        HELD.with(|held| *held.borrow_mut() = Some(captured));
        3
    })
    .unwrap();
    assert_eq!(result, Some(3));
    assert_eq!(Arc::strong_count(&shared), 1);
}
