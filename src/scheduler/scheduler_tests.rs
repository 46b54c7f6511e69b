//! Tests for the scheduling backends
//!
//! `ManualScheduler` cases verify the virtual-clock ordering guarantees;
//! tokio cases run on a paused clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{ManualScheduler, ScheduleHandle, Scheduler, SchedulerError, TokioScheduler};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (count.clone(), count)
}

#[test]
fn fires_in_due_then_insertion_order() {
    let scheduler = ManualScheduler::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for (name, delay) in [("b", 20), ("a", 10), ("c", 20)] {
        let order = order.clone();
        scheduler.schedule(
            ms(delay),
            Box::new(move || order.lock().unwrap().push(name)),
        );
    }

    scheduler.advance(ms(25));
    assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn zero_delay_fires_on_next_advance_only() {
    let scheduler = ManualScheduler::new();
    let (count, cb_count) = counter();

    scheduler.schedule(
        Duration::ZERO,
        Box::new(move || {
            cb_count.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert_eq!(
        count.load(Ordering::SeqCst),
        0,
        "a task never fires inside schedule"
    );

    scheduler.advance(Duration::ZERO);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn tasks_beyond_the_window_stay_queued() {
    let scheduler = ManualScheduler::new();
    let (count, cb_count) = counter();

    scheduler.schedule(
        ms(100),
        Box::new(move || {
            cb_count.fetch_add(1, Ordering::SeqCst);
        }),
    );

    scheduler.advance(ms(99));
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(scheduler.pending(), 1);

    scheduler.advance(ms(1));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn cancel_removes_queued_task() {
    let scheduler = ManualScheduler::new();
    let (count, cb_count) = counter();

    let mut handle = scheduler.schedule(
        ms(10),
        Box::new(move || {
            cb_count.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert_eq!(scheduler.pending(), 1);

    handle.cancel();
    assert_eq!(scheduler.pending(), 0);

    scheduler.advance(ms(50));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn cancel_after_fire_is_a_no_op() {
    let scheduler = ManualScheduler::new();
    let (count, cb_count) = counter();

    let mut handle = scheduler.schedule(
        ms(10),
        Box::new(move || {
            cb_count.fetch_add(1, Ordering::SeqCst);
        }),
    );

    scheduler.advance(ms(10));
    assert_eq!(count.load(Ordering::SeqCst), 1);

    handle.cancel();
    scheduler.advance(ms(10));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn reentrant_schedule_fires_within_the_same_advance() {
    let scheduler = ManualScheduler::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    let outer_order = order.clone();
    let outer_sched = scheduler.clone();
    scheduler.schedule(
        ms(10),
        Box::new(move || {
            outer_order.lock().unwrap().push("outer");
            let inner_order = outer_order.clone();
            outer_sched.schedule(
                ms(5),
                Box::new(move || inner_order.lock().unwrap().push("inner")),
            );
        }),
    );

    scheduler.advance(ms(20));
    assert_eq!(*order.lock().unwrap(), vec!["outer", "inner"]);
    assert_eq!(scheduler.now(), ms(20));
}

#[test]
fn advance_accumulates_virtual_time() {
    let scheduler = ManualScheduler::new();

    scheduler.advance(ms(10));
    scheduler.advance(ms(15));
    assert_eq!(scheduler.now(), ms(25));
}

#[test]
fn current_outside_runtime_is_an_error() {
    let err = TokioScheduler::current().unwrap_err();
    assert!(matches!(err, SchedulerError::NoRuntime(_)));
}

#[tokio::test(start_paused = true)]
async fn tokio_task_fires_after_delay() {
    let scheduler = TokioScheduler::current().expect("inside runtime");
    let (count, cb_count) = counter();

    scheduler.schedule(
        ms(50),
        Box::new(move || {
            cb_count.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert_eq!(count.load(Ordering::SeqCst), 0);

    tokio::time::sleep(ms(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn tokio_cancel_aborts_the_task() {
    let scheduler = TokioScheduler::current().expect("inside runtime");
    let (count, cb_count) = counter();

    let mut handle = scheduler.schedule(
        ms(50),
        Box::new(move || {
            cb_count.fetch_add(1, Ordering::SeqCst);
        }),
    );
    handle.cancel();

    tokio::time::sleep(ms(100)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
