//! Completion tracking for a dynamically growing task graph
//!
//! The crawl cannot know up front how many tasks it will spawn: every
//! extraction task may discover links and register new download tasks while
//! older tasks are completing. A fixed-count barrier would either deadlock or
//! return early, so this one is a plain outstanding-work counter with an
//! async wakeup for the single root waiter.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Barrier that blocks one waiter until every registered unit of work is done
///
/// The contract that makes late registration safe: [`register`] is called by
/// the code that is *about to* submit the corresponding task, synchronously,
/// strictly before the task can possibly run. That way the counter can never
/// dip to zero while a just-discovered task is still in flight.
///
/// [`register`]: CompletionBarrier::register
pub struct CompletionBarrier {
    outstanding: AtomicUsize,
    notify: Notify,
}

impl CompletionBarrier {
    /// Creates a barrier with no outstanding work
    pub fn new() -> Self {
        Self {
            outstanding: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    /// Registers one unit of work
    ///
    /// Must happen-before the corresponding task can be dispatched.
    pub fn register(&self) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
    }

    /// Completes one unit of work
    ///
    /// Called exactly once per [`register`](Self::register), on every exit
    /// path of the unit, success or failure.
    pub fn complete(&self) {
        // fetch_sub returns the previous value; 1 means we just hit zero.
        if self.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }

    /// Current number of not-yet-finished units
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Waits until the outstanding count reaches zero
    ///
    /// The waiter itself does not count as outstanding work. Returns
    /// immediately if the count is already zero.
    pub async fn wait_zero(&self) {
        loop {
            // Arm the notification before checking the counter, otherwise a
            // completion between the check and the await would be missed.
            let notified = self.notify.notified();
            if self.outstanding.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}
