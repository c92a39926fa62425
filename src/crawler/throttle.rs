//! Per-host admission control for download tasks
//!
//! Each origin host gets an independent in-flight counter and a FIFO queue of
//! deferred tasks. A task is dispatched the moment a slot is available and
//! queued otherwise; finishing a task hands its slot to the head of the queue
//! when one is waiting.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// A deferred download task, boxed so it can sit in a host queue
pub type ThrottledTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Per-host counter/queue pair
///
/// A task is in exactly one place at a time: counted by `in_flight` while
/// dispatched, or sitting in `pending` while deferred.
struct HostState {
    in_flight: usize,
    pending: VecDeque<ThrottledTask>,
}

impl HostState {
    fn new() -> Self {
        Self {
            in_flight: 0,
            pending: VecDeque::new(),
        }
    }
}

/// Admission gate bounding concurrent downloads per origin host
///
/// `in_flight <= per_host` holds for every host at all times. Ordering is
/// FIFO within one host's queue; there is no ordering between hosts. Each
/// host's state has its own lock, so hosts do not contend with each other
/// beyond the brief map lookup.
pub struct HostThrottle {
    per_host: usize,
    hosts: Mutex<HashMap<String, Arc<Mutex<HostState>>>>,
}

impl HostThrottle {
    /// Creates a throttle admitting up to `per_host` concurrent downloads
    /// per origin host
    pub fn new(per_host: usize) -> Self {
        Self {
            per_host,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    fn state_for(&self, host: &str) -> Arc<Mutex<HostState>> {
        let mut hosts = self.hosts.lock().unwrap();
        Arc::clone(
            hosts
                .entry(host.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(HostState::new()))),
        )
    }

    /// Submits a download task for `host`
    ///
    /// Dispatches immediately while the host is below its cap, otherwise
    /// appends to the host's FIFO queue. Every submitted task must call
    /// [`release`](Self::release) for the same host when it finishes.
    pub fn submit(&self, host: &str, task: ThrottledTask) {
        let state = self.state_for(host);
        let mut state = state.lock().unwrap();
        if state.in_flight < self.per_host {
            state.in_flight += 1;
            tracing::debug!(host, in_flight = state.in_flight, "dispatching download");
            drop(state);
            tokio::spawn(task);
        } else {
            state.pending.push_back(task);
            tracing::debug!(host, queued = state.pending.len(), "host at capacity, queuing");
        }
    }

    /// Releases the slot held by a finished task for `host`
    ///
    /// Dispatches the head of the host's queue if one is waiting (the
    /// in-flight count stays at the cap), otherwise decrements the count.
    pub fn release(&self, host: &str) {
        let state = self.state_for(host);
        let mut state = state.lock().unwrap();
        if let Some(next) = state.pending.pop_front() {
            tracing::debug!(host, queued = state.pending.len(), "handing slot to queued task");
            drop(state);
            tokio::spawn(next);
        } else {
            state.in_flight -= 1;
        }
    }
}
