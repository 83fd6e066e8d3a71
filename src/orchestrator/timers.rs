//! Cancellable timers keyed by the routine that owns them.
//!
//! Scheduling under a key always cancels the timer already held under that
//! key, so at most one timer per routine is ever pending.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owner of a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Quiet period after the last query edit.
    SearchDebounce,
    /// Deferred activation of a focused category control.
    CategoryActivation,
}

#[derive(Debug)]
pub struct TimerTable<K: Eq + Hash> {
    timers: HashMap<K, JoinHandle<()>>,
}

impl<K: Eq + Hash> Default for TimerTable<K> {
    fn default() -> Self {
        Self { timers: HashMap::new() }
    }
}

impl<K: Eq + Hash> TimerTable<K> {
    /// Runs `fire` after `delay` unless cancelled or rescheduled first.
    pub fn schedule<F>(&mut self, key: K, delay: Duration, fire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel(&key);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire.await;
        });
        self.timers.insert(key, handle);
    }

    /// Cancels the timer under `key`. Returns `true` if one was still pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.timers.remove(key).is_some_and(|handle| {
            let pending = !handle.is_finished();
            handle.abort();
            pending
        })
    }

    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.timers.get(key).is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

impl<K: Eq + Hash> Drop for TimerTable<K> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
