//! Latest-wins bookkeeping.
//!
//! Every initiated operation gets a [`Ticket`] carrying a generation number for
//! its key. Beginning a new operation for a key aborts the previous task and
//! bumps the generation, so an outcome that was already in flight when the
//! abort landed is still recognised as stale at commit time.

use std::collections::HashMap;
use std::hash::Hash;
use tokio::task::JoinHandle;

/// Identity of one initiated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    pub generation: u64,
}

/// Generation counters and task handles keyed by logical resource.
#[derive(Debug)]
pub struct LatestWins<K: Eq + Hash + Clone> {
    next_generation: u64,
    current: HashMap<K, u64>,
    in_flight: HashMap<K, JoinHandle<()>>,
}

impl<K: Eq + Hash + Clone> Default for LatestWins<K> {
    fn default() -> Self {
        Self {
            next_generation: 0,
            current: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> LatestWins<K> {
    /// Starts a new generation for `key`, aborting whatever was in flight.
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.next_generation += 1;
        if let Some(previous) = self.in_flight.remove(&key) {
            previous.abort();
        }
        self.current.insert(key.clone(), self.next_generation);
        Ticket {
            key,
            generation: self.next_generation,
        }
    }

    /// Records the task running on behalf of `ticket`.
    ///
    /// A handle for a superseded ticket is aborted immediately.
    pub fn track(&mut self, ticket: &Ticket<K>, handle: JoinHandle<()>) {
        if self.is_current(ticket) {
            self.in_flight.insert(ticket.key.clone(), handle);
        } else {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.current.get(&ticket.key) == Some(&ticket.generation)
    }

    /// Accepts an outcome. Returns `false` when the ticket was superseded.
    pub fn settle(&mut self, ticket: &Ticket<K>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight.remove(&ticket.key);
        true
    }

    /// Number of operations still running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.values().filter(|handle| !handle.is_finished()).count()
    }

    /// Aborts every in-flight task; their outcomes will never settle.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
        self.current.clear();
    }
}

impl<K: Eq + Hash + Clone> Drop for LatestWins<K> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
