//! Application state store.
//!
//! A single versioned state tree mutated only through [`Transition`]s. The
//! store is a cheap, cloneable handle; every component that reads or changes
//! application state holds one.
//!
//! # Architecture
//!
//! ```text
//! dispatch(Transition) ──► apply under write lock ──► version += 1
//!                                  │
//!                                  ├──► append Commit to the bounded log
//!                                  └──► fan out Commit to every subscriber
//! ```
//!
//! Commits are delivered to subscribers in commit order over unbounded
//! channels, so no routine ever misses a request it is responsible for.
//!
//! # Modules
//!
//! - [`state`]: The state tree and its slices
//! - [`transitions`]: The reducer set
//! - [`selectors`]: Pure read projections
//! - [`favorites`]: Ordered favorites set
//!
//! # Example
//!
//! ```rust
//! use moviedeck::store::{Store, Transition};
//!
//! let store = Store::default();
//! let version = store.dispatch(Transition::ToggleFavorite(7));
//! assert_eq!(version, 1);
//! assert!(store.select(|state| state.favorites.contains(7)));
//! ```

pub mod favorites;
pub mod selectors;
pub mod state;
pub mod transitions;

pub use favorites::FavoritesState;
pub use state::{AppData, CategoryState, DetailsState, SearchState};
pub use transitions::Transition;

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;

/// Commits kept in the in-memory log. Older ones are dropped first.
pub const LOG_CAPACITY: usize = 1024;

/// A committed transition and the version it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub version: u64,
    pub transition: Transition,
}

/// Receiving end of a store subscription.
pub type Subscription = mpsc::UnboundedReceiver<Arc<Commit>>;

#[derive(Debug, Default)]
struct Core {
    data: AppData,
    version: u64,
    log: VecDeque<Arc<Commit>>,
    subscribers: Vec<mpsc::UnboundedSender<Arc<Commit>>>,
}

/// Shared handle to the state tree.
#[derive(Debug, Clone, Default)]
pub struct Store {
    core: Arc<RwLock<Core>>,
}

impl Store {
    /// Creates a store seeded with `data`, at version 0.
    #[must_use]
    pub fn with_data(data: AppData) -> Self {
        Self {
            core: Arc::new(RwLock::new(Core { data, ..Core::default() })),
        }
    }

    /// Applies a transition atomically and returns the new version.
    ///
    /// Subscribers whose receiver has been dropped are pruned here.
    pub fn dispatch(&self, transition: Transition) -> u64 {
        let _span = tracing::debug_span!("dispatch", transition = transition.name()).entered();

        let mut core = self.core.write().unwrap_or_else(PoisonError::into_inner);
        transition.apply(&mut core.data);
        core.version += 1;

        let commit = Arc::new(Commit {
            version: core.version,
            transition,
        });
        if core.log.len() == LOG_CAPACITY {
            core.log.pop_front();
        }
        core.log.push_back(Arc::clone(&commit));
        core.subscribers
            .retain(|subscriber| subscriber.send(Arc::clone(&commit)).is_ok());

        tracing::trace!(version = commit.version, "transition committed");
        commit.version
    }

    /// Reads a projection of the current state.
    pub fn select<T>(&self, project: impl FnOnce(&AppData) -> T) -> T {
        let core = self.core.read().unwrap_or_else(PoisonError::into_inner);
        project(&core.data)
    }

    /// Clones the whole state tree.
    #[must_use]
    pub fn snapshot(&self) -> AppData {
        self.select(Clone::clone)
    }

    /// Registers a subscriber that receives every commit made after this call.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.core
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .push(tx);
        rx
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.core.read().unwrap_or_else(PoisonError::into_inner).version
    }

    /// The most recent [`LOG_CAPACITY`] commits, oldest first.
    #[must_use]
    pub fn log(&self) -> Vec<Arc<Commit>> {
        let core = self.core.read().unwrap_or_else(PoisonError::into_inner);
        core.log.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Filter};

    #[test]
    fn versions_and_log_follow_commit_order() {
        let store = Store::default();
        store.dispatch(Transition::SetActiveFilter(Filter::AiringNow));
        store.dispatch(Transition::RequestCategoryPage { category: Category::AiringNow, page: 1 });

        assert_eq!(store.version(), 2);
        let names: Vec<_> = store.log().iter().map(|c| c.transition.name()).collect();
        assert_eq!(names, ["setActiveFilter", "requestCategoryPage"]);
        assert!(store.select(|s| s.airing_now.loading));
    }

    #[tokio::test]
    async fn subscribers_receive_commits_after_subscribing() {
        let store = Store::default();
        store.dispatch(Transition::ToggleFavorite(1));

        let mut commits = store.subscribe();
        store.dispatch(Transition::ToggleFavorite(2));
        store.dispatch(Transition::ToggleFavorite(1));

        let first = commits.recv().await.unwrap();
        let second = commits.recv().await.unwrap();
        assert_eq!(first.version, 2);
        assert_eq!(second.transition, Transition::ToggleFavorite(1));
        assert!(commits.try_recv().is_err());
        assert_eq!(store.select(|s| s.favorites.ids().to_vec()), vec![2]);
    }

    #[test]
    fn log_keeps_only_the_most_recent_commits() {
        let store = Store::default();
        for _ in 0..LOG_CAPACITY + 5 {
            store.dispatch(Transition::ClearSearchResults);
        }

        let log = store.log();
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log[0].version, 6);
        assert_eq!(log[LOG_CAPACITY - 1].version, store.version());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let store = Store::default();
        drop(store.subscribe());
        store.dispatch(Transition::ClearSearchResults);
        assert_eq!(store.core.read().unwrap().subscribers.len(), 0);
    }
}
