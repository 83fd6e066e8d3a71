//! Async orchestrator.
//!
//! Three always-on routines bridge store requests to the gateway. Each owns a
//! store subscription and reacts to exactly one class of transition:
//!
//! | Routine  | Listens for           | Policy                                    |
//! |----------|-----------------------|-------------------------------------------|
//! | category | `RequestCategoryPage` | latest-wins per [`CancelScope`]           |
//! | search   | `SetSearchQuery`      | debounce, sliding-window limit, stale drop |
//! | details  | `RequestMovieDetails` | cache short-circuit, latest-wins per id   |
//!
//! Routines never talk to the UI or the focus machine directly; results flow
//! back exclusively as store transitions, and every gateway failure becomes an
//! error field on the relevant slice.
//!
//! # Example
//!
//! ```rust,no_run
//! use moviedeck::gateway::TmdbGateway;
//! use moviedeck::orchestrator::{Orchestrator, OrchestratorConfig};
//! use moviedeck::store::{Store, Transition};
//! use moviedeck::domain::Category;
//! use std::sync::Arc;
//!
//! # async fn demo(gateway: TmdbGateway) {
//! let store = Store::default();
//! let orchestrator = Orchestrator::spawn(&store, Arc::new(gateway), OrchestratorConfig::default());
//! store.dispatch(Transition::RequestCategoryPage { category: Category::Popular, page: 1 });
//! # orchestrator.shutdown();
//! # }
//! ```

pub mod latest;
pub mod rate_limit;
pub mod timers;

mod category;
mod details;
mod search;

pub use latest::{LatestWins, Ticket};
pub use rate_limit::SlidingWindowLimiter;
pub use timers::{TimerKey, TimerTable};

use crate::gateway::MovieGateway;
use crate::store::Store;
use crate::Config;
use category::CategoryRoutine;
use details::DetailsRoutine;
use search::SearchRoutine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Which category fetches cancel each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelScope {
    /// A request for one category never cancels the other's fetch.
    #[default]
    PerCategory,
    /// Any new category request cancels whatever fetch is in flight.
    Global,
}

/// Timing and concurrency policy for the routines.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub search_debounce: Duration,
    pub search_max_requests: usize,
    pub search_window: Duration,
    pub cancel_scope: CancelScope,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(500),
            search_max_requests: 5,
            search_window: Duration::from_secs(10),
            cancel_scope: CancelScope::PerCategory,
        }
    }
}

impl From<&Config> for OrchestratorConfig {
    fn from(config: &Config) -> Self {
        Self {
            search_debounce: Duration::from_millis(config.search_debounce_ms),
            search_max_requests: config.search_max_requests,
            search_window: Duration::from_millis(config.search_window_ms),
            cancel_scope: config.cancel_scope,
        }
    }
}

/// Handle to the running routines. Dropping it stops them.
#[derive(Debug)]
pub struct Orchestrator {
    routines: Vec<JoinHandle<()>>,
}

impl Orchestrator {
    /// Subscribes the routines to `store` and spawns them on the current runtime.
    ///
    /// Subscriptions are taken before this returns, so any transition
    /// dispatched afterwards is seen.
    #[must_use]
    pub fn spawn(store: &Store, gateway: Arc<dyn MovieGateway>, config: OrchestratorConfig) -> Self {
        tracing::debug!(
            cancel_scope = ?config.cancel_scope,
            debounce_ms = config.search_debounce.as_millis() as u64,
            "starting orchestrator"
        );

        let category = CategoryRoutine::new(store.clone(), Arc::clone(&gateway), config.cancel_scope);
        let search = SearchRoutine::new(
            store.clone(),
            Arc::clone(&gateway),
            config.search_debounce,
            SlidingWindowLimiter::new(config.search_max_requests, config.search_window),
        );
        let details = DetailsRoutine::new(store.clone(), gateway);

        let routines = vec![
            tokio::spawn(category.run(store.subscribe())),
            tokio::spawn(search.run(store.subscribe())),
            tokio::spawn(details.run(store.subscribe())),
        ];
        Self { routines }
    }

    /// Stops every routine along with its in-flight fetches and timers.
    pub fn shutdown(mut self) {
        self.abort_all();
    }

    fn abort_all(&mut self) {
        for routine in self.routines.drain(..) {
            routine.abort();
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests;
