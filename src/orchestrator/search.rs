//! Search routine.
//!
//! Every `SetSearchQuery` reschedules the debounce timer. When the quiet period
//! elapses the query present at that moment is searched: too-short queries
//! clear the search slice locally, others are marked loading, wait on the
//! sliding-window limiter, and then hit the gateway. Outcomes are committed
//! only while the answered query is still the live one.

use super::rate_limit::SlidingWindowLimiter;
use super::timers::{TimerKey, TimerTable};
use crate::domain::is_searchable_query;
use crate::gateway::MovieGateway;
use crate::store::{Store, Subscription, Transition};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::Instrument;

pub(crate) struct SearchRoutine {
    store: Store,
    gateway: Arc<dyn MovieGateway>,
    debounce: Duration,
    limiter: Arc<Mutex<SlidingWindowLimiter>>,
    timers: TimerTable<TimerKey>,
    pipelines: JoinSet<()>,
}

impl SearchRoutine {
    pub(crate) fn new(
        store: Store,
        gateway: Arc<dyn MovieGateway>,
        debounce: Duration,
        limiter: SlidingWindowLimiter,
    ) -> Self {
        Self {
            store,
            gateway,
            debounce,
            limiter: Arc::new(Mutex::new(limiter)),
            timers: TimerTable::default(),
            pipelines: JoinSet::new(),
        }
    }

    pub(crate) async fn run(mut self, mut commits: Subscription) {
        let (due_tx, mut due) = mpsc::unbounded_channel::<String>();
        loop {
            tokio::select! {
                commit = commits.recv() => {
                    let Some(commit) = commit else { break };
                    if let Transition::SetSearchQuery(text) = &commit.transition {
                        let due_tx = due_tx.clone();
                        let text = text.clone();
                        self.timers.schedule(TimerKey::SearchDebounce, self.debounce, async move {
                            let _ = due_tx.send(text);
                        });
                    }
                }
                Some(raw) = due.recv() => self.start(&raw),
                Some(_) = self.pipelines.join_next(), if !self.pipelines.is_empty() => {}
            }
        }
        tracing::debug!("search routine stopped");
    }

    fn start(&mut self, raw: &str) {
        let query = raw.trim().to_string();
        if !is_searchable_query(&query) {
            self.store.dispatch(Transition::ClearSearchResults);
            return;
        }

        self.store.dispatch(Transition::RequestSearch);

        let store = self.store.clone();
        let gateway = Arc::clone(&self.gateway);
        let limiter = Arc::clone(&self.limiter);
        let span = tracing::debug_span!("search", query = %query);
        self.pipelines.spawn(
            async move {
                limiter.lock().await.acquire().await;
                let result = gateway.search_movies(&query).await;

                let live = store.select(|state| state.search.trimmed_query() == query);
                if !live {
                    tracing::debug!("discarding stale search outcome");
                    return;
                }
                match result {
                    Ok(results) => {
                        store.dispatch(Transition::ReceiveSearchSuccess(results));
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "search failed");
                        store.dispatch(Transition::ReceiveSearchFailure(error.to_string()));
                    }
                }
            }
            .instrument(span),
        );
    }
}
