//! Category fetch routine.
//!
//! Answers `RequestCategoryPage` with a gateway fetch under latest-wins: a new
//! request aborts the fetch in flight for the same cancellation key, and an
//! outcome is only committed while its ticket is still current.

use super::latest::{LatestWins, Ticket};
use super::CancelScope;
use crate::domain::{Category, MoviePage, Result};
use crate::gateway::MovieGateway;
use crate::store::{Store, Subscription, Transition};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

/// `None` when every category shares one cancellation key.
type ScopeKey = Option<Category>;

struct Outcome {
    ticket: Ticket<ScopeKey>,
    category: Category,
    page: u32,
    result: Result<MoviePage>,
}

pub(crate) struct CategoryRoutine {
    store: Store,
    gateway: Arc<dyn MovieGateway>,
    scope: CancelScope,
    latest: LatestWins<ScopeKey>,
}

impl CategoryRoutine {
    pub(crate) fn new(store: Store, gateway: Arc<dyn MovieGateway>, scope: CancelScope) -> Self {
        Self {
            store,
            gateway,
            scope,
            latest: LatestWins::default(),
        }
    }

    pub(crate) async fn run(mut self, mut commits: Subscription) {
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
        loop {
            tokio::select! {
                commit = commits.recv() => {
                    let Some(commit) = commit else { break };
                    if let Transition::RequestCategoryPage { category, page } = commit.transition {
                        self.start(category, page, &outcome_tx);
                    }
                }
                Some(outcome) = outcomes.recv() => self.commit(outcome),
            }
        }
        tracing::debug!("category routine stopped");
    }

    const fn key(&self, category: Category) -> ScopeKey {
        match self.scope {
            CancelScope::Global => None,
            CancelScope::PerCategory => Some(category),
        }
    }

    fn start(&mut self, category: Category, page: u32, outcomes: &mpsc::UnboundedSender<Outcome>) {
        let ticket = self.latest.begin(self.key(category));
        tracing::debug!(%category, page, generation = ticket.generation, "fetching category page");

        let gateway = Arc::clone(&self.gateway);
        let outcomes = outcomes.clone();
        let task_ticket = ticket.clone();
        let handle = tokio::spawn(
            async move {
                let result = gateway.fetch_category_page(category, page).await;
                let _ = outcomes.send(Outcome {
                    ticket: task_ticket,
                    category,
                    page,
                    result,
                });
            }
            .instrument(tracing::debug_span!("category_fetch", %category, page)),
        );
        self.latest.track(&ticket, handle);
    }

    fn commit(&mut self, outcome: Outcome) {
        if !self.latest.settle(&outcome.ticket) {
            tracing::debug!(
                category = %outcome.category,
                page = outcome.page,
                "discarding superseded category page"
            );
            return;
        }

        let category = outcome.category;
        match outcome.result {
            Ok(page) => {
                self.store
                    .dispatch(Transition::ReceiveCategoryPageSuccess { category, page });
            }
            Err(error) => {
                tracing::warn!(%category, page = outcome.page, error = %error, "category fetch failed");
                self.store.dispatch(Transition::ReceiveCategoryPageFailure {
                    category,
                    error: error.to_string(),
                });
            }
        }
    }
}
