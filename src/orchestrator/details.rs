//! Details routine.
//!
//! Cached detail records short-circuit the network and are re-emitted as a
//! success so loading flags clear. Otherwise fetches run latest-wins per
//! movie id.

use super::latest::{LatestWins, Ticket};
use crate::domain::{MovieDeckError, MovieDetails, MovieId, Result};
use crate::gateway::MovieGateway;
use crate::store::{Store, Subscription, Transition};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

struct Outcome {
    ticket: Ticket<MovieId>,
    result: Result<MovieDetails>,
}

pub(crate) struct DetailsRoutine {
    store: Store,
    gateway: Arc<dyn MovieGateway>,
    latest: LatestWins<MovieId>,
}

impl DetailsRoutine {
    pub(crate) fn new(store: Store, gateway: Arc<dyn MovieGateway>) -> Self {
        Self {
            store,
            gateway,
            latest: LatestWins::default(),
        }
    }

    pub(crate) async fn run(mut self, mut commits: Subscription) {
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
        loop {
            tokio::select! {
                commit = commits.recv() => {
                    let Some(commit) = commit else { break };
                    if let Transition::RequestMovieDetails(id) = commit.transition {
                        self.start(id, &outcome_tx);
                    }
                }
                Some(outcome) = outcomes.recv() => self.commit(outcome),
            }
        }
        tracing::debug!("details routine stopped");
    }

    fn start(&mut self, id: MovieId, outcomes: &mpsc::UnboundedSender<Outcome>) {
        if id == 0 {
            let error = MovieDeckError::Validation("Invalid movie id.".to_string());
            self.store.dispatch(Transition::ReceiveMovieDetailsFailure {
                id,
                error: error.to_string(),
            });
            return;
        }

        if let Some(cached) = self.store.select(|state| state.cached_details(id).cloned()) {
            tracing::debug!(movie_id = id, "details served from cache");
            self.store.dispatch(Transition::ReceiveMovieDetailsSuccess(cached));
            return;
        }

        let ticket = self.latest.begin(id);
        let gateway = Arc::clone(&self.gateway);
        let outcomes = outcomes.clone();
        let task_ticket = ticket.clone();
        let handle = tokio::spawn(
            async move {
                let result = gateway.fetch_movie_details(id).await;
                let _ = outcomes.send(Outcome {
                    ticket: task_ticket,
                    result,
                });
            }
            .instrument(tracing::debug_span!("details_fetch", movie_id = id)),
        );
        self.latest.track(&ticket, handle);
    }

    fn commit(&mut self, outcome: Outcome) {
        let id = outcome.ticket.key;
        if !self.latest.settle(&outcome.ticket) {
            tracing::debug!(movie_id = id, "discarding superseded details");
            return;
        }
        match outcome.result {
            Ok(details) => {
                self.store.dispatch(Transition::ReceiveMovieDetailsSuccess(details));
            }
            Err(error) => {
                tracing::warn!(movie_id = id, error = %error, "details fetch failed");
                self.store.dispatch(Transition::ReceiveMovieDetailsFailure {
                    id,
                    error: error.to_string(),
                });
            }
        }
    }
}
