//! Favorites persistence bridge.
//!
//! Hydrates the store from two persisted records on startup and writes them
//! back whenever a commit touches favorites or the entities they reference.
//! Every storage failure is logged and swallowed.

use crate::domain::{MovieId, MovieSummary};
use crate::store::{selectors, Store, Subscription, Transition};
use crate::storage::backend::KeyValueStore;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Key of the favorite id list.
pub const FAVORITE_IDS_KEY: &str = "movie-favorites";

/// Key of the cached favorite movie summaries.
pub const FAVORITE_MOVIES_KEY: &str = "movie-favorite-movies";

/// Connects a [`Store`] to a [`KeyValueStore`].
pub struct PersistenceBridge {
    store: Store,
    backend: Box<dyn KeyValueStore>,
    last_written: HashMap<&'static str, String>,
}

impl PersistenceBridge {
    #[must_use]
    pub fn new(store: Store, backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            backend,
            last_written: HashMap::new(),
        }
    }

    /// Loads persisted favorites into the store.
    ///
    /// Unreadable or malformed records load as empty. Movie summaries are
    /// only hydrated alongside a non-empty id list, filtered to those ids.
    /// The stored payloads count as already written.
    pub fn hydrate(&mut self) {
        let _span = tracing::debug_span!("hydrate_favorites").entered();

        let raw_ids = self.read(FAVORITE_IDS_KEY);
        let raw_movies = self.read(FAVORITE_MOVIES_KEY);
        let ids = normalize_ids(parse(FAVORITE_IDS_KEY, raw_ids.as_deref()));
        let mut movies = normalize_movies(parse(FAVORITE_MOVIES_KEY, raw_movies.as_deref()));

        for (key, raw) in [(FAVORITE_IDS_KEY, raw_ids), (FAVORITE_MOVIES_KEY, raw_movies)] {
            if let Some(raw) = raw {
                self.last_written.insert(key, raw);
            }
        }

        if !ids.is_empty() && !movies.is_empty() {
            let wanted: HashSet<MovieId> = ids.iter().copied().collect();
            movies.retain(|movie| wanted.contains(&movie.id));
        }

        tracing::debug!(ids = ids.len(), movies = movies.len(), "favorites loaded");

        if !ids.is_empty() && !movies.is_empty() {
            self.store.dispatch(Transition::HydrateMovieEntities(movies));
        }
        if !ids.is_empty() {
            self.store.dispatch(Transition::HydrateFavorites(ids));
        }
    }

    /// Writes both records when their serialized form changed.
    pub fn sync(&mut self) {
        let (ids, movies) = self.store.select(|state| {
            (
                serde_json::to_string(state.favorites.ids()),
                serde_json::to_string(&selectors::favorite_movies(state)),
            )
        });

        for (key, payload) in [(FAVORITE_IDS_KEY, ids), (FAVORITE_MOVIES_KEY, movies)] {
            match payload {
                Ok(payload) => self.write(key, payload),
                Err(e) => tracing::debug!(key, error = %e, "failed to serialize favorites"),
            }
        }
    }

    /// Reconciles storage after every favorites-related commit. Runs until the
    /// task is aborted.
    pub async fn run(mut self, mut commits: Subscription) {
        while let Some(commit) = commits.recv().await {
            if commit.transition.touches_favorites() {
                self.sync();
            }
        }
        tracing::debug!("persistence bridge stopped");
    }

    fn read(&self, key: &str) -> Option<String> {
        self.backend
            .get(key)
            .map_err(|e| tracing::debug!(key, error = %e, "failed to read record"))
            .ok()
            .flatten()
    }

    fn write(&mut self, key: &'static str, payload: String) {
        if self.last_written.get(key) == Some(&payload) {
            return;
        }
        match self.backend.set(key, &payload) {
            Ok(()) => {
                tracing::trace!(key, "record written");
                self.last_written.insert(key, payload);
            }
            Err(e) => tracing::debug!(key, error = %e, "failed to write record"),
        }
    }
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("last_written", &self.last_written.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn parse(key: &str, raw: Option<&str>) -> Option<Value> {
    serde_json::from_str(raw?)
        .map_err(|e| tracing::debug!(key, error = %e, "discarding malformed record"))
        .ok()
}

/// Positive integer ids in first-seen order, without duplicates.
fn normalize_ids(raw: Option<Value>) -> Vec<MovieId> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(Value::as_u64)
        .filter(|id| *id > 0 && seen.insert(*id))
        .collect()
}

/// Well-formed summaries, one per id; later duplicates replace earlier ones
/// in place.
fn normalize_movies(raw: Option<Value>) -> Vec<MovieSummary> {
    let Some(Value::Array(items)) = raw else {
        return Vec::new();
    };
    let mut movies: Vec<MovieSummary> = Vec::new();
    let mut positions: HashMap<MovieId, usize> = HashMap::new();

    for item in items {
        let Ok(movie) = serde_json::from_value::<MovieSummary>(item) else {
            continue;
        };
        if !movie.is_valid() {
            continue;
        }
        match positions.get(&movie.id) {
            Some(&at) => movies[at] = movie,
            None => {
                positions.insert(movie.id, movies.len());
                movies.push(movie);
            }
        }
    }
    movies
}
