//! Named state transitions.
//!
//! Each [`Transition`] variant is one reducer. [`Transition::apply`] performs no
//! I/O and never fails; the store applies it atomically under its write lock and
//! appends it to the transition log. Routines in the orchestrator subscribe to
//! the `Request*` and `SetSearchQuery` variants and answer with the matching
//! `Receive*` variants.

use super::state::{AppData, DetailsState};
use crate::domain::{
    is_searchable_query, Category, Filter, MovieDetails, MovieId, MoviePage, MovieSummary,
    SearchResults,
};

/// A request to change the state tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SetActiveFilter(Filter),
    SetFocusedFilter(Filter),
    SetLastFocusedMovieId(Option<MovieId>),
    /// Moves the category cursor without fetching.
    SetCategoryPage { category: Category, page: u32 },
    /// Marks the category as loading. The category routine performs the fetch.
    RequestCategoryPage { category: Category, page: u32 },
    ReceiveCategoryPageSuccess { category: Category, page: MoviePage },
    ReceiveCategoryPageFailure { category: Category, error: String },
    HydrateMovieEntities(Vec<MovieSummary>),
    SetSearchQuery(String),
    ClearSearchResults,
    RequestSearch,
    ReceiveSearchSuccess(SearchResults),
    ReceiveSearchFailure(String),
    RequestMovieDetails(MovieId),
    ReceiveMovieDetailsSuccess(MovieDetails),
    ReceiveMovieDetailsFailure { id: MovieId, error: String },
    HydrateFavorites(Vec<MovieId>),
    ToggleFavorite(MovieId),
}

impl Transition {
    /// Stable name used in logs and spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetActiveFilter(_) => "setActiveFilter",
            Self::SetFocusedFilter(_) => "setFocusedFilter",
            Self::SetLastFocusedMovieId(_) => "setLastFocusedMovieId",
            Self::SetCategoryPage { .. } => "setCategoryPage",
            Self::RequestCategoryPage { .. } => "requestCategoryPage",
            Self::ReceiveCategoryPageSuccess { .. } => "receiveCategoryPageSuccess",
            Self::ReceiveCategoryPageFailure { .. } => "receiveCategoryPageFailure",
            Self::HydrateMovieEntities(_) => "hydrateMovieEntities",
            Self::SetSearchQuery(_) => "setSearchQuery",
            Self::ClearSearchResults => "clearSearchResults",
            Self::RequestSearch => "requestSearch",
            Self::ReceiveSearchSuccess(_) => "receiveSearchSuccess",
            Self::ReceiveSearchFailure(_) => "receiveSearchFailure",
            Self::RequestMovieDetails(_) => "requestMovieDetails",
            Self::ReceiveMovieDetailsSuccess(_) => "receiveMovieDetailsSuccess",
            Self::ReceiveMovieDetailsFailure { .. } => "receiveMovieDetailsFailure",
            Self::HydrateFavorites(_) => "hydrateFavorites",
            Self::ToggleFavorite(_) => "toggleFavorite",
        }
    }

    /// `true` when the transition can change the favorite ids or the entities
    /// backing them.
    #[must_use]
    pub const fn touches_favorites(&self) -> bool {
        matches!(
            self,
            Self::ToggleFavorite(_)
                | Self::HydrateFavorites(_)
                | Self::HydrateMovieEntities(_)
                | Self::ReceiveCategoryPageSuccess { .. }
                | Self::ReceiveSearchSuccess(_)
                | Self::ReceiveMovieDetailsSuccess(_)
        )
    }

    /// Applies the transition in place.
    #[allow(clippy::too_many_lines)]
    pub fn apply(&self, state: &mut AppData) {
        match self {
            Self::SetActiveFilter(filter) => state.active_filter = *filter,
            Self::SetFocusedFilter(filter) => state.focused_filter = *filter,
            Self::SetLastFocusedMovieId(id) => state.last_focused_movie_id = id.filter(|id| *id > 0),
            Self::SetCategoryPage { category, page } => {
                state.category_mut(*category).page = (*page).max(1);
            }
            Self::RequestCategoryPage { category, .. } => {
                let slot = state.category_mut(*category);
                slot.loading = true;
                slot.error = None;
            }
            Self::ReceiveCategoryPageSuccess { category, page } => {
                let page_number = page.page.max(1);
                let slot = state.category_mut(*category);
                slot.loading = false;
                slot.error = None;
                slot.page = page_number;
                slot.total_pages = page.total_pages.max(1);
                slot.page_to_movie_ids.insert(
                    page_number,
                    page.results
                        .iter()
                        .filter(|movie| movie.id > 0)
                        .map(|movie| movie.id)
                        .collect(),
                );
                state.index_movies(&page.results);
            }
            Self::ReceiveCategoryPageFailure { category, error } => {
                let slot = state.category_mut(*category);
                slot.loading = false;
                slot.error = Some(error.clone());
            }
            Self::HydrateMovieEntities(movies) => state.index_movies(movies),
            Self::SetSearchQuery(text) => {
                state.search.query.clone_from(text);
                if !is_searchable_query(text) {
                    clear_search(state);
                }
            }
            Self::ClearSearchResults => clear_search(state),
            Self::RequestSearch => {
                state.search.loading = true;
                state.search.error = None;
            }
            Self::ReceiveSearchSuccess(results) => {
                if state.search.trimmed_query() != results.query.trim() {
                    tracing::debug!(
                        answered = %results.query,
                        live = %state.search.query,
                        "discarding stale search results"
                    );
                    return;
                }
                state.search.loading = false;
                state.search.error = None;
                state.search.result_ids = results
                    .results
                    .iter()
                    .filter(|movie| movie.id > 0)
                    .map(|movie| movie.id)
                    .collect();
                state.index_movies(&results.results);
            }
            Self::ReceiveSearchFailure(error) => {
                state.search.loading = false;
                state.search.error = Some(error.clone());
            }
            Self::RequestMovieDetails(id) => {
                let entry = state.details.entry(*id).or_default();
                entry.loading = true;
                entry.error = None;
            }
            Self::ReceiveMovieDetailsSuccess(details) => {
                let summary = details.to_summary();
                state.details.insert(
                    details.id(),
                    DetailsState {
                        data: Some(details.clone()),
                        loading: false,
                        error: None,
                    },
                );
                if summary.is_valid() {
                    state.entities.insert(summary.id, summary);
                }
            }
            Self::ReceiveMovieDetailsFailure { id, error } => {
                let entry = state.details.entry(*id).or_default();
                entry.loading = false;
                entry.error = Some(error.clone());
            }
            Self::HydrateFavorites(ids) => state.favorites.hydrate(ids),
            Self::ToggleFavorite(id) => state.favorites.toggle(*id),
        }
    }
}

fn clear_search(state: &mut AppData) {
    state.search.loading = false;
    state.search.error = None;
    state.search.result_ids.clear();
}
