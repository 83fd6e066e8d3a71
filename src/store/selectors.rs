//! Pure read projections over [`AppData`].

use super::state::{AppData, CategoryState};
use crate::domain::{Category, Filter, MovieId, MovieSummary};

/// Ids currently shown in the grid.
///
/// A searchable query wins over the filter; otherwise favorites or the
/// active category's current page.
#[must_use]
pub fn visible_movie_ids(state: &AppData) -> Vec<MovieId> {
    if state.search.is_active() {
        return state.search.result_ids.clone();
    }
    match state.active_filter.category() {
        None => state.favorites.ids().to_vec(),
        Some(category) => state
            .category(category)
            .current_ids()
            .map(<[MovieId]>::to_vec)
            .unwrap_or_default(),
    }
}

/// Visible movies, with a placeholder for ids missing from the entity cache.
#[must_use]
pub fn visible_movies(state: &AppData) -> Vec<MovieSummary> {
    visible_movie_ids(state)
        .into_iter()
        .filter(|id| *id > 0)
        .map(|id| {
            state
                .entities
                .get(&id)
                .cloned()
                .unwrap_or_else(|| MovieSummary::placeholder(id))
        })
        .collect()
}

/// The active category and its cache, unless favorites is the active filter.
#[must_use]
pub fn active_category(state: &AppData) -> Option<(Category, &CategoryState)> {
    state
        .active_filter
        .category()
        .map(|category| (category, state.category(category)))
}

/// Pagination shows for an active category while no search is running.
#[must_use]
pub fn pagination_visible(state: &AppData) -> bool {
    active_category(state).is_some() && !state.search.is_active()
}

/// Loading flag and inline error for whichever section feeds the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionStatus {
    pub loading: bool,
    pub error: Option<String>,
}

#[must_use]
pub fn section_status(state: &AppData) -> SectionStatus {
    if state.search.is_active() {
        return SectionStatus {
            loading: state.search.loading,
            error: state.search.error.clone(),
        };
    }
    active_category(state).map_or_else(SectionStatus::default, |(_, slot)| SectionStatus {
        loading: slot.loading,
        error: slot.error.clone(),
    })
}

/// Cached summaries of favorite movies, in favorites order.
#[must_use]
pub fn favorite_movies(state: &AppData) -> Vec<MovieSummary> {
    state
        .favorites
        .ids()
        .iter()
        .filter_map(|id| state.entities.get(id))
        .filter(|movie| movie.id > 0)
        .cloned()
        .collect()
}

/// Whether activating `filter` should (re-)request its current page.
///
/// True when the filter is a category that is not yet active or whose
/// current page has nothing cached.
#[must_use]
pub fn activation_needs_fetch(state: &AppData, filter: Filter) -> Option<(Category, u32)> {
    let category = filter.category()?;
    let slot = state.category(category);
    let was_active = state.active_filter == filter;
    (!was_active || !slot.has_cached_page()).then_some((category, slot.page))
}
