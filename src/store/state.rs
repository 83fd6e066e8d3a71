//! The application state tree.
//!
//! [`AppData`] is only ever mutated by [`Transition::apply`](super::Transition::apply)
//! under the store's write lock. Every other component reads it through
//! [`Store::select`](super::Store::select).

use super::favorites::FavoritesState;
use crate::domain::{is_searchable_query, Category, Filter, MovieDetails, MovieId, MovieSummary};
use std::collections::{BTreeMap, HashMap};

/// Pagination cache for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryState {
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    /// Populated only by a successful fetch of that exact page.
    pub page_to_movie_ids: BTreeMap<u32, Vec<MovieId>>,
}

impl Default for CategoryState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            loading: false,
            error: None,
            page_to_movie_ids: BTreeMap::new(),
        }
    }
}

impl CategoryState {
    /// Ids cached for the current page, if that page has been fetched.
    #[must_use]
    pub fn current_ids(&self) -> Option<&[MovieId]> {
        self.page_to_movie_ids.get(&self.page).map(Vec::as_slice)
    }

    /// `true` when the current page is cached with at least one movie.
    #[must_use]
    pub fn has_cached_page(&self) -> bool {
        self.current_ids().is_some_and(|ids| !ids.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Raw text as typed, untrimmed.
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub result_ids: Vec<MovieId>,
}

impl SearchState {
    #[must_use]
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    /// Search results take over the grid once the query is searchable.
    #[must_use]
    pub fn is_active(&self) -> bool {
        is_searchable_query(&self.query)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsState {
    /// Survives failed re-fetches.
    pub data: Option<MovieDetails>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Root of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct AppData {
    pub entities: HashMap<MovieId, MovieSummary>,
    pub popular: CategoryState,
    pub airing_now: CategoryState,
    pub search: SearchState,
    pub details: HashMap<MovieId, DetailsState>,
    pub favorites: FavoritesState,
    pub active_filter: Filter,
    pub focused_filter: Filter,
    pub last_focused_movie_id: Option<MovieId>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            popular: CategoryState::default(),
            airing_now: CategoryState::default(),
            search: SearchState::default(),
            details: HashMap::new(),
            favorites: FavoritesState::default(),
            active_filter: Filter::Popular,
            focused_filter: Filter::Popular,
            last_focused_movie_id: None,
        }
    }
}

impl AppData {
    #[must_use]
    pub const fn category(&self, category: Category) -> &CategoryState {
        match category {
            Category::Popular => &self.popular,
            Category::AiringNow => &self.airing_now,
        }
    }

    pub(crate) fn category_mut(&mut self, category: Category) -> &mut CategoryState {
        match category {
            Category::Popular => &mut self.popular,
            Category::AiringNow => &mut self.airing_now,
        }
    }

    /// Cached detail record for `id`, if one was fetched successfully.
    #[must_use]
    pub fn cached_details(&self, id: MovieId) -> Option<&MovieDetails> {
        self.details.get(&id).and_then(|entry| entry.data.as_ref())
    }

    pub(crate) fn index_movies<'a, I>(&mut self, movies: I)
    where
        I: IntoIterator<Item = &'a MovieSummary>,
    {
        for movie in movies {
            if movie.is_valid() {
                self.entities.insert(movie.id, movie.clone());
            }
        }
    }
}
