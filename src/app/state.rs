//! Application state management and view model computation.
//!
//! [`AppState`] holds everything the terminal front end needs besides the
//! store itself: the current route, browse focus, the details cursor, grid
//! scrolling and the viewport size. View models are computed on demand from
//! a store read plus this state.

use crate::app::routes::{DetailsCursor, Route};
use crate::domain::{Filter, MovieDetails, MovieId, MovieSummary};
use crate::focus::{FocusContext, FocusState, PageInfo, Zone, CONTROL_ORDER};
use crate::store::{selectors, AppData, Store};
use crate::ui::helpers;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, BrowseView, CardItem, ControlItem, DetailsPanel, EmptyState, FooterInfo, HeaderInfo,
    PaginationInfo, SearchBarInfo, UIViewModel,
};
use crate::Config;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Terminal rows taken by everything on the browse screen except the grid.
const BROWSE_CHROME_ROWS: usize = 12;

/// Terminal rows per grid row.
pub const CARD_HEIGHT: usize = 3;

/// Terminal rows taken by everything on the details screen except the body.
const DETAILS_CHROME_ROWS: usize = 10;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared handle to the application store.
    pub store: Store,
    pub route: Route,
    /// Browse focus. Recreated with defaults whenever Browse is re-entered.
    pub focus: FocusState,
    pub details: DetailsCursor,
    /// Cards per grid row.
    pub columns: usize,
    /// First grid row shown.
    pub grid_offset: usize,
    /// Terminal height in character cells.
    pub rows: usize,
    /// Terminal width in character cells.
    pub cols: usize,
    /// How long a category control must keep focus before it activates.
    pub activation_delay: Duration,
    pub theme: Theme,
}

/// Store facts the focus machine reads, captured under one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSnapshot {
    pub visible_ids: Vec<MovieId>,
    pub pagination: Option<PageInfo>,
    pub active_filter: Filter,
    pub query_non_empty: bool,
    pub last_focused: Option<MovieId>,
}

impl FocusSnapshot {
    #[must_use]
    pub fn capture(data: &AppData) -> Self {
        let pagination = if selectors::pagination_visible(data) {
            selectors::active_category(data).map(|(category, slot)| PageInfo {
                category,
                page: slot.page,
                total_pages: slot.total_pages,
            })
        } else {
            None
        };

        Self {
            visible_ids: selectors::visible_movie_ids(data),
            pagination,
            active_filter: data.active_filter,
            query_non_empty: !data.search.query.is_empty(),
            last_focused: data.last_focused_movie_id,
        }
    }

    #[must_use]
    pub fn context(&self, columns: usize) -> FocusContext<'_> {
        FocusContext {
            visible_ids: &self.visible_ids,
            columns,
            pagination: self.pagination,
            active_filter: self.active_filter,
            query_non_empty: self.query_non_empty,
        }
    }
}

impl AppState {
    /// Creates the state for a fresh process on the Browse route.
    #[must_use]
    pub fn new(store: Store, theme: Theme, config: &Config) -> Self {
        Self {
            store,
            route: Route::Browse,
            focus: FocusState::default(),
            details: DetailsCursor::default(),
            columns: config.grid_columns.max(1),
            grid_offset: 0,
            rows: 24,
            cols: 80,
            activation_delay: Duration::from_millis(config.category_focus_delay_ms),
            theme,
        }
    }

    #[must_use]
    pub fn focus_snapshot(&self) -> FocusSnapshot {
        self.store.select(FocusSnapshot::capture)
    }

    /// Number of grid rows that fit in the viewport.
    #[must_use]
    pub fn grid_rows(&self) -> usize {
        (self.rows.saturating_sub(BROWSE_CHROME_ROWS) / CARD_HEIGHT).max(1)
    }

    /// Number of body lines that fit on the details screen.
    #[must_use]
    pub fn details_rows(&self) -> usize {
        self.rows.saturating_sub(DETAILS_CHROME_ROWS).max(1)
    }

    /// Moves the grid window the least amount that shows card `index`.
    pub fn scroll_into_view(&mut self, index: usize) {
        let row = index / self.columns.max(1);
        let visible = self.grid_rows();
        if row < self.grid_offset {
            self.grid_offset = row;
        } else if row >= self.grid_offset + visible {
            self.grid_offset = row + 1 - visible;
        }
    }

    /// Keeps the grid window inside the visible list.
    ///
    /// While the grid holds focus the focused card's row stays in view.
    pub fn clamp_grid_window(&mut self) {
        let len = self.store.select(|data| selectors::visible_movie_ids(data).len());
        let total_rows = len.div_ceil(self.columns.max(1));
        self.grid_offset = self.grid_offset.min(total_rows.saturating_sub(self.grid_rows()));
        if self.focus.zone == Zone::Grid && len > 0 {
            self.scroll_into_view(self.focus.card_index.min(len - 1));
        }
    }

    /// Largest useful scroll offset of the details body for `id`.
    #[must_use]
    pub fn details_max_scroll(&self, id: MovieId) -> usize {
        let lines = self.store.select(|data| self.details_lines(data, id)).len();
        lines.saturating_sub(self.details_rows())
    }

    /// Computes a renderable view model for the current route.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        self.store.select(|data| {
            let body = match self.route {
                Route::Browse => Body::Browse(self.browse_view(data)),
                Route::Details(id) => Body::Details(self.details_panel(data, id)),
            };
            UIViewModel {
                header: HeaderInfo {
                    title: " MovieDeck ".to_string(),
                },
                body,
                footer: self.compute_footer(),
            }
        })
    }

    fn browse_view(&self, data: &AppData) -> BrowseView {
        let movies = selectors::visible_movies(data);
        let status = selectors::section_status(data);
        let query = data.search.trimmed_query();
        let matcher = data.search.is_active().then(SkimMatcherV2::default);
        let columns = self.columns.max(1);
        let focused_card = (self.focus.zone == Zone::Grid).then_some(self.focus.card_index);

        let rows = movies
            .chunks(columns)
            .enumerate()
            .skip(self.grid_offset)
            .take(self.grid_rows())
            .map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(column, movie)| CardItem {
                        title: movie.title.clone(),
                        year: movie.release_year(),
                        rating: movie.vote_average.map(|vote| format!("{vote:.1}")),
                        is_focused: focused_card == Some(row * columns + column),
                        is_favorite: data.favorites.contains(movie.id),
                        highlight_ranges: matcher.as_ref().map_or_else(Vec::new, |m| {
                            helpers::highlight_ranges(m, &movie.title, query)
                        }),
                    })
                    .collect()
            })
            .collect();

        let controls = CONTROL_ORDER
            .iter()
            .enumerate()
            .filter_map(|(index, control)| {
                let filter = control.filter()?;
                Some(ControlItem {
                    label: control_label(filter, data),
                    is_active: data.active_filter == filter,
                    is_focused: self.focus.zone == Zone::Filters && self.focus.control_index == index,
                })
            })
            .collect();

        let pagination = selectors::pagination_visible(data)
            .then(|| selectors::active_category(data))
            .flatten()
            .map(|(_, slot)| PaginationInfo {
                page: slot.page,
                total_pages: slot.total_pages,
                focused: (self.focus.zone == Zone::Pagination).then_some(self.focus.page_button),
                previous_disabled: slot.page <= 1,
                next_disabled: slot.page >= slot.total_pages,
            });

        let empty_state = (!status.loading && movies.is_empty()).then(|| EmptyState {
            message: "No movies found for the selected criteria.".to_string(),
        });

        BrowseView {
            controls,
            search_bar: SearchBarInfo {
                query: data.search.query.clone(),
                is_focused: self.focus.zone == Zone::Search,
            },
            section_title: section_title(data),
            error: status.error,
            loading: status.loading,
            rows,
            columns,
            empty_state,
            pagination,
        }
    }

    fn details_panel(&self, data: &AppData, id: MovieId) -> DetailsPanel {
        let entry = data.details.get(&id);
        let details = entry.and_then(|entry| entry.data.as_ref());
        let summary = resolve_summary(data, details, id);

        let mut meta = Vec::new();
        if let Some(date) = &summary.release_date {
            meta.push(date.clone());
        }
        if let Some(runtime) = details.and_then(|details| details.runtime) {
            meta.push(format!("{runtime} min"));
        }
        if let Some(vote) = summary.vote_average {
            meta.push(format!("Rating {vote:.1}"));
        }

        let body = self
            .details_lines(data, id)
            .into_iter()
            .skip(self.details.scroll)
            .take(self.details_rows())
            .collect();

        DetailsPanel {
            title: summary.title,
            meta: meta.join("  ·  "),
            body,
            loading: entry.is_some_and(|entry| entry.loading),
            error: entry.and_then(|entry| entry.error.clone()),
            is_favorite: data.favorites.contains(id),
            focused: self.details.button,
        }
    }

    /// Full, wrapped body text of the details screen.
    fn details_lines(&self, data: &AppData, id: MovieId) -> Vec<String> {
        let details = data.details.get(&id).and_then(|entry| entry.data.as_ref());
        let summary = resolve_summary(data, details, id);
        let width = self.cols.saturating_sub(4).max(20);

        let mut lines = Vec::new();
        if let Some(tagline) = details.and_then(|details| details.tagline.as_deref()) {
            lines.push(format!("\"{tagline}\""));
            lines.push(String::new());
        }
        lines.extend(helpers::wrap_text(&summary.overview, width));
        if let Some(details) = details.filter(|details| !details.genres.is_empty()) {
            lines.push(String::new());
            lines.push(format!("Genres: {}", details.genres.join(", ")));
        }
        lines
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.route, self.focus.zone) {
            (Route::Details(_), _) => "↑/↓: scroll  →: switch action  Enter: activate  Esc/←: back  Ctrl+C: quit",
            (Route::Browse, Zone::Search) => {
                "Type to search  ←/→/↓: navigate  Esc: clear search  Ctrl+C: quit"
            }
            (Route::Browse, _) => {
                "Arrows: navigate  Enter: select  Esc: clear search and return to Popular  Ctrl+C: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Details record if loaded, else the cached summary, else a placeholder.
fn resolve_summary(data: &AppData, details: Option<&MovieDetails>, id: MovieId) -> MovieSummary {
    details
        .map(MovieDetails::to_summary)
        .or_else(|| data.entities.get(&id).cloned())
        .unwrap_or_else(|| MovieSummary::placeholder(id))
}

fn control_label(filter: Filter, data: &AppData) -> String {
    match filter {
        Filter::Popular => "Popular".to_string(),
        Filter::AiringNow => "Airing Now".to_string(),
        Filter::Favorites => format!("My Favorites ({})", data.favorites.len()),
    }
}

fn section_title(data: &AppData) -> String {
    if data.search.is_active() {
        return format!("Search results for \"{}\"", data.search.trimmed_query());
    }
    match data.active_filter {
        Filter::Favorites => "My Favorites".to_string(),
        Filter::Popular => "Popular Movies".to_string(),
        Filter::AiringNow => "Airing Now".to_string(),
    }
}
