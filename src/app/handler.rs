//! Event handling and effect execution.
//!
//! [`handle_event`] is the single entry point for everything the runtime loop
//! observes: key presses, typed characters, the deferred-activation timer
//! firing, store commits and terminal resizes. Browse keys go through the
//! focus machine; the effects it returns are executed here against the
//! store. Timer and exit requests are returned as [`Action`]s.
//!
//! # Example
//!
//! ```rust
//! use moviedeck::app::{handle_event, Action, AppState, Event};
//! use moviedeck::focus::Key;
//! use moviedeck::store::Store;
//! use moviedeck::ui::Theme;
//! use moviedeck::Config;
//!
//! let mut state = AppState::new(Store::default(), Theme::default(), &Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Key(Key::Right))?;
//! assert!(actions.iter().any(|a| matches!(a, Action::ScheduleActivation { .. })));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::routes::{DetailsButton, DetailsCursor, Route};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Category, Filter, MovieId};
use crate::focus::{self, Control, Effect, FocusState, Key, Step, Zone};
use crate::store::{selectors, Transition};

/// Lines scrolled per arrow press on the details screen.
const DETAILS_SCROLL_STEP: usize = 3;

/// Events observed by the runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The browse screen was shown for the first time.
    Mount,
    /// A navigation key.
    Key(Key),
    /// A printable character.
    Char(char),
    Backspace,
    /// The deferred-activation timer for `Category` elapsed.
    ActivationElapsed(Category),
    /// The store committed a transition.
    StoreChanged,
    Resize { rows: usize, cols: usize },
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the frame needs to be redrawn.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime loop uniform.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match (event, state.route) {
        (Event::Quit, _) => Ok((false, vec![Action::Quit])),
        (Event::Mount, _) => {
            state.store.dispatch(Transition::RequestCategoryPage {
                category: Category::Popular,
                page: 1,
            });
            Ok((true, settle_focus(state)))
        }
        (Event::Resize { rows, cols }, _) => {
            state.rows = *rows;
            state.cols = *cols;
            if state.focus.zone == Zone::Grid {
                state.scroll_into_view(state.focus.card_index);
            }
            Ok((true, vec![]))
        }
        (Event::StoreChanged, Route::Browse) => Ok((true, settle_focus(state))),
        (Event::StoreChanged, Route::Details(_)) => Ok((true, vec![])),
        (Event::Key(key), Route::Browse) => {
            let snapshot = state.focus_snapshot();
            let step = focus::navigate(&state.focus, *key, &snapshot.context(state.columns));
            Ok((true, apply_step(state, step)))
        }
        (Event::Key(key), Route::Details(id)) => Ok(handle_details_key(state, *key, id)),
        (Event::Char(c), Route::Browse) if state.focus.zone == Zone::Search && !c.is_control() => {
            let mut query = state.store.select(|data| data.search.query.clone());
            query.push(*c);
            state.store.dispatch(Transition::SetSearchQuery(query));
            state.clamp_grid_window();
            Ok((true, vec![]))
        }
        (Event::Backspace, Route::Browse) if state.focus.zone == Zone::Search => {
            let mut query = state.store.select(|data| data.search.query.clone());
            if query.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.store.dispatch(Transition::SetSearchQuery(query));
            state.clamp_grid_window();
            Ok((true, vec![]))
        }
        (Event::ActivationElapsed(category), Route::Browse) => Ok((activate_deferred(state, *category), vec![])),
        _ => Ok((false, vec![])),
    }
}

/// Runs first-paint restoration, or re-validates focus once it has run.
fn settle_focus(state: &mut AppState) -> Vec<Action> {
    let snapshot = state.focus_snapshot();
    let ctx = snapshot.context(state.columns);
    let step = focus::restore_on_first_paint(&state.focus, &ctx, snapshot.last_focused)
        .unwrap_or_else(|| focus::reconcile(&state.focus, &ctx));
    apply_step(state, step)
}

/// Adopts the step's state and executes its effects in order.
fn apply_step(state: &mut AppState, step: Step) -> Vec<Action> {
    state.focus = step.state;
    let mut actions = Vec::new();

    for effect in step.effects {
        tracing::trace!(?effect, "executing focus effect");
        match effect {
            Effect::FocusControl(_) | Effect::FocusPagination(_) => {}
            Effect::FocusCard { movie_id, .. } => remember_card(state, movie_id),
            Effect::ScrollIntoView { index } => state.scroll_into_view(index),
            Effect::SetFocusedFilter(filter) => {
                state.store.dispatch(Transition::SetFocusedFilter(filter));
            }
            Effect::ActivateFilter(filter) => activate_filter(state, filter),
            Effect::ScheduleActivation(category) => actions.push(Action::ScheduleActivation {
                category,
                delay: state.activation_delay,
            }),
            Effect::CancelActivation => actions.push(Action::CancelActivation),
            Effect::OpenDetails(id) => {
                actions.push(Action::CancelActivation);
                open_details(state, id);
            }
            Effect::ChangePage { category, page } => {
                state.store.dispatch(Transition::SetCategoryPage { category, page });
                state.store.dispatch(Transition::RequestCategoryPage { category, page });
                state.grid_offset = 0;
            }
            Effect::ClearSearchQuery => {
                state.store.dispatch(Transition::SetSearchQuery(String::new()));
            }
        }
    }

    state.clamp_grid_window();
    actions
}

fn remember_card(state: &AppState, movie_id: MovieId) {
    let current = state.store.select(|data| data.last_focused_movie_id);
    if current != Some(movie_id) {
        state.store.dispatch(Transition::SetLastFocusedMovieId(Some(movie_id)));
    }
}

/// Makes `filter` the data source, requesting its page unless it was
/// already active with that page cached.
fn activate_filter(state: &mut AppState, filter: Filter) {
    let fetch = state.store.select(|data| selectors::activation_needs_fetch(data, filter));
    state.store.dispatch(Transition::SetActiveFilter(filter));
    if let Some((category, page)) = fetch {
        state.store.dispatch(Transition::RequestCategoryPage { category, page });
    }
    state.grid_offset = 0;
}

/// Timer-driven activation. Ignored if focus moved on or the category became
/// active in the meantime.
fn activate_deferred(state: &mut AppState, category: Category) -> bool {
    let filter = Filter::from(category);
    let still_focused = state.focus.zone == Zone::Filters
        && Control::at(state.focus.control_index).filter() == Some(filter);
    let (active, page) = state
        .store
        .select(|data| (data.active_filter, data.category(category).page));

    if !still_focused || active == filter {
        tracing::debug!(category = %category, "ignoring stale category activation");
        return false;
    }

    tracing::debug!(category = %category, page, "activating focused category");
    state.store.dispatch(Transition::SetActiveFilter(filter));
    state.store.dispatch(Transition::RequestCategoryPage { category, page });
    state.grid_offset = 0;
    true
}

fn open_details(state: &mut AppState, id: MovieId) {
    remember_card(state, id);
    state.route = Route::Details(id);
    state.details = DetailsCursor::default();
    state.store.dispatch(Transition::RequestMovieDetails(id));
}

fn back_to_browse(state: &mut AppState) -> Vec<Action> {
    state.route = Route::Browse;
    state.focus = FocusState::default();
    state.grid_offset = 0;
    settle_focus(state)
}

fn handle_details_key(state: &mut AppState, key: Key, id: MovieId) -> (bool, Vec<Action>) {
    match key {
        Key::Up => {
            state.details.scroll = state.details.scroll.saturating_sub(DETAILS_SCROLL_STEP);
            (true, vec![])
        }
        Key::Down => {
            let max = state.details_max_scroll(id);
            state.details.scroll = (state.details.scroll + DETAILS_SCROLL_STEP).min(max);
            (true, vec![])
        }
        Key::Escape | Key::Left => (true, back_to_browse(state)),
        Key::Right => {
            state.details.button = state.details.button.toggled();
            (true, vec![])
        }
        Key::Enter => match state.details.button {
            DetailsButton::Back => (true, back_to_browse(state)),
            DetailsButton::Favorite => {
                state.store.dispatch(Transition::ToggleFavorite(id));
                (true, vec![])
            }
        },
        Key::Tab => (false, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MoviePage, MovieSummary, SearchResults};
    use crate::store::Store;
    use crate::ui::Theme;
    use crate::Config;
    use std::time::Duration;

    fn page(category: Category, number: u32, ids: &[MovieId]) -> Transition {
        Transition::ReceiveCategoryPageSuccess {
            category,
            page: MoviePage {
                page: number,
                total_pages: 4,
                results: ids
                    .iter()
                    .map(|&id| MovieSummary {
                        title: format!("Movie {id}"),
                        ..MovieSummary::placeholder(id)
                    })
                    .collect(),
            },
        }
    }

    fn app() -> AppState {
        AppState::new(Store::default(), Theme::default(), &Config::default())
    }

    fn press(state: &mut AppState, key: Key) -> Vec<Action> {
        handle_event(state, &Event::Key(key)).unwrap().1
    }

    fn requested(state: &AppState) -> Vec<(Category, u32)> {
        state
            .store
            .log()
            .iter()
            .filter_map(|commit| match commit.transition {
                Transition::RequestCategoryPage { category, page } => Some((category, page)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn mount_requests_first_popular_page() {
        let mut state = app();
        handle_event(&mut state, &Event::Mount).unwrap();

        assert_eq!(requested(&state), vec![(Category::Popular, 1)]);
        assert!(state.focus.restored);
        assert_eq!(state.focus.zone, Zone::Filters);
    }

    #[test]
    fn focusing_other_category_schedules_then_activates() {
        let mut state = app();
        handle_event(&mut state, &Event::Mount).unwrap();

        let actions = press(&mut state, Key::Right);
        assert!(actions.contains(&Action::ScheduleActivation {
            category: Category::AiringNow,
            delay: Duration::from_millis(2000),
        }));
        assert_eq!(state.store.select(|d| d.focused_filter), Filter::AiringNow);
        assert_eq!(state.store.select(|d| d.active_filter), Filter::Popular);

        let (render, _) =
            handle_event(&mut state, &Event::ActivationElapsed(Category::AiringNow)).unwrap();
        assert!(render);
        assert_eq!(state.store.select(|d| d.active_filter), Filter::AiringNow);
        assert_eq!(requested(&state).last(), Some(&(Category::AiringNow, 1)));
    }

    #[test]
    fn stale_activation_is_ignored() {
        let mut state = app();
        handle_event(&mut state, &Event::Mount).unwrap();
        press(&mut state, Key::Right);
        press(&mut state, Key::Right);

        let (render, _) =
            handle_event(&mut state, &Event::ActivationElapsed(Category::AiringNow)).unwrap();

        assert!(!render);
        assert_eq!(state.store.select(|d| d.active_filter), Filter::Popular);
    }

    #[test]
    fn enter_on_active_cached_filter_skips_fetch() {
        let mut state = app();
        state.store.dispatch(page(Category::Popular, 1, &[1, 2]));
        handle_event(&mut state, &Event::Mount).unwrap();

        press(&mut state, Key::Enter);
        assert_eq!(requested(&state), vec![(Category::Popular, 1)]);

        press(&mut state, Key::Right);
        press(&mut state, Key::Enter);
        assert_eq!(
            requested(&state),
            vec![(Category::Popular, 1), (Category::AiringNow, 1)]
        );
    }

    #[test]
    fn typing_only_edits_query_inside_search_box() {
        let mut state = app();
        handle_event(&mut state, &Event::Mount).unwrap();

        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);

        for _ in 0..3 {
            press(&mut state, Key::Right);
        }
        assert_eq!(state.focus.zone, Zone::Search);
        for c in "dune".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.store.select(|d| d.search.query.clone()), "dun");

        press(&mut state, Key::Escape);
        assert_eq!(state.store.select(|d| d.search.query.clone()), "");
        assert_eq!(state.focus.control_index, 0);
    }

    #[test]
    fn clearing_search_brings_grid_window_back_to_shorter_list() {
        let mut state = app();
        state.store.dispatch(page(Category::Popular, 1, &[1, 2, 3, 4, 5, 6, 7, 8]));
        handle_event(&mut state, &Event::Mount).unwrap();

        state.store.dispatch(Transition::SetSearchQuery("matrix".into()));
        state.store.dispatch(Transition::ReceiveSearchSuccess(SearchResults {
            query: "matrix".into(),
            results: (100..140)
                .map(|id| MovieSummary {
                    title: format!("Matrix {id}"),
                    ..MovieSummary::placeholder(id)
                })
                .collect(),
        }));
        handle_event(&mut state, &Event::StoreChanged).unwrap();

        for _ in 0..10 {
            press(&mut state, Key::Down);
        }
        assert_eq!(state.focus.card_index, 36);
        assert_eq!(state.grid_offset, 6);

        press(&mut state, Key::Escape);

        assert_eq!(state.store.select(|d| d.search.query.clone()), "");
        assert_eq!(state.grid_offset, 0);
        match state.compute_viewmodel().body {
            crate::ui::Body::Browse(view) => assert_eq!(view.rows.len(), 2),
            crate::ui::Body::Details(_) => panic!("expected the browse screen"),
        }
    }

    #[test]
    fn opening_details_and_returning_restores_card() {
        let mut state = app();
        state.store.dispatch(page(Category::Popular, 1, &[11, 12, 13, 14, 15, 16]));
        handle_event(&mut state, &Event::Mount).unwrap();

        press(&mut state, Key::Down);
        press(&mut state, Key::Right);
        let actions = press(&mut state, Key::Enter);

        assert!(actions.contains(&Action::CancelActivation));
        assert_eq!(state.route, Route::Details(12));
        assert_eq!(state.store.select(|d| d.last_focused_movie_id), Some(12));
        assert!(state.store.select(|d| d.details[&12].loading));

        press(&mut state, Key::Escape);
        assert_eq!(state.route, Route::Browse);
        assert_eq!(state.focus.zone, Zone::Grid);
        assert_eq!(state.focus.card_index, 1);
    }

    #[test]
    fn details_actions_toggle_favorite_and_go_back() {
        let mut state = app();
        state.route = Route::Details(5);

        press(&mut state, Key::Right);
        assert_eq!(state.details.button, DetailsButton::Favorite);
        press(&mut state, Key::Enter);
        assert!(state.store.select(|d| d.favorites.contains(5)));

        press(&mut state, Key::Right);
        press(&mut state, Key::Enter);
        assert_eq!(state.route, Route::Browse);
    }

    #[test]
    fn details_scroll_is_bounded() {
        let mut state = app();
        state.route = Route::Details(5);

        press(&mut state, Key::Down);
        assert_eq!(state.details.scroll, 0);
        press(&mut state, Key::Up);
        assert_eq!(state.details.scroll, 0);
    }

    #[test]
    fn pagination_enter_requests_next_page() {
        let mut state = app();
        state.store.dispatch(page(Category::Popular, 1, &[1, 2, 3]));
        handle_event(&mut state, &Event::Mount).unwrap();

        press(&mut state, Key::Down);
        press(&mut state, Key::Down);
        assert_eq!(state.focus.zone, Zone::Pagination);
        press(&mut state, Key::Right);
        press(&mut state, Key::Enter);

        assert_eq!(state.store.select(|d| d.popular.page), 2);
        assert_eq!(requested(&state).last(), Some(&(Category::Popular, 2)));
        assert_eq!(state.focus.card_index, 0);
    }

    #[test]
    fn quit_is_forwarded() {
        let mut state = app();
        assert_eq!(
            handle_event(&mut state, &Event::Quit).unwrap(),
            (false, vec![Action::Quit])
        );
    }
}
