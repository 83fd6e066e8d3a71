//! Keyboard focus navigation.
//!
//! A pure state machine over four zones. [`navigate`] maps a key, the current
//! [`FocusState`] and a read-only [`FocusContext`] snapshot to the next state
//! plus a list of [`Effect`]s. The machine never touches the store or timers;
//! the application layer executes the effects.
//!
//! ```text
//!            ArrowUp (row 0)              ArrowDown (last row)
//!  ┌─────────────────────┐ ◄──────┐  ┌──────► ┌────────────┐
//!  │ filters │ search    │  grid  │  │ grid   │ pagination │
//!  └─────────────────────┘ ──────►┘  └─────── └────────────┘
//!      ArrowDown (first card)            ArrowUp (card)
//! ```

pub mod machine;

pub use machine::{navigate, reconcile, restore_on_first_paint};

use crate::domain::{Category, Filter, MovieId};

/// Region of the browse view that owns keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Zone {
    #[default]
    Filters,
    Search,
    Grid,
    Pagination,
}

impl Zone {
    /// The filters and the search box share one control row.
    #[must_use]
    pub const fn is_control_row(self) -> bool {
        matches!(self, Self::Filters | Self::Search)
    }
}

/// Keys the machine understands. Everything else is ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Tab,
}

/// Entries of the control row, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Popular,
    AiringNow,
    Favorites,
    SearchBox,
}

pub const CONTROL_ORDER: [Control; 4] = [
    Control::Popular,
    Control::AiringNow,
    Control::Favorites,
    Control::SearchBox,
];

impl Control {
    #[must_use]
    pub fn at(index: usize) -> Self {
        CONTROL_ORDER[index.min(CONTROL_ORDER.len() - 1)]
    }

    #[must_use]
    pub const fn filter(self) -> Option<Filter> {
        match self {
            Self::Popular => Some(Filter::Popular),
            Self::AiringNow => Some(Filter::AiringNow),
            Self::Favorites => Some(Filter::Favorites),
            Self::SearchBox => None,
        }
    }

    #[must_use]
    pub const fn zone(self) -> Zone {
        match self {
            Self::SearchBox => Zone::Search,
            _ => Zone::Filters,
        }
    }
}

/// Previous/next selection inside the pagination zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageButton {
    #[default]
    Previous,
    Next,
}

impl PageButton {
    const fn delta(self) -> i64 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Ephemeral focus bookkeeping for the browse view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    pub zone: Zone,
    pub control_index: usize,
    pub card_index: usize,
    pub page_button: PageButton,
    pub last_focused_movie_id: Option<MovieId>,
    /// Set once first-paint restoration has run.
    pub restored: bool,
}

/// Pagination cursor of the active category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub category: Category,
    pub page: u32,
    pub total_pages: u32,
}

/// Read-only facts the machine needs from the store and layout.
#[derive(Debug, Clone)]
pub struct FocusContext<'a> {
    pub visible_ids: &'a [MovieId],
    pub columns: usize,
    /// `Some` while pagination is visible.
    pub pagination: Option<PageInfo>,
    pub active_filter: Filter,
    pub query_non_empty: bool,
}

/// Side effects requested by a transition, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FocusControl(Control),
    FocusCard { index: usize, movie_id: MovieId },
    ScrollIntoView { index: usize },
    FocusPagination(PageButton),
    SetFocusedFilter(Filter),
    /// Make the filter the data source, fetching its page when needed.
    ActivateFilter(Filter),
    /// Start the deferred-activation timer for a focused category control.
    ScheduleActivation(Category),
    CancelActivation,
    OpenDetails(MovieId),
    ChangePage { category: Category, page: u32 },
    ClearSearchQuery,
}

/// Result of one machine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: FocusState,
    pub effects: Vec<Effect>,
}

impl Step {
    pub(crate) fn unchanged(state: &FocusState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}
