//! View model types representing renderable UI state.
//!
//! View models are computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! from a store snapshot plus focus state and consumed by the renderer. They
//! hold display-ready data only: windowed grid rows, formatted labels and
//! pre-computed highlight ranges.

use crate::app::DetailsButton;
use crate::focus::PageButton;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    pub footer: FooterInfo,
}

/// Route-specific part of the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Browse(BrowseView),
    Details(DetailsPanel),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// One entry of the control row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlItem {
    pub label: String,
    /// The filter currently feeding the grid.
    pub is_active: bool,
    pub is_focused: bool,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
}

/// Display information for a single movie card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardItem {
    pub title: String,
    pub year: Option<i32>,
    /// Vote average formatted to one decimal.
    pub rating: Option<String>,
    pub is_focused: bool,
    pub is_favorite: bool,

    /// Character ranges of the title matching the live query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Pagination row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub total_pages: u32,
    /// The focused button, when the pagination zone holds focus.
    pub focused: Option<PageButton>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

/// Message shown in place of an empty grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Browse screen.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseView {
    pub controls: Vec<ControlItem>,
    pub search_bar: SearchBarInfo,
    pub section_title: String,
    pub error: Option<String>,
    pub loading: bool,
    /// Visible grid rows, already windowed around the focused card.
    pub rows: Vec<Vec<CardItem>>,
    pub columns: usize,
    pub empty_state: Option<EmptyState>,
    pub pagination: Option<PaginationInfo>,
}

/// Details screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsPanel {
    pub title: String,
    /// Release date, runtime and rating, whichever are known.
    pub meta: String,
    /// Visible body lines, already scrolled.
    pub body: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_favorite: bool,
    pub focused: DetailsButton,
}
