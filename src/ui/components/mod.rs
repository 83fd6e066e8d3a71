//! Composable UI component renderers.
//!
//! Each component writes one part of the frame into the shared buffer at an
//! absolute position and returns the next free row where that is useful.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`controls`]: Filter buttons and the search box
//! - [`grid`]: Movie cards
//! - [`pagination`]: Previous/next page row
//! - [`details`]: Details screen body and buttons
//! - [`empty`]: Empty-grid message and status lines
//!
//! # Layouts
//!
//! ```text
//! Browse                          Details
//! ───────────────────────────     ───────────────────────────
//!  (blank)                         (blank)
//!  header                          header
//!  border                          border
//!  controls (3 rows)               title
//!  section title                   meta
//!  inline error                    loading / error
//!  grid (CARD_HEIGHT per row)      body (scrolled)
//!  loading / empty                 (blank)
//!  pagination                      buttons
//!  border                          border
//!  footer                          footer
//! ```

pub mod controls;
pub mod details;
pub mod empty;
pub mod footer;
pub mod grid;
pub mod header;
pub mod pagination;

use crate::app::CARD_HEIGHT;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BrowseView, DetailsPanel, FooterInfo, HeaderInfo};

/// Row of the first grid line on the browse screen.
const GRID_START_ROW: usize = 9;

/// Renders a horizontal rule across the full width.
pub fn render_border(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.border));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

fn render_chrome(out: &mut String, header: &HeaderInfo, footer: &FooterInfo, theme: &Theme, rows: usize, cols: usize) {
    let next = header::render_header(out, 2, header, theme, cols);
    render_border(out, next, theme, cols);
    render_border(out, rows.saturating_sub(1), theme, cols);
    footer::render_footer(out, rows, footer, theme, cols);
}

/// Browse screen: controls, grid, status and pagination.
pub fn render_browse(
    out: &mut String,
    header: &HeaderInfo,
    view: &BrowseView,
    footer: &FooterInfo,
    theme: &Theme,
    rows: usize,
    cols: usize,
) {
    render_chrome(out, header, footer, theme, rows, cols);

    let title_row = controls::render_controls(out, 4, &view.controls, &view.search_bar, theme, cols);

    position_cursor(out, title_row, 2);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&view.section_title);
    out.push_str(Theme::reset());

    if let Some(error) = &view.error {
        empty::render_status_line(out, title_row + 1, error, &theme.colors.error_fg, cols);
    }

    let grid_capacity = rows.saturating_sub(GRID_START_ROW + 3) / CARD_HEIGHT * CARD_HEIGHT;
    let status_row = grid::render_grid(out, GRID_START_ROW, &view.rows, view.columns, theme, cols)
        .max(GRID_START_ROW + grid_capacity);

    if let Some(empty_state) = &view.empty_state {
        let middle = GRID_START_ROW + grid_capacity.saturating_sub(1) / 2;
        empty::render_empty_state(out, middle, empty_state, theme, cols);
    }
    if view.loading {
        empty::render_status_line(out, status_row, "Loading…", &theme.colors.text_dim, cols);
    }

    if let Some(info) = &view.pagination {
        pagination::render_pagination(out, rows.saturating_sub(2), info, theme, cols);
    }
}

/// Details screen: title, metadata, scrolled body and buttons.
pub fn render_details_screen(
    out: &mut String,
    header: &HeaderInfo,
    panel: &DetailsPanel,
    footer: &FooterInfo,
    theme: &Theme,
    rows: usize,
    cols: usize,
) {
    render_chrome(out, header, footer, theme, rows, cols);
    details::render_details(out, 4, rows.saturating_sub(2), panel, theme, cols);
}
