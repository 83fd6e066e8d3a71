//! Control row renderer: the three filter buttons and the search box.
//!
//! ```text
//!                                                ┌──────────────────────┐
//!  Popular   Airing Now   My Favorites (2)       │ Search: dune         │
//!                                                └──────────────────────┘
//! ```

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ControlItem, SearchBarInfo};

const SEARCH_BOX_MIN_WIDTH: usize = 20;
const SEARCH_PLACEHOLDER: &str = "Search movies";

/// Renders the control row. Returns the next available row.
pub fn render_controls(
    out: &mut String,
    row: usize,
    controls: &[ControlItem],
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row + 1, 1);
    let mut used = 1;
    out.push(' ');

    for control in controls {
        let label = format!(" {} ", control.label);
        if control.is_focused {
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else if control.is_active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.active_filter_fg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        out.push_str(&label);
        out.push_str(Theme::reset());
        out.push_str("  ");
        used += label.chars().count() + 2;
    }

    let box_start = used + 1;
    let box_width = cols.saturating_sub(box_start).max(SEARCH_BOX_MIN_WIDTH);
    render_search_box(out, row, box_start, box_width, search, theme);

    row + 3
}

fn render_search_box(
    out: &mut String,
    row: usize,
    col: usize,
    width: usize,
    search: &SearchBarInfo,
    theme: &Theme,
) {
    let inner_width = width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.selection_bg
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(out, row, col);
    out.push_str(&Theme::fg(border));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let (text, color) = if search.query.is_empty() && !search.is_focused {
        (format!(" {SEARCH_PLACEHOLDER}"), &theme.colors.text_dim)
    } else {
        let cursor = if search.is_focused { "▏" } else { "" };
        (format!(" Search: {}{cursor}", search.query), &theme.colors.text_normal)
    };
    let text = truncate(&text, inner_width);

    position_cursor(out, row + 1, col);
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(&Theme::fg(color));
    out.push_str(&text);
    out.push_str(&padding(&text, inner_width));
    out.push_str(&Theme::fg(border));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, col);
    out.push_str(&Theme::fg(border));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
}
