//! Empty state and status line renderers.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty-grid message centered on `row`.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let left = cols.saturating_sub(message.chars().count()) / 2;

    position_cursor(out, row, left + 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&message);
    out.push_str(Theme::reset());
}

/// Renders a single colored status line (loading notice, inline error).
pub fn render_status_line(out: &mut String, row: usize, text: &str, color: &str, cols: usize) {
    position_cursor(out, row, 2);
    out.push_str(&Theme::fg(color));
    out.push_str(&truncate(text, cols.saturating_sub(2)));
    out.push_str(Theme::reset());
}
