//! Footer component renderer.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints, dimmed and cut to the terminal width.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate(&format!(" {}", footer.keybindings), cols);

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&text);
    out.push_str(&padding(&text, cols));
    out.push_str(Theme::reset());
    row + 1
}
