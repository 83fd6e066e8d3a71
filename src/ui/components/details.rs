//! Details screen renderer.
//!
//! ```text
//!  The Matrix
//!  1999-03-31 · 136 min · ★ 8.2
//!
//!  Welcome to the Real World.
//!  Set in the 22nd century, ...
//!
//!  [ Back ]  [ ♥ Remove from favorites ]
//! ```

use crate::app::DetailsButton;
use crate::ui::components::empty::render_status_line;
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailsPanel;

/// Renders the panel from `row` down to (but excluding) `buttons_row`,
/// then the button row itself.
pub fn render_details(
    out: &mut String,
    row: usize,
    buttons_row: usize,
    panel: &DetailsPanel,
    theme: &Theme,
    cols: usize,
) {
    let width = cols.saturating_sub(2);

    position_cursor(out, row, 2);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&truncate(&panel.title, width));
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 2);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&truncate(&panel.meta, width));
    out.push_str(Theme::reset());

    if let Some(error) = &panel.error {
        render_status_line(out, row + 2, error, &theme.colors.error_fg, cols);
    } else if panel.loading {
        render_status_line(out, row + 2, "Loading details…", &theme.colors.text_dim, cols);
    }

    let body_start = row + 3;
    for (offset, line) in panel.body.iter().enumerate() {
        let line_row = body_start + offset;
        if line_row + 1 >= buttons_row {
            break;
        }
        position_cursor(out, line_row, 2);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(line);
        out.push_str(Theme::reset());
    }

    let favorite_label = if panel.is_favorite {
        "♥ Remove from favorites"
    } else {
        "♡ Add to favorites"
    };

    position_cursor(out, buttons_row, 2);
    push_button(out, "Back", panel.focused == DetailsButton::Back, theme);
    out.push_str("  ");
    push_button(out, favorite_label, panel.focused == DetailsButton::Favorite, theme);
}

fn push_button(out: &mut String, label: &str, focused: bool, theme: &Theme) {
    if focused {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }
    out.push_str(&format!("[ {label} ]"));
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> DetailsPanel {
        DetailsPanel {
            title: "Heat".into(),
            meta: "1995-12-15 · 170 min".into(),
            body: vec!["line one".into(), "line two".into(), "line three".into()],
            loading: false,
            error: None,
            is_favorite: false,
            focused: DetailsButton::Favorite,
        }
    }

    #[test]
    fn body_stops_before_button_row() {
        let mut out = String::new();
        render_details(&mut out, 4, 9, &panel(), &Theme::default(), 80);

        assert!(out.contains("line one"));
        assert!(!out.contains("line three"));
        assert!(out.contains("[ ♡ Add to favorites ]"));
    }

    #[test]
    fn error_replaces_loading_notice() {
        let mut out = String::new();
        let failed = DetailsPanel {
            loading: true,
            error: Some("Request timed out".into()),
            ..panel()
        };
        render_details(&mut out, 4, 20, &failed, &Theme::default(), 80);

        assert!(out.contains("Request timed out"));
        assert!(!out.contains("Loading details"));
    }
}
