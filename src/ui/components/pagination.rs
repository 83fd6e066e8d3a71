//! Pagination row renderer.

use crate::focus::PageButton;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

const PREVIOUS: &str = "‹ Prev";
const NEXT: &str = "Next ›";

/// Renders `‹ Prev   Page p / t   Next ›` centered on `row`.
pub fn render_pagination(out: &mut String, row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) {
    let label = format!("   Page {} / {}   ", info.page, info.total_pages);
    let width = PREVIOUS.chars().count() + label.chars().count() + NEXT.chars().count();
    let left = cols.saturating_sub(width) / 2;

    position_cursor(out, row, left + 1);
    push_button(out, PREVIOUS, PageButton::Previous, info.previous_disabled, info, theme);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&label);
    out.push_str(Theme::reset());
    push_button(out, NEXT, PageButton::Next, info.next_disabled, info, theme);
}

fn push_button(
    out: &mut String,
    label: &str,
    button: PageButton,
    disabled: bool,
    info: &PaginationInfo,
    theme: &Theme,
) {
    if info.focused == Some(button) {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else if disabled {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }
    out.push_str(label);
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_button_is_highlighted() {
        let theme = Theme::default();
        let info = PaginationInfo {
            page: 2,
            total_pages: 9,
            focused: Some(PageButton::Next),
            previous_disabled: false,
            next_disabled: false,
        };
        let mut out = String::new();

        render_pagination(&mut out, 20, &info, &theme, 80);

        assert!(out.contains("Page 2 / 9"));
        assert!(out.contains(&format!("{}Next ›", Theme::bg(&theme.colors.selection_bg))));
    }
}
