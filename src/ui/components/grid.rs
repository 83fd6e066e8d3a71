//! Movie card grid renderer.
//!
//! Each card is [`CARD_HEIGHT`] lines tall and `cols / columns` wide:
//!
//! ```text
//!  The Matrix             ♥
//!  1999 · ★ 8.2
//!
//! ```

use crate::app::CARD_HEIGHT;
use crate::ui::helpers::{padding, position_cursor, render_highlighted_text, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

const FAVORITE_BADGE: &str = "♥";

/// Renders the windowed grid rows. Returns the next available row.
pub fn render_grid(
    out: &mut String,
    row: usize,
    rows: &[Vec<CardItem>],
    columns: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    let cell_width = cols / columns.max(1);
    let mut current = row;

    for cards in rows {
        for (column, card) in cards.iter().enumerate() {
            render_card(out, current, column * cell_width + 1, cell_width, card, theme);
        }
        current += CARD_HEIGHT;
    }

    current
}

fn render_card(out: &mut String, row: usize, col: usize, width: usize, card: &CardItem, theme: &Theme) {
    // One column of gutter on each side of the card text.
    let inner = width.saturating_sub(2);
    let base = if card.is_focused {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let badge_width = usize::from(card.is_favorite) * 2;
    let title = truncate(&card.title, inner.saturating_sub(badge_width));
    let ranges: Vec<(usize, usize)> = if title == card.title {
        card.highlight_ranges.clone()
    } else {
        Vec::new()
    };

    position_cursor(out, row, col);
    out.push_str(&base);
    out.push(' ');
    render_highlighted_text(out, &title, &ranges, theme, Some(&base));
    out.push_str(&" ".repeat(inner.saturating_sub(title.chars().count() + badge_width)));
    if card.is_favorite {
        out.push(' ');
        if !card.is_focused {
            out.push_str(&Theme::fg(&theme.colors.favorite_fg));
        }
        out.push_str(FAVORITE_BADGE);
        out.push_str(&base);
    }
    out.push(' ');
    out.push_str(Theme::reset());

    let meta = truncate(&card_meta(card), inner);
    position_cursor(out, row + 1, col);
    out.push_str(&base);
    if !card.is_focused {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push(' ');
    out.push_str(&meta);
    out.push_str(&padding(&meta, inner));
    out.push(' ');
    out.push_str(Theme::reset());
}

/// Year and rating line, e.g. `1999 · ★ 8.2`.
fn card_meta(card: &CardItem) -> String {
    let year = card.year.map(|year| year.to_string());
    let rating = card.rating.as_ref().map(|rating| format!("★ {rating}"));
    match (year, rating) {
        (Some(year), Some(rating)) => format!("{year} · {rating}"),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> CardItem {
        CardItem {
            title: title.into(),
            year: Some(1999),
            rating: Some("8.2".into()),
            is_focused: false,
            is_favorite: false,
            highlight_ranges: Vec::new(),
        }
    }

    #[test]
    fn cards_advance_by_card_height() {
        let mut out = String::new();
        let rows = vec![vec![card("Heat"), card("Alien")], vec![card("Up")]];

        let next = render_grid(&mut out, 9, &rows, 2, &Theme::default(), 40);

        assert_eq!(next, 9 + 2 * CARD_HEIGHT);
        assert!(out.contains("\u{1b}[9;21H"));
        assert!(out.contains("1999 · ★ 8.2"));
    }

    #[test]
    fn favorite_badge_and_focus_ring() {
        let theme = Theme::default();
        let mut out = String::new();
        let rows = vec![vec![CardItem { is_focused: true, is_favorite: true, ..card("Heat") }]];

        render_grid(&mut out, 1, &rows, 1, &theme, 20);

        assert!(out.contains(FAVORITE_BADGE));
        assert!(out.contains(&format!("{} Heat", Theme::bg(&theme.colors.selection_bg))));
    }

    #[test]
    fn meta_line_omits_missing_parts() {
        assert_eq!(card_meta(&CardItem { rating: None, ..card("Heat") }), "1999");
        assert_eq!(card_meta(&CardItem { year: None, rating: None, ..card("Heat") }), "");
    }
}
