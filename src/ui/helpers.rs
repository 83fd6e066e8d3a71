//! Shared rendering utilities and helpers.
//!
//! Frames are built into a `String` buffer and written to the terminal in one
//! go. These helpers cover cursor positioning, fuzzy match highlighting and
//! text fitting. All width calculations operate on characters, not bytes.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt::Write;

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
///
/// Each range is `(start, end)` with an exclusive end.
///
/// # Example
///
/// ```rust
/// use fuzzy_matcher::skim::SkimMatcherV2;
/// use moviedeck::ui::helpers::highlight_ranges;
///
/// let matcher = SkimMatcherV2::default();
/// assert_eq!(highlight_ranges(&matcher, "Alien", "ali"), vec![(0, 3)]);
/// ```
#[must_use]
pub fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Writes `text` with highlighted character ranges.
///
/// When `base` is given (a focused card), it is re-applied after every
/// highlighted run so the focus ring stays intact.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base: Option<&str>,
) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            out.extend(&chars[current_pos..start]);
        }

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        if let Some(base) = base {
            out.push_str(base);
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Greedy word wrap. Words longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Spaces needed to pad `text` to `width` characters.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_ranges_coalesce_consecutive_indices() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges(&matcher, "The Matrix", "mtx"), vec![(4, 5), (6, 7), (9, 10)]);
        assert!(highlight_ranges(&matcher, "Heat", "zz").is_empty());
    }

    #[test]
    fn highlighted_text_keeps_unmatched_characters() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Alien", &[(0, 2)], &theme, None);

        assert!(out.starts_with(&Theme::fg(&theme.colors.match_highlight_fg)));
        assert!(out.contains("Al\u{1b}[0m"));
        assert!(out.ends_with("ien"));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("Amélie", 4), "Amé…");
        assert_eq!(truncate("Amélie", 0), "");
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("a quick brown fox", 7),
            vec!["a quick", "brown", "fox"]
        );
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap_text("   ", 5).is_empty());
    }
}
