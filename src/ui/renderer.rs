//! Top-level rendering coordinator.
//!
//! Rendering is a pure function of [`AppState`]: compute the view model, then
//! hand it to the layout for the current route. The result is one string
//! that clears the screen and paints the whole frame.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders the current frame for the terminal size stored in `state`.
#[must_use]
pub fn render(state: &AppState) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, &state.theme, state.rows, state.cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::from(CLEAR_SCREEN);

    match &vm.body {
        Body::Browse(view) => {
            components::render_browse(&mut out, &vm.header, view, &vm.footer, theme, rows, cols);
        }
        Body::Details(panel) => {
            components::render_details_screen(&mut out, &vm.header, panel, &vm.footer, theme, rows, cols);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DetailsButton;
    use crate::ui::viewmodel::{BrowseView, DetailsPanel, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo};

    fn frame(body: Body) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo { title: " MovieDeck ".into() },
            body,
            footer: FooterInfo { keybindings: "q quit".into() },
        }
    }

    #[test]
    fn empty_browse_frame_shows_message_and_chrome() {
        let view = BrowseView {
            controls: Vec::new(),
            search_bar: SearchBarInfo { query: String::new(), is_focused: false },
            section_title: "My Favorites".into(),
            error: None,
            loading: false,
            rows: Vec::new(),
            columns: 4,
            empty_state: Some(EmptyState { message: "No favorites yet".into() }),
            pagination: None,
        };

        let out = render_viewmodel(&frame(Body::Browse(view)), &Theme::default(), 24, 80);

        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains("MovieDeck"));
        assert!(out.contains("No favorites yet"));
        assert!(out.contains("q quit"));
        assert!(!out.contains("Page "));
    }

    #[test]
    fn details_frame_places_buttons_above_bottom_border() {
        let panel = DetailsPanel {
            title: "Heat".into(),
            meta: String::new(),
            body: Vec::new(),
            loading: true,
            error: None,
            is_favorite: true,
            focused: DetailsButton::Back,
        };

        let out = render_viewmodel(&frame(Body::Details(panel)), &Theme::default(), 24, 80);

        assert!(out.contains("\u{1b}[22;2H"));
        assert!(out.contains("Loading details"));
        assert!(out.contains("Remove from favorites"));
    }
}
