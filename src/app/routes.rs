//! Route and details-view cursor types.
//!
//! The terminal front end has two screens: the browse grid and the details
//! page of a single movie. Browse focus lives in [`crate::focus`]; the
//! details page only tracks which action button is selected and how far the
//! body text is scrolled.

use crate::domain::MovieId;

/// Screen currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Browse,
    Details(MovieId),
}

/// Action buttons of the details page, left to right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailsButton {
    #[default]
    Back,
    Favorite,
}

impl DetailsButton {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Back => Self::Favorite,
            Self::Favorite => Self::Back,
        }
    }
}

/// Cursor state of the details page. Reset whenever a movie is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailsCursor {
    pub button: DetailsButton,
    /// First body line shown.
    pub scroll: usize,
}
