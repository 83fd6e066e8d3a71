//! Terminal user interface rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! - [`viewmodel`]: Display-ready types, computed from a store read
//! - [`renderer`]: Frame entry point
//! - [`components`]: Per-region renderers and the two screen layouts
//! - [`helpers`]: Cursor positioning, fuzzy highlighting, text fitting
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{Body, BrowseView, CardItem, DetailsPanel, UIViewModel};
