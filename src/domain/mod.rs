//! Domain layer for MovieDeck.
//!
//! Core value types shared by the store, the gateway, and the UI, independent
//! of HTTP, terminal, or storage concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie summaries, details, categories, filters and query rules

pub mod error;
pub mod movie;

pub use error::{MovieDeckError, Result};
pub use movie::{
    is_searchable_query, Category, Filter, MovieDetails, MovieId, MoviePage, MovieSummary,
    SearchResults, SEARCH_MIN_CHARS,
};
