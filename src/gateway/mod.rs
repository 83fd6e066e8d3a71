//! Remote data gateway.
//!
//! The [`MovieGateway`] trait is the seam between the orchestrator and the
//! remote metadata API. [`TmdbGateway`] is the HTTP implementation; tests use
//! an in-memory fake.

pub mod models;
pub mod tmdb;

#[cfg(test)]
pub(crate) mod fake;

pub use tmdb::{Credentials, TmdbGateway};

use crate::domain::{Category, MovieDetails, MovieId, MoviePage, Result, SearchResults};
use async_trait::async_trait;

/// Stateless request/response access to movie metadata.
///
/// Every failure carries a user-presentable message; timeouts surface as
/// [`MovieDeckError::Timeout`](crate::domain::MovieDeckError::Timeout).
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// Fetches one page of a category listing. Pages are 1-based.
    async fn fetch_category_page(&self, category: Category, page: u32) -> Result<MoviePage>;

    /// Searches by title. The echoed query is the trimmed input.
    async fn search_movies(&self, query: &str) -> Result<SearchResults>;

    /// Fetches the full record for one movie.
    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails>;
}
