//! Movie domain model.
//!
//! Value types shared by every layer: summaries and details as stored in the
//! entity cache, paged listing results, and the browsable sources (categories
//! and the favorites filter).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive movie identifier. Zero is never a valid id.
pub type MovieId = u64;

/// Minimum number of trimmed characters before a query is searched.
pub const SEARCH_MIN_CHARS: usize = 2;

/// Returns `true` when the trimmed query is long enough to search.
///
/// Counts characters rather than bytes so multibyte titles behave.
///
/// # Examples
///
/// ```
/// use moviedeck::domain::is_searchable_query;
///
/// assert!(!is_searchable_query(" a "));
/// assert!(is_searchable_query("up"));
/// ```
#[must_use]
pub fn is_searchable_query(raw: &str) -> bool {
    raw.trim().chars().count() >= SEARCH_MIN_CHARS
}

/// Listing entry for a single movie.
///
/// Serialized with camelCase keys; this is also the persisted favorites
/// record format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    /// Stand-in shown for a visible id with no cached entity.
    #[must_use]
    pub fn placeholder(id: MovieId) -> Self {
        Self {
            id,
            title: format!("Movie #{id}"),
            overview: "No cached data. Open details to load this movie.".to_string(),
            poster_url: None,
            release_date: None,
            vote_average: None,
        }
    }

    /// Year component of `release_date`, when it parses as `YYYY-MM-DD`.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    /// Returns `true` when the record satisfies the entity invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id > 0 && self.vote_average.map_or(true, f64::is_finite)
    }
}

/// Full detail record. Flattens to a summary plus detail-only fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub backdrop_url: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub tagline: Option<String>,
}

impl MovieDetails {
    #[must_use]
    pub const fn id(&self) -> MovieId {
        self.summary.id
    }

    /// The summary projection written into the entity cache.
    #[must_use]
    pub fn to_summary(&self) -> MovieSummary {
        self.summary.clone()
    }
}

/// One page of a category listing.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<MovieSummary>,
}

/// Search results echoed with the query they answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<MovieSummary>,
}

/// Independently paginated listing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Popular,
    AiringNow,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Popular, Self::AiringNow];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::AiringNow => "airingNow",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::AiringNow => "Airing Now",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data source selected in the control row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Filter {
    Popular,
    AiringNow,
    Favorites,
}

impl Filter {
    /// The category backing this filter, if it is paginated.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Popular => Some(Category::Popular),
            Self::AiringNow => Some(Category::AiringNow),
            Self::Favorites => None,
        }
    }
}

impl From<Category> for Filter {
    fn from(category: Category) -> Self {
        match category {
            Category::Popular => Self::Popular,
            Category::AiringNow => Self::AiringNow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_length_counts_trimmed_characters() {
        assert!(!is_searchable_query(""));
        assert!(!is_searchable_query("   x   "));
        assert!(is_searchable_query("  é!  "));
    }

    #[test]
    fn summary_json_uses_camel_case_and_nulls() {
        let movie = MovieSummary {
            id: 7,
            title: "Heat".into(),
            overview: "Crime".into(),
            poster_url: None,
            release_date: Some("1995-12-15".into()),
            vote_average: Some(8.3),
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["posterUrl"], serde_json::Value::Null);
        assert_eq!(json["releaseDate"], "1995-12-15");
        assert_eq!(movie.release_year(), Some(1995));
    }

    #[test]
    fn details_project_to_their_summary() {
        let details = MovieDetails {
            summary: MovieSummary::placeholder(42),
            backdrop_url: None,
            runtime: Some(120),
            genres: vec!["Drama".into()],
            tagline: None,
        };
        assert_eq!(details.id(), 42);
        assert_eq!(details.to_summary(), MovieSummary::placeholder(42));
    }

    #[test]
    fn category_wire_names() {
        assert_eq!(Category::AiringNow.to_string(), "airingNow");
        assert_eq!(Filter::from(Category::Popular).category(), Some(Category::Popular));
        assert_eq!(Filter::Favorites.category(), None);
    }
}
