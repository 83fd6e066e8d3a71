//! TMDB wire payloads and their mapping onto domain types.
//!
//! Payloads are decoded leniently: every field is optional, list entries that
//! fail to decode are treated as empty records, and the mapping step applies
//! the defaults and coercions the rest of the crate relies on.

use crate::domain::{MovieDetails, MovieId, MoviePage, MovieSummary};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_TITLE: &str = "Untitled movie";
pub const DEFAULT_OVERVIEW: &str = "No overview available.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPage {
    pub page: Option<f64>,
    pub total_pages: Option<f64>,
    pub results: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    pub id: Option<f64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub runtime: Option<f64>,
    pub genres: Vec<RawGenre>,
    pub tagline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawGenre {
    pub name: Option<String>,
}

/// Error body returned by TMDB on non-success responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStatus {
    pub status_message: Option<String>,
}

/// Image URL prefixes applied while mapping.
#[derive(Debug, Clone)]
pub struct PayloadMapper {
    pub poster_base: String,
    pub backdrop_base: String,
}

impl PayloadMapper {
    #[must_use]
    pub fn summary(&self, raw: &RawMovie) -> MovieSummary {
        MovieSummary {
            id: positive_id(raw.id),
            title: non_blank(raw.title.as_ref())
                .or_else(|| non_blank(raw.name.as_ref()))
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            overview: non_blank(raw.overview.as_ref()).unwrap_or_else(|| DEFAULT_OVERVIEW.to_string()),
            poster_url: non_blank(raw.poster_path.as_ref()).map(|path| format!("{}{path}", self.poster_base)),
            release_date: non_blank(raw.release_date.as_ref())
                .or_else(|| non_blank(raw.first_air_date.as_ref())),
            vote_average: raw.vote_average.filter(|value| value.is_finite()),
        }
    }

    #[must_use]
    pub fn details(&self, raw: &RawMovie) -> MovieDetails {
        MovieDetails {
            summary: self.summary(raw),
            backdrop_url: non_blank(raw.backdrop_path.as_ref())
                .map(|path| format!("{}{path}", self.backdrop_base)),
            runtime: raw
                .runtime
                .filter(|minutes| minutes.is_finite() && *minutes >= 0.0)
                .map(|minutes| minutes.floor() as u32),
            genres: raw
                .genres
                .iter()
                .filter_map(|genre| non_blank(genre.name.as_ref()))
                .collect(),
            tagline: non_blank(raw.tagline.as_ref()),
        }
    }

    /// Maps a listing payload, dropping entries without a positive id.
    #[must_use]
    pub fn page(&self, raw: &RawPage, requested_page: u32) -> MoviePage {
        let results = raw
            .results
            .iter()
            .map(|entry| serde_json::from_value::<RawMovie>(entry.clone()).unwrap_or_default())
            .map(|movie| self.summary(&movie))
            .filter(|movie| movie.id > 0)
            .collect();

        MoviePage {
            page: coerce_page(raw.page).unwrap_or_else(|| requested_page.max(1)),
            total_pages: coerce_page(raw.total_pages).unwrap_or(1),
            results,
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty()).cloned()
}

/// Zero marks an id the callers must reject.
fn positive_id(value: Option<f64>) -> MovieId {
    value
        .filter(|id| id.is_finite() && *id >= 1.0 && id.fract() == 0.0)
        .map_or(0, |id| id as MovieId)
}

/// Floors finite numbers and coerces them to at least 1.
fn coerce_page(value: Option<f64>) -> Option<u32> {
    value
        .filter(|number| number.is_finite())
        .map(|number| number.floor().clamp(1.0, f64::from(u32::MAX)) as u32)
}
