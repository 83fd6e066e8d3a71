//! Scriptable in-memory gateway for routine tests.

use super::MovieGateway;
use crate::domain::{
    Category, MovieDeckError, MovieDetails, MovieId, MoviePage, MovieSummary, Result,
    SearchResults,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Category(Category, u32),
    Search(String),
    Details(MovieId),
}

#[derive(Debug, Default)]
pub(crate) struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    category_delays: Mutex<HashMap<(Category, u32), Duration>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    details_delay: Mutex<Option<Duration>>,
    failing_categories: Mutex<HashSet<Category>>,
    failing_searches: Mutex<HashSet<String>>,
    failing_details: Mutex<HashSet<MovieId>>,
}

pub(crate) fn movie(id: MovieId, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: format!("About {title}"),
        poster_url: None,
        release_date: Some("2020-01-01".to_string()),
        vote_average: Some(6.5),
    }
}

/// Ids served for a category page: popular pages start at 100s, airing now at 1100s.
pub(crate) fn page_ids(category: Category, page: u32) -> Vec<MovieId> {
    let base = match category {
        Category::Popular => 0,
        Category::AiringNow => 1000,
    } + u64::from(page) * 100;
    vec![base + 1, base + 2, base + 3]
}

impl FakeGateway {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn search_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Search(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn delay_category(&self, category: Category, page: u32, delay: Duration) {
        self.category_delays.lock().unwrap().insert((category, page), delay);
    }

    pub(crate) fn delay_search(&self, query: &str, delay: Duration) {
        self.search_delays.lock().unwrap().insert(query.to_string(), delay);
    }

    pub(crate) fn delay_details(&self, delay: Duration) {
        *self.details_delay.lock().unwrap() = Some(delay);
    }

    pub(crate) fn fail_category(&self, category: Category) {
        self.failing_categories.lock().unwrap().insert(category);
    }

    pub(crate) fn fail_search(&self, query: &str) {
        self.failing_searches.lock().unwrap().insert(query.to_string());
    }

    pub(crate) fn fail_details(&self, id: MovieId) {
        self.failing_details.lock().unwrap().insert(id);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MovieGateway for FakeGateway {
    async fn fetch_category_page(&self, category: Category, page: u32) -> Result<MoviePage> {
        self.record(Call::Category(category, page));
        let delay = self.category_delays.lock().unwrap().get(&(category, page)).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_categories.lock().unwrap().contains(&category) {
            return Err(MovieDeckError::status(500));
        }
        Ok(MoviePage {
            page,
            total_pages: 5,
            results: page_ids(category, page)
                .into_iter()
                .map(|id| movie(id, &format!("{category} {id}")))
                .collect(),
        })
    }

    async fn search_movies(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim().to_string();
        self.record(Call::Search(query.clone()));
        let delay = self.search_delays.lock().unwrap().get(&query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_searches.lock().unwrap().contains(&query) {
            return Err(MovieDeckError::Timeout);
        }
        let id = 900 + query.len() as MovieId;
        Ok(SearchResults {
            results: vec![movie(id, &query)],
            query,
        })
    }

    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        self.record(Call::Details(id));
        let delay = *self.details_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_details.lock().unwrap().contains(&id) {
            return Err(MovieDeckError::status(404));
        }
        Ok(MovieDetails {
            summary: movie(id, &format!("Details {id}")),
            backdrop_url: None,
            runtime: Some(95),
            genres: vec!["Drama".to_string()],
            tagline: Some("A tagline".to_string()),
        })
    }
}
