//! HTTP gateway for the TMDB v3 API.

use super::models::{PayloadMapper, RawMovie, RawPage, RawStatus};
use super::MovieGateway;
use crate::domain::{
    is_searchable_query, Category, MovieDeckError, MovieDetails, MovieId, MoviePage, Result,
    SearchResults,
};
use crate::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

/// How requests authenticate against TMDB.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// v4 read access token, sent as a bearer header.
    ReadToken(String),
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
}

impl Credentials {
    /// Picks the read token when both are set. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::Config`] when neither credential is present.
    pub fn resolve(read_token: Option<&str>, api_key: Option<&str>) -> Result<Self> {
        let present = |value: Option<&str>| value.map(str::trim).filter(|v| !v.is_empty()).map(String::from);
        present(read_token)
            .map(Self::ReadToken)
            .or_else(|| present(api_key).map(Self::ApiKey))
            .ok_or_else(|| {
                MovieDeckError::Config(
                    "Missing TMDB credentials. Set TMDB_API_READ_TOKEN or TMDB_API_KEY.".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadToken(_) => f.write_str("ReadToken(..)"),
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
        }
    }
}

/// [`MovieGateway`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct TmdbGateway {
    client: Client,
    base_url: String,
    credentials: Credentials,
    mapper: PayloadMapper,
}

impl TmdbGateway {
    /// Builds a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Fails when credentials are missing or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = Credentials::resolve(
            config.api_read_token.as_deref(),
            config.api_key.as_deref(),
        )?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| MovieDeckError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credentials,
            mapper: PayloadMapper {
                poster_base: config.poster_base_url.clone(),
                backdrop_base: config.backdrop_base_url.clone(),
            },
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        self.send(path, params)
            .instrument(tracing::debug_span!("tmdb_get", path = %path))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let mut request = self.client.get(self.url(path)).query(params);
        request = match &self.credentials {
            Credentials::ReadToken(token) => request.bearer_auth(token),
            Credentials::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RawStatus>(&body)
                .ok()
                .and_then(|raw| raw.status_message)
                .filter(|message| !message.trim().is_empty());
            tracing::debug!(status = status.as_u16(), "TMDB returned an error status");
            return Err(message.map_or_else(
                || MovieDeckError::status(status.as_u16()),
                |message| MovieDeckError::Gateway {
                    status: Some(status.as_u16()),
                    message,
                },
            ));
        }

        response.json::<T>().await.map_err(transport_error)
    }
}

fn transport_error(error: reqwest::Error) -> MovieDeckError {
    if error.is_timeout() {
        return MovieDeckError::Timeout;
    }
    MovieDeckError::Gateway {
        status: error.status().map(|status| status.as_u16()),
        message: format!("TMDB request failed: {error}"),
    }
}

const fn category_path(category: Category) -> &'static str {
    match category {
        Category::Popular => "/movie/popular",
        Category::AiringNow => "/movie/now_playing",
    }
}

#[async_trait]
impl MovieGateway for TmdbGateway {
    async fn fetch_category_page(&self, category: Category, page: u32) -> Result<MoviePage> {
        let page = page.max(1);
        let raw: RawPage = self
            .get(category_path(category), &[("page", page.to_string())])
            .await?;
        Ok(self.mapper.page(&raw, page))
    }

    async fn search_movies(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim().to_string();
        if !is_searchable_query(&query) {
            return Ok(SearchResults { query, results: Vec::new() });
        }

        let raw: RawPage = self
            .get(
                "/search/movie",
                &[("query", query.clone()), ("include_adult", "false".to_string())],
            )
            .await?;
        Ok(SearchResults {
            results: self.mapper.page(&raw, 1).results,
            query,
        })
    }

    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        if id == 0 {
            return Err(MovieDeckError::Validation("Invalid movie id.".to_string()));
        }

        let raw: RawMovie = self.get(&format!("/movie/{id}"), &[]).await?;
        let details = self.mapper.details(&raw);
        if details.id() == 0 {
            return Err(MovieDeckError::Gateway {
                status: None,
                message: "Movie details response is missing a valid id.".to_string(),
            });
        }
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> TmdbGateway {
        let config = Config {
            api_key: Some("key".into()),
            api_base_url: "http://127.0.0.1:9/3/".into(),
            ..Config::default()
        };
        TmdbGateway::new(&config).unwrap()
    }

    #[test]
    fn read_token_wins_over_api_key() {
        assert_eq!(
            Credentials::resolve(Some("token"), Some("key")).unwrap(),
            Credentials::ReadToken("token".into())
        );
        assert_eq!(
            Credentials::resolve(Some("  "), Some("key")).unwrap(),
            Credentials::ApiKey("key".into())
        );
        assert!(matches!(Credentials::resolve(None, None), Err(MovieDeckError::Config(_))));
    }

    #[test]
    fn credentials_never_print_secrets() {
        assert_eq!(format!("{:?}", Credentials::ApiKey("secret".into())), "ApiKey(..)");
    }

    #[test]
    fn urls_join_without_double_slash() {
        assert_eq!(gateway().url("/movie/popular"), "http://127.0.0.1:9/3/movie/popular");
    }

    #[tokio::test]
    async fn short_queries_never_reach_the_network() {
        let results = gateway().search_movies("  a ").await.unwrap();
        assert_eq!(results.query, "a");
        assert!(results.results.is_empty());
    }

    #[tokio::test]
    async fn zero_id_is_rejected_locally() {
        let err = gateway().fetch_movie_details(0).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid movie id.");
    }
}
