//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::params::{DiscoverParams, ListParams, MovieDetailsParams, SearchMovieParams};
use super::types::{GenreList, MovieDetail, MoviePage, TmdbErrorResponse};
use crate::config::CatalogConfig;
use crate::error::RequestError;

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "api_key";

/// Query parameter carrying the response locale.
const LANGUAGE_PARAM: &str = "language";

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Catalog configuration (base URL, API key, locale, search path).
    config: CatalogConfig,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    config: Option<CatalogConfig>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            config: None,
            user_agent: None,
        }
    }

    /// Sets the catalog configuration (required).
    #[must_use]
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `config` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let config = self.config.context("config is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            config,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Merges caller query pairs with the injected `api_key` and `language`.
    ///
    /// Caller pairs named like an injected parameter are dropped.
    fn merge_query<'a>(&'a self, query: &[(&'a str, String)]) -> Vec<(&'a str, String)> {
        let mut merged: Vec<(&str, String)> = vec![
            (API_KEY_PARAM, self.config.api_key.clone()),
            (LANGUAGE_PARAM, self.config.language.clone()),
        ];
        merged.extend(
            query
                .iter()
                .filter(|(name, _)| *name != API_KEY_PARAM && *name != LANGUAGE_PARAM)
                .cloned(),
        );
        merged
    }

    /// Builds a GET request for `base_url + path` with merged query params.
    fn build_request(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Request, RequestError> {
        let endpoint = path.trim_start_matches('/');
        let url = self
            .config
            .base_url
            .join(endpoint)
            .map_err(|source| RequestError::InvalidUrl {
                endpoint: String::from(endpoint),
                source,
            })?;

        self.http_client
            .get(url)
            .query(&self.merge_query(query))
            .build()
            .map_err(|source| RequestError::Network {
                endpoint: String::from(endpoint),
                source: source.without_url(),
            })
    }

    /// Sends a GET request to `base_url + path` and decodes the JSON body.
    ///
    /// `api_key` and `language` are always injected from the configuration;
    /// caller values with those names are ignored. No retry is attempted.
    /// Transport errors are stripped of the request URL, which holds the key.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidUrl`] if `path` cannot be joined onto the base URL.
    /// - [`RequestError::Network`] if the request does not complete.
    /// - [`RequestError::Http`] on a non-2xx status.
    /// - [`RequestError::Decode`] if the body does not decode into `T`.
    #[instrument(skip(self, query))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let request = self.build_request(path, query)?;
        let endpoint = String::from(path.trim_start_matches('/'));

        tracing::debug!(url = %redacted_url(request.url()), "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| RequestError::Network {
                endpoint: endpoint.clone(),
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = match serde_json::from_str::<TmdbErrorResponse>(&body) {
                Ok(error_response) => error_response.status_message,
                Err(_) => body,
            };
            tracing::debug!(%status, endpoint = %endpoint, "TMDB API error response");
            return Err(RequestError::Http {
                endpoint,
                status,
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| RequestError::Network {
                endpoint: endpoint.clone(),
                source: source.without_url(),
            })?;
        serde_json::from_str(&body).map_err(|source| RequestError::Decode { endpoint, source })
    }
}

/// Renders a request URL with the API key value masked.
fn redacted_url(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == API_KEY_PARAM {
                String::from("***")
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

impl LocalCatalogApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self, params: ListParams) -> Result<MoviePage, RequestError> {
        self.get_json("movie/popular", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn now_playing(&self, params: ListParams) -> Result<MoviePage, RequestError> {
        self.get_json("movie/now_playing", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn top_rated(&self, params: ListParams) -> Result<MoviePage, RequestError> {
        self.get_json("movie/top_rated", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn upcoming(&self, params: ListParams) -> Result<MoviePage, RequestError> {
        self.get_json("movie/upcoming", &params.to_query()).await
    }

    #[instrument(skip_all, fields(id = params.id))]
    async fn movie_details(
        &self,
        params: &MovieDetailsParams,
    ) -> Result<MovieDetail, RequestError> {
        self.get_json(&params.path(), &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage, RequestError> {
        self.get_json(&self.config.search_path, &params.to_query())
            .await
    }

    #[instrument(skip_all)]
    async fn genres(&self) -> Result<GenreList, RequestError> {
        self.get_json("genre/movie/list", &[]).await
    }

    #[instrument(skip_all, fields(genre_id = params.genre_id))]
    async fn discover_by_genre(&self, params: &DiscoverParams) -> Result<MoviePage, RequestError> {
        self.get_json("discover/movie", &params.to_query()).await
    }
}
