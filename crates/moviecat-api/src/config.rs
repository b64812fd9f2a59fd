//! `CatalogConfig` - explicit configuration for the catalog client.

use anyhow::{Context, Result, ensure};
use url::Url;

use crate::media::ImageResolver;

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default image base URL (embeds the `w500` size segment).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Default movie search endpoint path.
pub const DEFAULT_SEARCH_PATH: &str = "search/movie";

/// Image shown when a movie has no artwork.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/500x750/1a1a2e/ffffff?text=No+Image";

/// Configuration passed to the catalog client at construction.
///
/// Nothing in this crate reads the process environment; callers build this
/// value once (from env vars, a config file, or test fixtures) and hand it
/// to [`crate::tmdb::TmdbClient::builder`].
#[derive(Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// API key injected into every request as `api_key`.
    pub api_key: String,
    /// API base URL. Always ends with `/`.
    pub base_url: Url,
    /// Image base URL, optionally embedding a default size segment.
    pub image_base_url: String,
    /// Locale injected into every request as `language`.
    pub language: String,
    /// Relative path of the movie search endpoint.
    pub search_path: String,
    /// URL returned for absent image paths.
    pub placeholder_image_url: String,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .field("search_path", &self.search_path)
            .field("placeholder_image_url", &self.placeholder_image_url)
            .finish()
    }
}

impl CatalogConfig {
    /// Creates a config with the given API key and TMDB defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        ensure!(!api_key.trim().is_empty(), "api_key must not be empty");

        let base_url = Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?;

        Ok(Self {
            api_key,
            base_url,
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            language: String::from(DEFAULT_LANGUAGE),
            search_path: String::from(DEFAULT_SEARCH_PATH),
            placeholder_image_url: String::from(DEFAULT_PLACEHOLDER_IMAGE_URL),
        })
    }

    /// Overrides the API base URL.
    ///
    /// A trailing `/` is added when missing so that relative endpoint paths
    /// extend the base path instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` does not parse or cannot be a base URL.
    pub fn base_url(mut self, url: &str) -> Result<Self> {
        let normalized = if url.ends_with('/') {
            String::from(url)
        } else {
            format!("{url}/")
        };
        let parsed =
            Url::parse(&normalized).with_context(|| format!("invalid API base URL: {url}"))?;
        ensure!(!parsed.cannot_be_a_base(), "API base URL cannot be a base: {url}");
        self.base_url = parsed;
        Ok(self)
    }

    /// Overrides the image base URL.
    #[must_use]
    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Overrides the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Overrides the movie search endpoint path.
    #[must_use]
    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// Overrides the placeholder image URL.
    #[must_use]
    pub fn placeholder_image_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image_url = url.into();
        self
    }

    /// Builds the image resolver for this configuration.
    #[must_use]
    pub fn image_resolver(&self) -> ImageResolver {
        ImageResolver::new(&self.image_base_url, &self.placeholder_image_url)
    }
}
