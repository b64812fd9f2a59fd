//! Request parameters for catalog queries.

use std::collections::BTreeSet;

/// Default result page.
const DEFAULT_PAGE: u32 = 1;

/// Parameters for paged list endpoints (`movie/popular`, `movie/top_rated`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Result page (default: 1).
    pub page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE }
    }
}

impl ListParams {
    /// Creates list params for the given page.
    #[must_use]
    pub const fn page(page: u32) -> Self {
        Self { page }
    }

    /// Converts to query pairs.
    pub(crate) fn to_query(self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string())]
    }
}

/// Parameters for the movie search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (default: 1).
    pub page: u32,
    /// Filter by release year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: DEFAULT_PAGE,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the release year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Converts to query pairs.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        query
    }
}

/// Parameters for `discover/movie` filtered by genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverParams {
    /// Genre ID (sent as `with_genres`).
    pub genre_id: u32,
    /// Result page (default: 1).
    pub page: u32,
    /// Sort order (e.g., "popularity.desc"); server default when `None`.
    pub sort_by: Option<String>,
}

impl DiscoverParams {
    /// Creates discover params for the given genre.
    #[must_use]
    pub const fn new(genre_id: u32) -> Self {
        Self {
            genre_id,
            page: DEFAULT_PAGE,
            sort_by: None,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the server-side sort order.
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Converts to query pairs.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("with_genres", self.genre_id.to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(ref sort_by) = self.sort_by {
            query.push(("sort_by", sort_by.clone()));
        }
        query
    }
}

/// Sub-resource appended to a movie details response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppendResource {
    /// Cast and crew.
    Credits,
    /// Trailers, teasers and clips.
    Videos,
    /// Similar movies (first page).
    Similar,
}

impl AppendResource {
    /// All sub-resources, in request order.
    pub const ALL: [Self; 3] = [Self::Credits, Self::Videos, Self::Similar];

    /// Returns the `append_to_response` token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credits => "credits",
            Self::Videos => "videos",
            Self::Similar => "similar",
        }
    }
}

impl std::fmt::Display for AppendResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `movie/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailsParams {
    /// TMDB movie ID.
    pub id: u64,
    /// Sub-resources to append.
    pub append: BTreeSet<AppendResource>,
}

impl MovieDetailsParams {
    /// Creates details params without appended sub-resources.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            append: BTreeSet::new(),
        }
    }

    /// Creates details params appending credits, videos and similar movies.
    #[must_use]
    pub fn full(id: u64) -> Self {
        Self {
            id,
            append: AppendResource::ALL.into_iter().collect(),
        }
    }

    /// Adds a sub-resource to append.
    #[must_use]
    pub fn with(mut self, resource: AppendResource) -> Self {
        self.append.insert(resource);
        self
    }

    /// Returns the endpoint path.
    pub(crate) fn path(&self) -> String {
        format!("movie/{}", self.id)
    }

    /// Converts to query pairs. `append_to_response` is omitted when empty.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        if self.append.is_empty() {
            return vec![];
        }
        let joined = self
            .append
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",");
        vec![("append_to_response", joined)]
    }
}
