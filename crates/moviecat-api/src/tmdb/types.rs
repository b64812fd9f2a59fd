//! TMDB API response types.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Parses a TMDB `YYYY-MM-DD` date and returns its year.
///
/// TMDB sends `""` for unknown dates, so empty and malformed values yield `None`.
fn year_of(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

// --- Movie lists ---

/// A page of movies from a list, search, or discover endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    /// Current page number (1-based).
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results across all pages.
    pub total_results: u32,
    /// Release window (`now_playing` and `upcoming` only).
    #[serde(default)]
    pub dates: Option<DateWindow>,
}

impl MoviePage {
    /// Returns `true` if the page holds no movies.
    ///
    /// An empty page is a valid response, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns `true` if a page after this one exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Clamps a requested page number into `1..=total_pages`.
    ///
    /// The API client never clamps; callers paging through results use this
    /// before issuing the next request. With zero pages the result is `1`.
    #[must_use]
    pub fn clamp_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.total_pages.max(1))
    }
}

/// Release date window attached to `now_playing` and `upcoming` pages.
#[derive(Debug, Clone, Deserialize)]
pub struct DateWindow {
    /// Earliest release date (YYYY-MM-DD).
    pub minimum: String,
    /// Latest release date (YYYY-MM-DD).
    pub maximum: String,
}

/// A movie as it appears in list results.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path (relative, e.g. `/abc.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Genre IDs in API order.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

impl MovieSummary {
    /// Returns the release year, if the release date parses.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        year_of(self.release_date.as_deref())
    }
}

// --- Genres ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Localized genre name.
    pub name: String,
}

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

impl GenreList {
    /// Looks up a genre name by ID.
    #[must_use]
    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }
}

// --- Movie details ---

/// Response from `movie/{id}`, with optional appended sub-resources.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Budget in USD (0 when unknown).
    #[serde(default)]
    pub budget: Option<u64>,
    /// Revenue in USD (0 when unknown).
    #[serde(default)]
    pub revenue: Option<u64>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release status (e.g., "Released", "Post Production").
    #[serde(default)]
    pub status: Option<String>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Cast and crew (present when `credits` was appended).
    #[serde(default)]
    pub credits: Option<Credits>,
    /// Similar movies (present when `similar` was appended).
    #[serde(default)]
    pub similar: Option<MoviePage>,
    /// Videos (present when `videos` was appended).
    #[serde(default)]
    pub videos: Option<VideoList>,
}

impl MovieDetail {
    /// Returns the genre IDs in API order.
    #[must_use]
    pub fn genre_ids(&self) -> Vec<u32> {
        self.genres.iter().map(|g| g.id).collect()
    }

    /// Returns the release year, if the release date parses.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        year_of(self.release_date.as_deref())
    }

    /// Returns the names of crew members credited as "Director".
    #[must_use]
    pub fn directors(&self) -> Vec<&str> {
        self.credits.as_ref().map_or_else(Vec::new, |credits| {
            credits
                .crew
                .iter()
                .filter(|member| member.job == "Director")
                .map(|member| member.name.as_str())
                .collect()
        })
    }
}

/// Production company entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Appended `credits` sub-resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    /// Cast in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
    /// Crew.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    /// Person name.
    pub name: String,
    /// Job title (e.g., "Director").
    pub job: String,
}

/// Appended `videos` sub-resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    /// Videos in API order.
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Video entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    /// Video type (e.g., "Trailer", "Teaser", "Clip").
    #[serde(rename = "type")]
    pub kind: String,
    /// Hosting site (e.g., "YouTube").
    pub site: String,
    /// Site-specific video key.
    pub key: String,
    /// Video name.
    #[serde(default)]
    pub name: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn page(page: u32, total_pages: u32) -> MoviePage {
        MoviePage {
            page,
            results: vec![],
            total_pages,
            total_results: total_pages.saturating_mul(20),
            dates: None,
        }
    }

    #[test]
    fn test_parse_popular_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        // Act
        let response: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, 1);
        assert_eq!(response.total_pages, 5);
        assert_eq!(response.results.len(), 3);
        let first = &response.results[0];
        assert_eq!(first.id, 693_134);
        assert_eq!(first.title, "Duna: Parte Dois");
        assert_eq!(first.genre_ids, vec![878, 12]);
        assert_eq!(first.release_year(), Some(2024));
    }

    #[test]
    fn test_parse_summary_with_nulls() {
        // Arrange
        let json = r#"{"id":1,"title":"Untitled","poster_path":null,"backdrop_path":null,
            "vote_average":null,"release_date":""}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.poster_path.is_none());
        assert!(movie.vote_average.is_none());
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_parse_now_playing_dates() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_now_playing.json");

        // Act
        let response: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        let dates = response.dates.unwrap();
        assert_eq!(dates.minimum, "2024-02-21");
        assert_eq!(dates.maximum, "2024-04-03");
    }

    #[test]
    fn test_parse_movie_detail_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_693134.json");

        // Act
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(detail.id, 693_134);
        assert_eq!(detail.runtime, Some(166));
        assert_eq!(detail.genre_ids(), vec![878, 12]);
        assert_eq!(detail.directors(), vec!["Denis Villeneuve"]);
        let credits = detail.credits.as_ref().unwrap();
        assert_eq!(credits.cast[0].name, "Timothée Chalamet");
        assert_eq!(credits.cast[0].character.as_deref(), Some("Paul Atreides"));
        assert_eq!(detail.similar.as_ref().unwrap().results.len(), 1);
        assert_eq!(detail.videos.as_ref().unwrap().results.len(), 3);
        assert_eq!(detail.production_companies[0].name, "Legendary Pictures");
    }

    #[test]
    fn test_parse_detail_without_appended_resources() {
        // Arrange
        let json = r#"{"id":550,"title":"Clube da Luta","genres":[{"id":18,"name":"Drama"}]}"#;

        // Act
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        // Assert
        assert!(detail.credits.is_none());
        assert!(detail.videos.is_none());
        assert!(detail.directors().is_empty());
    }

    #[test]
    fn test_genre_list_name_of() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/genre_movie_list.json");
        let genres: GenreList = serde_json::from_str(json).unwrap();

        // Act & Assert
        assert_eq!(genres.name_of(18), Some("Drama"));
        assert_eq!(genres.name_of(9_999), None);
    }

    #[test]
    fn test_clamp_page_above_total() {
        // Arrange
        let response = page(1, 5);

        // Act & Assert
        assert_eq!(response.clamp_page(6), 5);
        assert_eq!(response.clamp_page(3), 3);
        assert_eq!(response.clamp_page(0), 1);
    }

    #[test]
    fn test_clamp_page_with_no_pages() {
        // Arrange
        let response = page(1, 0);

        // Act & Assert
        assert_eq!(response.clamp_page(4), 1);
        assert!(!response.has_next_page());
    }

    #[test]
    fn test_has_next_page() {
        // Arrange & Act & Assert
        assert!(page(1, 5).has_next_page());
        assert!(!page(5, 5).has_next_page());
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(error.status_message.contains("Invalid API key"));
    }
}
