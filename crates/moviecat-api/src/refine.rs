//! Client-side refinement of a result page.
//!
//! The search API only matches titles; genre, year and rating filters and
//! the alternative sort orders are applied locally to the fetched page.

use std::cmp::Ordering;
use std::str::FromStr;

use anyhow::bail;

use crate::tmdb::MovieSummary;

/// Local filters applied to a page of results. `None` disables a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchFilters {
    /// Keep movies tagged with this genre ID.
    pub genre_id: Option<u32>,
    /// Keep movies released in this year.
    pub year: Option<i32>,
    /// Keep movies with a vote average of at least this value.
    pub min_rating: Option<f64>,
}

impl SearchFilters {
    /// Returns `true` if no filter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.genre_id.is_none() && self.year.is_none() && self.min_rating.is_none()
    }

    /// Returns `true` if `movie` passes every set filter.
    #[must_use]
    pub fn matches(&self, movie: &MovieSummary) -> bool {
        let genre_ok = self
            .genre_id
            .is_none_or(|genre| movie.genre_ids.contains(&genre));
        let year_ok = self
            .year
            .is_none_or(|year| movie.release_year() == Some(year));
        let rating_ok = self
            .min_rating
            .is_none_or(|min| movie.vote_average.is_some_and(|avg| avg >= min));
        genre_ok && year_ok && rating_ok
    }
}

/// Local sort order for a page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep API order.
    #[default]
    Relevance,
    /// Newest release first; undated movies last.
    Year,
    /// Highest vote average first; unrated movies last.
    Rating,
    /// Title A-Z, case-insensitive.
    Title,
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(Self::Relevance),
            "year" => Ok(Self::Year),
            "rating" => Ok(Self::Rating),
            "title" => Ok(Self::Title),
            other => {
                bail!("unknown sort order: {other} (expected relevance, year, rating, title)")
            }
        }
    }
}

/// Orders two optional keys descending, with `None` after every value.
fn descending_none_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filters and sorts `movies`, returning a new vector.
///
/// Sorting is stable, so movies with equal keys keep their API order.
#[must_use]
pub fn refine(
    movies: &[MovieSummary],
    filters: &SearchFilters,
    order: SortOrder,
) -> Vec<MovieSummary> {
    let mut refined: Vec<MovieSummary> = movies
        .iter()
        .filter(|movie| filters.matches(movie))
        .cloned()
        .collect();

    match order {
        SortOrder::Relevance => {}
        SortOrder::Year => {
            refined.sort_by(|a, b| descending_none_last(a.release_year(), b.release_year()));
        }
        SortOrder::Rating => {
            refined.sort_by(|a, b| descending_none_last(a.vote_average, b.vote_average));
        }
        SortOrder::Title => {
            refined.sort_by_cached_key(|movie| movie.title.to_lowercase());
        }
    }

    refined
}
