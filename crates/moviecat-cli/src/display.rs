//! Terminal rendering of catalog data.
//!
//! Everything is written through `tracing::info!`, one event per line.

use moviecat_api::pages::{HomeFeed, MovieView};
use moviecat_api::tmdb::{GenreList, MoviePage, MovieSummary};

/// Number of cast members listed on the movie page.
const CAST_LIMIT: usize = 10;

/// Placeholder for missing values.
const NONE: &str = "-";

/// Formats a runtime in minutes as `"2h 46m"`, `"3h"` or `"45m"`.
#[must_use]
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => String::from(NONE),
        Some(m) if m < 60 => format!("{m}m"),
        Some(m) if m % 60 == 0 => format!("{}h", m / 60),
        Some(m) => format!("{}h {}m", m / 60, m % 60),
    }
}

/// Formats a USD amount with thousands separators. Zero means unknown.
#[must_use]
pub fn format_money(amount: Option<u64>) -> String {
    let Some(amount) = amount.filter(|a| *a > 0) else {
        return String::from(NONE);
    };
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len().saturating_mul(4) / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && digits.len().saturating_sub(i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// Formats a vote average with one decimal.
#[must_use]
pub fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| String::from(NONE), |r| format!("{r:.1}"))
}

/// Formats a release year.
#[must_use]
pub fn format_year(year: Option<i32>) -> String {
    year.map_or_else(|| String::from(NONE), |y| y.to_string())
}

/// Joins the names of known genre IDs; unknown IDs are skipped.
fn genre_names(ids: &[u32], genres: &GenreList) -> String {
    ids.iter()
        .filter_map(|id| genres.name_of(*id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Logs one row per movie, preceded by a column header.
///
/// An empty slice logs a single "No movies found." line.
pub fn log_movie_rows(movies: &[MovieSummary], genres: Option<&GenreList>) {
    if movies.is_empty() {
        tracing::info!("No movies found.");
        return;
    }

    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in movies {
        let labels = genres
            .map(|list| genre_names(&movie.genre_ids, list))
            .filter(|names| !names.is_empty())
            .map_or_else(String::new, |names| format!(" [{names}]"));
        tracing::info!(
            "{}\t{}\t{}\t{}{}",
            movie.id,
            format_year(movie.release_year()),
            format_rating(movie.vote_average),
            movie.title,
            labels,
        );
    }
}

/// Logs the page position of a result page.
pub fn log_page_footer(page: &MoviePage) {
    tracing::info!(
        "Page {}/{} ({} results)",
        page.page,
        page.total_pages,
        page.total_results
    );
}

/// Logs a full result page: rows, then the page position.
pub fn log_movie_page(page: &MoviePage, genres: Option<&GenreList>) {
    log_movie_rows(&page.results, genres);
    if !page.is_empty() {
        log_page_footer(page);
    }
}

/// Logs the genre list.
pub fn log_genres(genres: &GenreList) {
    tracing::info!("ID\tName");
    for genre in &genres.genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", genres.genres.len());
}

/// Logs the home page sections.
pub fn log_home(feed: &HomeFeed) {
    if let Some(featured) = feed.featured() {
        tracing::info!("== Featured ==");
        tracing::info!(
            "{} ({}) {}",
            featured.title,
            format_year(featured.release_year()),
            format_rating(featured.vote_average)
        );
        if let Some(overview) = featured.overview.as_deref().filter(|o| !o.is_empty()) {
            tracing::info!("{}", overview);
        }
    }

    let sections = [
        ("Popular", &feed.popular),
        ("Now Playing", &feed.now_playing),
        ("Top Rated", &feed.top_rated),
        ("Upcoming", &feed.upcoming),
    ];
    for (title, page) in sections {
        tracing::info!("== {} ==", title);
        if let Some(ref dates) = page.dates {
            tracing::info!("{} to {}", dates.minimum, dates.maximum);
        }
        log_movie_rows(&page.results, Some(&feed.genres));
    }
}

/// Logs the movie page.
pub fn log_movie_view(view: &MovieView) {
    let detail = &view.detail;

    tracing::info!(
        "{} ({})",
        detail.title,
        format_year(detail.release_year())
    );
    if let Some(original) = detail
        .original_title
        .as_deref()
        .filter(|t| *t != detail.title)
    {
        tracing::info!("Original title: {}", original);
    }
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("\"{}\"", tagline);
    }
    tracing::info!(
        "Rating: {} ({} votes)",
        format_rating(detail.vote_average),
        detail.vote_count.unwrap_or(0)
    );
    tracing::info!("Runtime: {}", format_runtime(detail.runtime));
    tracing::info!(
        "Genres: {}",
        detail
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let directors = detail.directors();
    if !directors.is_empty() {
        tracing::info!("Directed by: {}", directors.join(", "));
    }
    tracing::info!("Status: {}", detail.status.as_deref().unwrap_or(NONE));
    tracing::info!("Budget: {}", format_money(detail.budget));
    tracing::info!("Revenue: {}", format_money(detail.revenue));
    if !detail.production_companies.is_empty() {
        tracing::info!(
            "Production: {}",
            detail
                .production_companies
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    tracing::info!("Poster: {}", view.poster_url);
    tracing::info!("Backdrop: {}", view.backdrop_url);
    tracing::info!("Trailer: {}", view.trailer_url.as_deref().unwrap_or(NONE));
    if let Some(overview) = detail.overview.as_deref().filter(|o| !o.is_empty()) {
        tracing::info!("Overview: {}", overview);
    }

    if let Some(ref credits) = detail.credits
        && !credits.cast.is_empty()
    {
        tracing::info!("Cast:");
        for member in credits.cast.iter().take(CAST_LIMIT) {
            match member.character.as_deref().filter(|c| !c.is_empty()) {
                Some(character) => tracing::info!("  {} as {}", member.name, character),
                None => tracing::info!("  {}", member.name),
            }
        }
    }

    if let Some(ref similar) = detail.similar
        && !similar.is_empty()
    {
        tracing::info!("Similar:");
        log_movie_rows(&similar.results, None);
    }
}
