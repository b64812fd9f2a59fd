//! Page-level request joins.
//!
//! Each loader issues the requests one catalog page needs concurrently and
//! waits for all of them. The join is all-or-nothing: the first failing
//! request fails the page and no partial data is returned.

use tracing::instrument;

use crate::error::RequestError;
use crate::media::{ImageResolver, resolve_trailer_url};
use crate::tmdb::{
    GenreList, ListParams, LocalCatalogApi, MovieDetail, MovieDetailsParams, MoviePage,
    MovieSummary, SearchMovieParams,
};

/// Image size used for backdrops on the movie page.
const BACKDROP_SIZE: &str = "original";

/// Data behind the home page.
#[derive(Debug, Clone)]
pub struct HomeFeed {
    /// First page of popular movies.
    pub popular: MoviePage,
    /// First page of movies now in theaters.
    pub now_playing: MoviePage,
    /// First page of top rated movies.
    pub top_rated: MoviePage,
    /// First page of upcoming releases.
    pub upcoming: MoviePage,
    /// Genre list for labelling cards.
    pub genres: GenreList,
}

impl HomeFeed {
    /// Returns the movie shown in the featured banner (top popular movie).
    #[must_use]
    pub fn featured(&self) -> Option<&MovieSummary> {
        self.popular.results.first()
    }
}

/// Data behind the search page.
#[derive(Debug, Clone)]
pub struct SearchView {
    /// Requested page of search results.
    pub results: MoviePage,
    /// Genre list for filter labels.
    pub genres: GenreList,
}

/// Data behind the movie detail page.
#[derive(Debug, Clone)]
pub struct MovieView {
    /// Full details with credits, videos and similar movies.
    pub detail: MovieDetail,
    /// Poster URL (placeholder when absent).
    pub poster_url: String,
    /// Backdrop URL at original size (placeholder when absent).
    pub backdrop_url: String,
    /// YouTube trailer URL, if any.
    pub trailer_url: Option<String>,
}

/// Loads the home page: popular, now playing, top rated, upcoming and genres.
///
/// # Errors
///
/// Returns the first [`RequestError`] raised by any of the five requests.
#[instrument(skip_all)]
pub async fn load_home(api: &(impl LocalCatalogApi + Sync)) -> Result<HomeFeed, RequestError> {
    let first = ListParams::default();

    let (popular, now_playing, top_rated, upcoming, genres) = futures::try_join!(
        api.popular_movies(first),
        api.now_playing(first),
        api.top_rated(first),
        api.upcoming(first),
        api.genres(),
    )?;

    tracing::debug!(
        popular = popular.results.len(),
        now_playing = now_playing.results.len(),
        top_rated = top_rated.results.len(),
        upcoming = upcoming.results.len(),
        genres = genres.genres.len(),
        "home feed loaded"
    );

    Ok(HomeFeed {
        popular,
        now_playing,
        top_rated,
        upcoming,
        genres,
    })
}

/// Loads the search page: one page of results plus the genre list.
///
/// The requested page is sent as-is; bounding it by `total_pages` of a
/// previous response is the caller's job (see [`MoviePage::clamp_page`]).
///
/// # Errors
///
/// Returns the first [`RequestError`] raised by either request.
#[instrument(skip_all, fields(page = params.page))]
pub async fn load_search(
    api: &(impl LocalCatalogApi + Sync),
    params: &SearchMovieParams,
) -> Result<SearchView, RequestError> {
    let (results, genres) = futures::try_join!(api.search_movies(params), api.genres())?;

    tracing::debug!(
        total_results = results.total_results,
        total_pages = results.total_pages,
        "search page loaded"
    );

    Ok(SearchView { results, genres })
}

/// Loads the movie page and derives its image and trailer URLs.
///
/// # Errors
///
/// Returns a [`RequestError`] if the details request fails.
#[instrument(skip(api, images))]
pub async fn load_movie(
    api: &(impl LocalCatalogApi + Sync),
    id: u64,
    images: &ImageResolver,
) -> Result<MovieView, RequestError> {
    let detail = api.movie_details(&MovieDetailsParams::full(id)).await?;

    let poster_url = images.resolve_default(detail.poster_path.as_deref());
    let backdrop_url = images.resolve(detail.backdrop_path.as_deref(), BACKDROP_SIZE);
    let trailer_url = resolve_trailer_url(detail.videos.as_ref());

    Ok(MovieView {
        detail,
        poster_url,
        backdrop_url,
        trailer_url,
    })
}
