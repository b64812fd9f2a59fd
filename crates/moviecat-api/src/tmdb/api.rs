//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::params::{DiscoverParams, ListParams, MovieDetailsParams, SearchMovieParams};
use super::types::{GenreList, MovieDetail, MoviePage};
use crate::error::RequestError;

/// Movie catalog query façade.
///
/// Each operation maps its parameters onto exactly one API request. Nothing
/// is cached and errors are returned as produced by the transport.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches popular movies (`movie/popular`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn popular_movies(&self, params: ListParams) -> Result<MoviePage, RequestError>;

    /// Fetches movies now in theaters (`movie/now_playing`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn now_playing(&self, params: ListParams) -> Result<MoviePage, RequestError>;

    /// Fetches top rated movies (`movie/top_rated`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn top_rated(&self, params: ListParams) -> Result<MoviePage, RequestError>;

    /// Fetches upcoming releases (`movie/upcoming`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn upcoming(&self, params: ListParams) -> Result<MoviePage, RequestError>;

    /// Fetches movie details with the requested sub-resources (`movie/{id}`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn movie_details(&self, params: &MovieDetailsParams)
    -> Result<MovieDetail, RequestError>;

    /// Searches movies by title (configured search path).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<MoviePage, RequestError>;

    /// Fetches the movie genre list (`genre/movie/list`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn genres(&self) -> Result<GenreList, RequestError>;

    /// Fetches movies of one genre (`discover/movie`).
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] if the request fails or the body does not decode.
    async fn discover_by_genre(&self, params: &DiscoverParams) -> Result<MoviePage, RequestError>;
}
