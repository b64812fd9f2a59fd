//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and decodes list, search, genre, and detail responses.

mod api;
mod client;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use params::{
    AppendResource, DiscoverParams, ListParams, MovieDetailsParams, SearchMovieParams,
};
pub use types::{
    CastMember, Credits, CrewMember, DateWindow, Genre, GenreList, MovieDetail, MoviePage,
    MovieSummary, ProductionCompany, Video, VideoList,
};
