//! Movie catalog client library for moviecat.
//!
//! Wraps the TMDB v3 API behind a typed query façade, joins the requests a
//! catalog page needs, and shapes responses into display-ready values.

/// Catalog client configuration.
pub mod config;

/// Request error taxonomy.
pub mod error;

/// Image and trailer URL shaping helpers.
pub mod media;

/// Concurrent page-level request joins.
pub mod pages;

/// Client-side filtering and sorting of result pages.
pub mod refine;

/// TMDB API client.
pub mod tmdb;

pub use config::CatalogConfig;
pub use error::RequestError;
