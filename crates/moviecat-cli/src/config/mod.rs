//! Application configuration module.
//!
//! Locates `config.toml` (`--dir` or `~/.config/moviecat`), reads its
//! optional `[tmdb]` table and layers the `TMDB_*` environment variables on
//! top of it.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
