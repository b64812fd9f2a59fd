//! moviecat - browse the TMDB movie catalog from the terminal.

/// Application configuration (TOML + environment).
mod config;
/// Terminal rendering helpers.
mod display;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;
use crate::display::{
    log_genres, log_home, log_movie_page, log_movie_rows, log_movie_view, log_page_footer,
};
use moviecat_api::media::resolve_trailer_url;
use moviecat_api::pages::{load_home, load_movie, load_search};
use moviecat_api::refine::{SearchFilters, SortOrder, refine};
use moviecat_api::tmdb::{
    AppendResource, DiscoverParams, ListParams, LocalCatalogApi, MovieDetailsParams, MoviePage,
    SearchMovieParams, TmdbClient,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show the home page (featured, popular, now playing, top rated, upcoming).
    Home,
    /// List popular movies.
    Popular(ListArgs),
    /// List movies now in theaters.
    NowPlaying(ListArgs),
    /// List top rated movies.
    TopRated(ListArgs),
    /// List upcoming releases.
    Upcoming(ListArgs),
    /// Show movie details with cast, trailer and similar movies.
    Details(DetailsArgs),
    /// Print (or open) the YouTube trailer of a movie.
    Trailer(TrailerArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// List movie genres.
    Genres,
    /// Browse movies of one genre.
    Discover(DiscoverArgs),
    /// Build an image URL from a TMDB image path.
    Image(ImageArgs),
}

/// Arguments shared by the list subcommands.
#[derive(clap::Args)]
struct ListArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID (e.g. 693134).
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `trailer` subcommand.
#[derive(clap::Args)]
struct TrailerArgs {
    /// TMDB movie ID (e.g. 693134).
    #[arg(long, required = true)]
    id: u64,
    /// Open the trailer in the default browser.
    #[arg(long)]
    open: bool,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Duna").
    #[arg(long, required = true)]
    query: String,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Keep movies released in this year.
    #[arg(long)]
    year: Option<u32>,
    /// Keep movies tagged with this genre ID.
    #[arg(long)]
    genre: Option<u32>,
    /// Keep movies rated at least this value (0-10).
    #[arg(long)]
    min_rating: Option<f64>,
    /// Sort order: relevance, year, rating or title.
    #[arg(long, default_value = "relevance")]
    sort: SortOrder,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Genre ID (see `moviecat genres`).
    #[arg(long, required = true)]
    genre: u32,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// Server-side sort (e.g. "popularity.desc").
    #[arg(long)]
    sort_by: Option<String>,
}

/// Arguments for the `image` subcommand.
#[derive(clap::Args)]
struct ImageArgs {
    /// Image path from an API response (e.g. "/abc.jpg"). Omit for the placeholder.
    #[arg(long)]
    path: Option<String>,
    /// Size segment (e.g. "w342", "original"). Defaults to the configured size.
    #[arg(long)]
    size: Option<String>,
}

/// Movie list endpoints reachable from the CLI.
#[derive(Debug, Clone, Copy)]
enum MovieList {
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl MovieList {
    /// Endpoint path, for error context.
    const fn endpoint(self) -> &'static str {
        match self {
            Self::Popular => "movie/popular",
            Self::NowPlaying => "movie/now_playing",
            Self::TopRated => "movie/top_rated",
            Self::Upcoming => "movie/upcoming",
        }
    }
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    AppConfig::load_from_dir(dir.map(PathBuf::as_path)).context("failed to load config")
}

/// Builds a `TmdbClient` from the config file and `TMDB_*` environment variables.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set, the config is invalid, or the
/// client fails to build.
#[instrument(skip_all)]
fn build_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let catalog_config = load_config(dir)?.catalog_config(|name| std::env::var(name).ok())?;

    TmdbClient::builder()
        .config(catalog_config)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Rejects a requested page past the last page of a response.
///
/// # Errors
///
/// Returns an error if `requested` exceeds `total_pages` of a non-empty result set.
fn ensure_page_in_range(requested: u32, page: &MoviePage) -> Result<()> {
    if page.total_pages > 0 && page.clamp_page(requested) != requested {
        bail!(
            "page {} is out of range (last page: {})",
            requested,
            page.total_pages
        );
    }
    Ok(())
}

/// Runs the `home` subcommand.
///
/// # Errors
///
/// Returns an error if any of the home page requests fails.
#[instrument(skip_all)]
async fn run_home(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let feed = load_home(&client)
        .await
        .context("failed to load home page")?;

    log_home(&feed);
    Ok(())
}

/// Runs one of the movie list subcommands.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip(args, dir))]
async fn run_list(list: MovieList, args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let params = ListParams::page(args.page);

    let page = match list {
        MovieList::Popular => client.popular_movies(params).await,
        MovieList::NowPlaying => client.now_playing(params).await,
        MovieList::TopRated => client.top_rated(params).await,
        MovieList::Upcoming => client.upcoming(params).await,
    }
    .with_context(|| format!("TMDB {} request failed", list.endpoint()))?;

    ensure_page_in_range(args.page, &page)?;

    if let Some(ref dates) = page.dates {
        tracing::info!("Release window: {} to {}", dates.minimum, dates.maximum);
    }
    log_movie_page(&page, None);
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let images = client.config().image_resolver();

    let view = load_movie(&client, args.id, &images)
        .await
        .with_context(|| format!("failed to load movie {}", args.id))?;

    log_movie_view(&view);
    Ok(())
}

/// Runs the `trailer` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails or the browser cannot be opened.
#[instrument(skip_all)]
async fn run_trailer(args: &TrailerArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let params = MovieDetailsParams::new(args.id).with(AppendResource::Videos);

    let detail = client
        .movie_details(&params)
        .await
        .with_context(|| format!("TMDB movie/{} request failed", args.id))?;

    let Some(url) = resolve_trailer_url(detail.videos.as_ref()) else {
        tracing::info!("No trailer available for {}.", detail.title);
        return Ok(());
    };

    tracing::info!("{}", url);
    if args.open {
        open::that(&url).with_context(|| format!("failed to open {url}"))?;
    }
    Ok(())
}

/// Runs the `search` subcommand. A blank query finds nothing and sends no request.
///
/// # Errors
///
/// Returns an error if a request fails or the page is out of range.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    if args.query.trim().is_empty() {
        log_movie_rows(&[], None);
        return Ok(());
    }

    let client = build_client(dir)?;

    let mut params = SearchMovieParams::new(&args.query).page(args.page);
    if let Some(year) = args.year {
        params = params.year(year);
    }

    let view = load_search(&client, &params)
        .await
        .context("failed to load search page")?;

    ensure_page_in_range(args.page, &view.results)?;

    let filters = SearchFilters {
        genre_id: args.genre,
        year: args.year.and_then(|y| i32::try_from(y).ok()),
        min_rating: args.min_rating,
    };
    let movies = refine(&view.results.results, &filters, args.sort);

    log_movie_rows(&movies, Some(&view.genres));
    if !view.results.is_empty() {
        log_page_footer(&view.results);
    }
    if view.results.has_next_page() {
        tracing::info!(
            "Next page: --page {}",
            view.results.clamp_page(args.page.saturating_add(1))
        );
    }
    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genres(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let genres = client
        .genres()
        .await
        .context("TMDB genre/movie/list request failed")?;

    log_genres(&genres);
    Ok(())
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let mut params = DiscoverParams::new(args.genre).page(args.page);
    if let Some(ref sort_by) = args.sort_by {
        params = params.sort_by(sort_by);
    }

    let page = client
        .discover_by_genre(&params)
        .await
        .context("TMDB discover/movie request failed")?;

    ensure_page_in_range(args.page, &page)?;
    log_movie_page(&page, None);
    Ok(())
}

/// Runs the `image` subcommand. Needs no API key.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded.
#[instrument(skip_all)]
fn run_image(args: &ImageArgs, dir: Option<&PathBuf>) -> Result<()> {
    let resolver = load_config(dir)?.image_resolver(|name| std::env::var(name).ok());

    let path = args.path.as_deref();
    let url = args.size.as_deref().map_or_else(
        || resolver.resolve_default(path),
        |size| resolver.resolve(path, size),
    );

    tracing::info!("{}", url);
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Home => run_home(dir).await,
        Commands::Popular(args) => run_list(MovieList::Popular, &args, dir).await,
        Commands::NowPlaying(args) => run_list(MovieList::NowPlaying, &args, dir).await,
        Commands::TopRated(args) => run_list(MovieList::TopRated, &args, dir).await,
        Commands::Upcoming(args) => run_list(MovieList::Upcoming, &args, dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Trailer(args) => run_trailer(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Genres => run_genres(dir).await,
        Commands::Discover(args) => run_discover(&args, dir).await,
        Commands::Image(args) => run_image(&args, dir),
    }
}
