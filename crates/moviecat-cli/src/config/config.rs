//! `AppConfig` struct, TOML loading, and environment overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use moviecat_api::CatalogConfig;
use moviecat_api::config::{DEFAULT_IMAGE_BASE_URL, DEFAULT_PLACEHOLDER_IMAGE_URL};
use moviecat_api::media::ImageResolver;
use serde::{Deserialize, Serialize};

/// Environment variable holding the TMDB API key (required for API calls).
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "TMDB_API_BASE_URL";
/// Environment variable overriding the image base URL.
pub const ENV_IMAGE_BASE_URL: &str = "TMDB_IMAGE_BASE_URL";
/// Environment variable overriding the search endpoint path.
pub const ENV_SEARCH_PATH: &str = "TMDB_SEARCH_PATH";
/// Environment variable overriding the response language.
pub const ENV_LANGUAGE: &str = "TMDB_LANGUAGE";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under `~/.config` used when `--dir` is not given.
const CONFIG_DIR_NAME: &str = "moviecat";

/// Looks up `name` through `env`, treating blank values as unset.
fn env_value(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    env(name).filter(|value| !value.trim().is_empty())
}

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB connection settings. Unset fields fall back to library defaults.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL, optionally ending in a size segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Response language (e.g. "pt-BR").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Movie search endpoint path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_path: Option<String>,
    /// Image shown for movies without artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_image_url: Option<String>,
}

impl AppConfig {
    /// Returns the config file path for a config directory.
    ///
    /// `dir` selects `{dir}/config.toml`; without it the file lives under
    /// `{home}/.config/moviecat/`. `home` is `None` when no home directory is
    /// known.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `dir` nor `home` is given.
    pub fn path_in(dir: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
        let dir = match (dir, home) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(home)) => home.join(".config").join(CONFIG_DIR_NAME),
            (None, None) => bail!("HOME environment variable is not set; pass --dir"),
        };
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Loads the config for the `--dir` option, falling back to `$HOME`.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory can be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load_from_dir(dir: Option<&Path>) -> Result<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        let path = Self::path_in(dir, home.as_deref())?;
        Self::load(&path)
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolves the catalog client configuration.
    ///
    /// Precedence per setting: environment variable, then config file, then
    /// library default. `env` looks up a variable by name so callers decide
    /// where the environment comes from. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `TMDB_API_KEY` is missing or empty, or the base URL
    /// is invalid.
    pub fn catalog_config(&self, env: impl Fn(&str) -> Option<String>) -> Result<CatalogConfig> {
        let api_key = env_value(&env, ENV_API_KEY)
            .with_context(|| format!("{ENV_API_KEY} environment variable is required"))?;

        let mut config = CatalogConfig::new(api_key)?;

        if let Some(url) = env_value(&env, ENV_BASE_URL).or_else(|| self.tmdb.base_url.clone())
        {
            config = config.base_url(&url)?;
        }
        if let Some(url) = self.image_base_url(&env) {
            config = config.image_base_url(url);
        }
        if let Some(language) =
            env_value(&env, ENV_LANGUAGE).or_else(|| self.tmdb.language.clone())
        {
            config = config.language(language);
        }
        if let Some(path) =
            env_value(&env, ENV_SEARCH_PATH).or_else(|| self.tmdb.search_path.clone())
        {
            config = config.search_path(path);
        }
        if let Some(ref url) = self.tmdb.placeholder_image_url {
            config = config.placeholder_image_url(url.clone());
        }

        Ok(config)
    }

    /// Builds an image resolver without requiring an API key.
    #[must_use]
    pub fn image_resolver(&self, env: impl Fn(&str) -> Option<String>) -> ImageResolver {
        let base = self
            .image_base_url(&env)
            .unwrap_or_else(|| String::from(DEFAULT_IMAGE_BASE_URL));
        let placeholder = self
            .tmdb
            .placeholder_image_url
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER_IMAGE_URL);
        ImageResolver::new(&base, placeholder)
    }

    /// Image base URL from the environment or the config file.
    fn image_base_url(&self, env: &impl Fn(&str) -> Option<String>) -> Option<String> {
        env_value(env, ENV_IMAGE_BASE_URL).or_else(|| self.tmdb.image_base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.base_url.is_none());
        assert!(config.tmdb.language.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\nlanguage = \"en-US\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.language.as_deref(), Some("en-US"));
        assert!(config.tmdb.search_path.is_none());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_path_in_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/catalog");
        let home = Path::new("/home/user");

        // Act
        let path = AppConfig::path_in(Some(dir.as_path()), Some(home)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/catalog/config.toml"));
    }

    #[test]
    fn test_path_in_home() {
        // Arrange & Act
        let path = AppConfig::path_in(None, Some(Path::new("/home/user"))).unwrap();

        // Assert
        assert_eq!(
            path,
            PathBuf::from("/home/user/.config/moviecat/config.toml")
        );
    }

    #[test]
    fn test_path_without_dir_or_home_fails() {
        // Arrange & Act
        let result = AppConfig::path_in(None, None);

        // Assert
        assert!(result.unwrap_err().to_string().contains("--dir"));
    }

    #[test]
    fn test_load_from_dir_reads_config_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[tmdb]\nsearch_path = \"search/collection_movies\"\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load_from_dir(Some(dir.path())).unwrap();

        // Assert
        assert_eq!(
            config.tmdb.search_path.as_deref(),
            Some("search/collection_movies")
        );
    }

    #[test]
    fn test_catalog_config_requires_api_key() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let result = config.catalog_config(env_from(&[(ENV_API_KEY, "")]));

        // Assert
        assert!(result.unwrap_err().to_string().contains("TMDB_API_KEY"));
    }

    #[test]
    fn test_catalog_config_defaults() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let catalog = config
            .catalog_config(env_from(&[(ENV_API_KEY, "key")]))
            .unwrap();

        // Assert
        assert_eq!(catalog.api_key, "key");
        assert_eq!(catalog.language, "pt-BR");
        assert_eq!(catalog.base_url.as_str(), "https://api.themoviedb.org/3/");
    }

    #[test]
    fn test_env_overrides_config_file() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                base_url: Some(String::from("http://file.example.com/3")),
                language: Some(String::from("en-US")),
                search_path: Some(String::from("search/collection_movies")),
                ..TmdbConfig::default()
            },
        };
        let env = env_from(&[
            (ENV_API_KEY, "key"),
            (ENV_BASE_URL, "http://env.example.com/3"),
            (ENV_SEARCH_PATH, "search/movie"),
        ]);

        // Act
        let catalog = config.catalog_config(env).unwrap();

        // Assert
        assert_eq!(catalog.base_url.as_str(), "http://env.example.com/3/");
        assert_eq!(catalog.language, "en-US");
        assert_eq!(catalog.search_path, "search/movie");
    }

    #[test]
    fn test_image_resolver_without_api_key() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                image_base_url: Some(String::from("https://cdn.example.com/img/w342")),
                ..TmdbConfig::default()
            },
        };

        // Act
        let resolver = config.image_resolver(env_from(&[]));

        // Assert
        assert_eq!(
            resolver.resolve_default(Some("/a.jpg")),
            "https://cdn.example.com/img/w342/a.jpg"
        );
    }

    #[test]
    fn test_blank_env_values_fall_back_to_config_file() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                base_url: Some(String::from("http://file.example.com/3")),
                image_base_url: Some(String::from("https://cdn.example.com/img/w342")),
                language: Some(String::from("en-US")),
                search_path: Some(String::from("search/collection_movies")),
                ..TmdbConfig::default()
            },
        };
        let env = env_from(&[
            (ENV_API_KEY, "key"),
            (ENV_BASE_URL, ""),
            (ENV_IMAGE_BASE_URL, " "),
            (ENV_LANGUAGE, ""),
            (ENV_SEARCH_PATH, "  "),
        ]);

        // Act
        let catalog = config.catalog_config(env).unwrap();

        // Assert
        assert_eq!(catalog.base_url.as_str(), "http://file.example.com/3/");
        assert_eq!(catalog.image_base_url, "https://cdn.example.com/img/w342");
        assert_eq!(catalog.language, "en-US");
        assert_eq!(catalog.search_path, "search/collection_movies");
    }

    #[test]
    fn test_blank_env_values_fall_back_to_defaults() {
        // Arrange
        let config = AppConfig::default();
        let env = env_from(&[
            (ENV_API_KEY, "key"),
            (ENV_BASE_URL, ""),
            (ENV_IMAGE_BASE_URL, ""),
            (ENV_LANGUAGE, ""),
            (ENV_SEARCH_PATH, ""),
        ]);

        // Act
        let catalog = config.catalog_config(env).unwrap();

        // Assert
        assert_eq!(catalog.base_url.as_str(), "https://api.themoviedb.org/3/");
        assert_eq!(catalog.image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(catalog.language, "pt-BR");
        assert_eq!(catalog.search_path, "search/movie");
    }

    #[test]
    fn test_blank_image_base_env_keeps_urls_fully_qualified() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let resolver = config.image_resolver(env_from(&[(ENV_IMAGE_BASE_URL, "")]));

        // Assert
        assert_eq!(
            resolver.resolve(Some("/abc.jpg"), "w500"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                language: Some(String::from("pt-BR")),
                ..TmdbConfig::default()
            },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert!(!toml_str.contains("base_url"));
        assert_eq!(parsed, config);
    }
}
