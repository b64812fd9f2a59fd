//! Image URL resolution.

use std::sync::LazyLock;

use regex::Regex;

/// Size token used when the caller does not pick one.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

/// Matches a TMDB image size segment (`w500`, `h632`, `original`).
#[allow(clippy::expect_used)]
static SIZE_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[wh]\d+|original)$").expect("failed to compile size segment regex")
});

/// Builds fully-qualified image URLs from relative TMDB paths.
///
/// The configured base may embed a default size
/// (`https://image.tmdb.org/t/p/w500`) or stop at the size-less root
/// (`https://image.tmdb.org/t/p`). Either way the size is carried as a
/// separate segment and replaced per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    /// Base URL without size segment and without trailing `/`.
    root: String,
    /// Size segment embedded in the configured base, if any.
    embedded_size: Option<String>,
    /// URL returned for absent paths.
    placeholder: String,
}

impl ImageResolver {
    /// Creates a resolver from an image base URL and a placeholder URL.
    #[must_use]
    pub fn new(image_base_url: &str, placeholder: &str) -> Self {
        let trimmed = image_base_url.trim_end_matches('/');
        let (root, embedded_size) = match trimmed.rsplit_once('/') {
            Some((root, last)) if SIZE_SEGMENT_RE.is_match(last) => {
                (String::from(root), Some(String::from(last)))
            }
            _ => (String::from(trimmed), None),
        };

        Self {
            root,
            embedded_size,
            placeholder: String::from(placeholder),
        }
    }

    /// Returns the size segment embedded in the configured base URL.
    #[must_use]
    pub fn embedded_size(&self) -> Option<&str> {
        self.embedded_size.as_deref()
    }

    /// Returns the placeholder URL.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Resolves `path` at the given size.
    ///
    /// Returns the placeholder when `path` is `None` or empty. Otherwise the
    /// result is `{root}/{size}/{path}`: the size segment of the configured
    /// base is substituted, never appended after it.
    #[must_use]
    pub fn resolve(&self, path: Option<&str>, size: &str) -> String {
        match path.map(|p| p.trim_start_matches('/')) {
            Some(relative) if !relative.is_empty() => {
                format!("{}/{size}/{relative}", self.root)
            }
            _ => self.placeholder.clone(),
        }
    }

    /// Resolves `path` at the configured base's size, or `w500`.
    #[must_use]
    pub fn resolve_default(&self, path: Option<&str>) -> String {
        let size = self.embedded_size().unwrap_or(DEFAULT_IMAGE_SIZE);
        self.resolve(path, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "https://via.placeholder.com/500x750/1a1a2e/ffffff?text=No+Image";

    fn resolver(base: &str) -> ImageResolver {
        ImageResolver::new(base, PLACEHOLDER)
    }

    #[test]
    fn test_absent_path_returns_placeholder_for_every_size() {
        // Arrange
        let resolver = resolver("https://image.tmdb.org/t/p/w500");

        // Act & Assert
        for size in ["w92", "w185", "w500", "w780", "h632", "original", ""] {
            assert_eq!(resolver.resolve(None, size), PLACEHOLDER);
            assert_eq!(resolver.resolve(Some(""), size), PLACEHOLDER);
        }
    }

    #[test]
    fn test_size_substitutes_embedded_segment() {
        // Arrange
        let resolver = resolver("https://image.tmdb.org/t/p/w500");

        // Act
        let url = resolver.resolve(Some("/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg"), "original");

        // Assert
        assert_eq!(
            url,
            "https://image.tmdb.org/t/p/original/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg"
        );
    }

    #[test]
    fn test_default_size_uses_embedded_segment() {
        // Arrange
        let resolver = resolver("https://image.tmdb.org/t/p/w342/");

        // Act
        let url = resolver.resolve_default(Some("/poster.jpg"));

        // Assert
        assert_eq!(resolver.embedded_size(), Some("w342"));
        assert_eq!(url, "https://image.tmdb.org/t/p/w342/poster.jpg");
    }

    #[test]
    fn test_base_without_size_segment_gets_size_added() {
        // Arrange
        let resolver = resolver("https://cdn.example.com/t/p");

        // Act
        let url = resolver.resolve(Some("/poster.jpg"), "w185");
        let default = resolver.resolve_default(Some("/poster.jpg"));

        // Assert
        assert_eq!(resolver.embedded_size(), None);
        assert_eq!(url, "https://cdn.example.com/t/p/w185/poster.jpg");
        assert_eq!(default, "https://cdn.example.com/t/p/w500/poster.jpg");
    }

    #[test]
    fn test_path_is_not_otherwise_transformed() {
        // Arrange
        let resolver = resolver("https://image.tmdb.org/t/p/w500");

        // Act
        let url = resolver.resolve(Some("/Mixed_Case-123.PNG"), "w92");

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/w92/Mixed_Case-123.PNG");
    }

    #[test]
    fn test_path_without_leading_slash() {
        // Arrange
        let resolver = resolver("https://image.tmdb.org/t/p/w500");

        // Act
        let url = resolver.resolve(Some("poster.jpg"), "w500");

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/poster.jpg");
    }
}
