//! Request error taxonomy for catalog API calls.
//!
//! An empty result page is not an error; see
//! [`crate::tmdb::MoviePage::is_empty`].

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single catalog API request.
///
/// Every variant carries the endpoint path that was requested so that a
/// failure inside a page join still identifies which call broke.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request did not complete (connect failure, timeout, body read).
    #[error("request to {endpoint} failed")]
    Network {
        /// Endpoint path relative to the API base URL.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("TMDB API error (HTTP {status}) from {endpoint}: {message}")]
    Http {
        /// Endpoint path relative to the API base URL.
        endpoint: String,
        /// HTTP status code.
        status: StatusCode,
        /// TMDB `status_message`, or the raw body when it is not JSON.
        message: String,
    },

    /// A 2xx body did not match the expected response shape.
    #[error("failed to decode JSON response from {endpoint}")]
    Decode {
        /// Endpoint path relative to the API base URL.
        endpoint: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint path {endpoint}")]
    InvalidUrl {
        /// Endpoint path relative to the API base URL.
        endpoint: String,
        /// Underlying URL parse error.
        #[source]
        source: url::ParseError,
    },
}

impl RequestError {
    /// Returns the endpoint path the failed request targeted.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Network { endpoint, .. }
            | Self::Http { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::InvalidUrl { endpoint, .. } => endpoint,
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network { source, .. } => source.status(),
            Self::Decode { .. } | Self::InvalidUrl { .. } => None,
        }
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_http_error_carries_status_and_endpoint() {
        // Arrange
        let error = RequestError::Http {
            endpoint: String::from("movie/550"),
            status: StatusCode::NOT_FOUND,
            message: String::from("The resource you requested could not be found."),
        };

        // Act & Assert
        assert_eq!(error.endpoint(), "movie/550");
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert!(!error.is_timeout());
        assert_eq!(
            error.to_string(),
            "TMDB API error (HTTP 404 Not Found) from movie/550: \
             The resource you requested could not be found."
        );
    }

    #[test]
    fn test_decode_error_has_no_status() {
        // Arrange
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = RequestError::Decode {
            endpoint: String::from("genre/movie/list"),
            source,
        };

        // Act & Assert
        assert_eq!(error.endpoint(), "genre/movie/list");
        assert_eq!(error.status(), None);
        assert!(error.to_string().starts_with("failed to decode JSON response"));
    }

    #[test]
    fn test_error_chain_prints_cause_once() {
        // Arrange
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let cause = source.to_string();
        let error = RequestError::Decode {
            endpoint: String::from("movie/popular"),
            source,
        };

        // Act
        let chain = format!("{:#}", anyhow::Error::new(error));

        // Assert
        assert_eq!(
            chain,
            format!("failed to decode JSON response from movie/popular: {cause}")
        );
        assert_eq!(chain.matches(cause.as_str()).count(), 1);
    }
}
