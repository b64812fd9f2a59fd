//! Trailer URL extraction.

use crate::tmdb::VideoList;

/// YouTube watch URL prefix.
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Returns the YouTube watch URL of the first YouTube trailer.
///
/// Entries are matched in list order on `type == "Trailer"` and
/// `site == "YouTube"`; there is no further ranking. Returns `None` for a
/// missing or empty list, or when nothing matches.
#[must_use]
pub fn resolve_trailer_url(videos: Option<&VideoList>) -> Option<String> {
    videos?
        .results
        .iter()
        .find(|video| video.kind == "Trailer" && video.site == "YouTube")
        .map(|video| format!("{YOUTUBE_WATCH_URL}{}", video.key))
}
