//! Video ID extraction from YouTube URLs.

use regex::Regex;
use std::sync::LazyLock;

/// Matches the supported YouTube URL forms and captures the 11-character ID
/// that immediately follows the prefix.
static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:https?://)?
        (?:www\.)?
        (?:
            youtube\.com/(?:watch\?v=|embed/|v/|shorts/)
            |
            youtu\.be/
        )
        (\S{11})
    ",
    )
    .expect("Invalid regex")
});

/// Extract the video ID from a YouTube URL.
///
/// Returns `None` when no supported URL form is present. The ID is not
/// checked against YouTube.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Embeddable player URL for a video ID.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}
