//! Transcript retrieval for YouTube videos.

use crate::config::TranscriptSettings;
use crate::error::{Result, VidlensError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// The spoken text of a video, in original segment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Segments joined with single spaces.
    pub text: String,
}

impl Transcript {
    /// Create a transcript by joining segment texts with single spaces.
    pub fn from_segments<I, S>(video_id: &str, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            video_id: video_id.to_string(),
            text,
        }
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<Transcript>;
}

/// Transcript source backed by YouTube's caption tracks.
pub struct YoutubeTranscripts {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
    preserve_formatting: bool,
}

impl YoutubeTranscripts {
    /// Create a transcript source using the configured language preferences.
    pub fn new(settings: &TranscriptSettings) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            VidlensError::Transcript(format!("Failed to initialise transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            languages: settings.languages.clone(),
            preserve_formatting: settings.preserve_formatting,
        })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let fetched = self
            .api
            .fetch_transcript(video_id, &languages, self.preserve_formatting)
            .await
            .map_err(|e| {
                error!("Error getting transcript: {}", e);
                VidlensError::Transcript(e.to_string())
            })?;

        debug!("Fetched {} transcript segments", fetched.snippets.len());

        Ok(Transcript::from_segments(
            video_id,
            fetched.snippets.iter().map(|s| s.text.as_str()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_joined_in_order() {
        let transcript = Transcript::from_segments("abc", ["hello there", "general", "kenobi"]);
        assert_eq!(transcript.text, "hello there general kenobi");
        assert_eq!(transcript.video_id, "abc");
    }

    struct Canned;

    #[async_trait]
    impl TranscriptSource for Canned {
        async fn fetch(&self, video_id: &str) -> Result<Transcript> {
            Ok(Transcript::from_segments(video_id, ["one", "two"]))
        }
    }

    #[test]
    fn test_source_as_trait_object() {
        let source: Box<dyn TranscriptSource> = Box::new(Canned);
        let transcript = tokio_test::block_on(source.fetch("abc")).unwrap();
        assert_eq!(transcript.text, "one two");
    }

    #[test]
    fn test_no_segments_gives_empty_text() {
        let transcript = Transcript::from_segments("abc", Vec::<String>::new());
        assert_eq!(transcript.text, "");
    }
}
