//! YouTube integration: video ID extraction and transcript retrieval.

mod transcript;
mod video_id;

pub use transcript::{Transcript, TranscriptSource, YoutubeTranscripts};
pub use video_id::{embed_url, extract_video_id, watch_url};
