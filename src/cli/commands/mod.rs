//! CLI command implementations.

mod config;
mod quiz;
mod serve;
mod summarize;
mod transcript;

pub use config::run_config;
pub use quiz::run_quiz;
pub use serve::run_serve;
pub use summarize::run_summarize;
pub use transcript::run_transcript;

use crate::analyzer::{Action, Analyzer, Session};
use crate::cli::Output;
use crate::error::VidlensError;
use crate::youtube::watch_url;

/// Load a video into the session, failing if it has no usable transcript.
async fn load_video(analyzer: &Analyzer, session: &mut Session, url: &str) -> anyhow::Result<()> {
    let spinner = Output::spinner("Fetching transcript...");
    analyzer
        .dispatch(session, Action::LoadUrl(url.to_string()))
        .await?;
    spinner.finish_and_clear();

    let video = session
        .video()
        .ok_or_else(|| VidlensError::VideoIdNotFound(url.to_string()))?;

    if let Err(e) = &video.transcript {
        Output::error(&format!("{}", e));
        anyhow::bail!("no transcript available for video {}", video.video_id);
    }

    Output::kv("Video", &watch_url(&video.video_id));
    Ok(())
}
