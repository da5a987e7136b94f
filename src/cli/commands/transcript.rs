//! Transcript command implementation.

use super::load_video;
use crate::analyzer::{Analyzer, Session};
use crate::cli::preflight::{self, Operation};
use crate::config::Settings;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(url: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcript)?;

    let analyzer = Analyzer::new(&settings)?;
    let mut session = Session::new();
    load_video(&analyzer, &mut session, url).await?;

    if let Some(transcript) = session.transcript() {
        println!("{}", transcript.text);
    }

    Ok(())
}
