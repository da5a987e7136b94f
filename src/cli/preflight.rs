//! Pre-flight checks before operations that call the language model.

use crate::error::{Result, VidlensError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching a transcript needs no credentials.
    Transcript,
    /// Summaries, quizzes and the web UI call the language model.
    Generate,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Transcript => {}
        Operation::Generate => check_api_key(std::env::var("OPENAI_API_KEY").ok().as_deref())?,
    }
    Ok(())
}

/// Check that an API key value is present.
fn check_api_key(key: Option<&str>) -> Result<()> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(VidlensError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(VidlensError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
