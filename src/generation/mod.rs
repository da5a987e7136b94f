//! Summary and quiz generation with a language model.
//!
//! Both operations are single-turn completions: a fixed prompt template with
//! the transcript interpolated, sent once, with no retries.

mod openai;

pub use openai::OpenAIGenerator;

use crate::config::Prompts;
use crate::error::{Result, VidlensError};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

/// Trait for text completion backends.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Complete a single system + user prompt pair and return the text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Generate a multi-paragraph summary of a transcript.
///
/// An empty completion is reported as a generation error.
#[instrument(skip_all, fields(transcript_len = transcript.len()))]
pub async fn summarize(
    generator: &dyn ContentGenerator,
    prompts: &Prompts,
    transcript: &str,
) -> Result<String> {
    let request = prompts.summary_request(transcript);

    let summary = generator
        .complete(&prompts.summary.system, &request)
        .await
        .inspect_err(|e| error!("Error generating summary: {}", e))?;

    if summary.trim().is_empty() {
        error!("Summary generation returned empty response");
        return Err(VidlensError::Generation(
            "The model returned an empty summary".to_string(),
        ));
    }

    info!("Generated summary ({} characters)", summary.len());
    Ok(summary)
}

/// Generate the raw text of a multiple-choice quiz about a transcript.
///
/// A whitespace-only completion is not an error: it is logged and returned
/// as an empty string, which parses to an empty quiz.
#[instrument(skip_all, fields(transcript_len = transcript.len()))]
pub async fn generate_quiz(
    generator: &dyn ContentGenerator,
    prompts: &Prompts,
    transcript: &str,
) -> Result<String> {
    let request = prompts.quiz_request(transcript);

    let quiz_text = generator
        .complete(&prompts.quiz.system, &request)
        .await
        .inspect_err(|e| error!("Error generating quiz: {}", e))?;

    debug!("Quiz response: {}", quiz_text);

    if quiz_text.trim().is_empty() {
        warn!("Quiz generation returned empty response.");
        return Ok(String::new());
    }

    Ok(quiz_text)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Generator that replays canned responses and records the prompts it saw.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        responses: Mutex<Vec<Result<String>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }
    }

    #[async_trait]
    impl ContentGenerator for ScriptedGenerator {
        async fn complete(&self, _system: &str, user: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(user.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(VidlensError::Generation("no scripted response".to_string())))
        }
    }
}
