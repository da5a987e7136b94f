//! Prompt templates for Vidlens.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub quiz: QuizPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: "You are an assistant that writes clear, accurate summaries of video transcripts.".to_string(),

            user: r#"Provide a comprehensive, well-structured summary of the following transcript in 5-7 paragraphs. Include an introduction, main points with supporting details, and a conclusion. Ensure the summary is grammatically correct, free of typos, and captures the key points effectively:

{{transcript}}"#.to_string(),
        }
    }
}

/// Prompts for quiz generation.
///
/// The user prompt fixes the line format read back by the quiz parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QuizPrompts {
    fn default() -> Self {
        Self {
            system: "You are an assistant that writes multiple-choice quizzes about video transcripts.".to_string(),

            user: r#"Generate a 10-question multiple-choice quiz based on this transcript. Format each question exactly as follows:
Q1: [Question]
a) [Option A]
b) [Option B]
c) [Option C]
d) [Option D]
Correct: [Correct option letter]

Ensure questions are clear, concise, and directly related to the main points of the transcript:

{{transcript}}"#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let quiz_path = custom_path.join("quiz.toml");
            if quiz_path.exists() {
                let content = std::fs::read_to_string(&quiz_path)?;
                prompts.quiz = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are resolved in a single pass, so substituted values are
    /// never rescanned. Unknown placeholders are left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// User prompt asking for a summary of `transcript`.
    pub fn summary_request(&self, transcript: &str) -> String {
        self.render_with_custom(&self.summary.user, &transcript_vars(transcript))
    }

    /// User prompt asking for a quiz about `transcript`.
    pub fn quiz_request(&self, transcript: &str) -> String {
        self.render_with_custom(&self.quiz.user, &transcript_vars(transcript))
    }
}

fn transcript_vars(transcript: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("transcript".to_string(), transcript.to_string());
    vars
}
