//! Configuration module for Vidlens.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QuizPrompts, SummaryPrompts};
pub use settings::{
    ExportSettings, GeneralSettings, LlmSettings, PromptSettings, ServerSettings, Settings,
    TranscriptSettings,
};
