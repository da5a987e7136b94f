//! Vidlens - YouTube video summaries and quizzes
//!
//! Turns a YouTube URL into a transcript, asks a language model for a summary
//! or a multiple-choice quiz, and lets the user take the quiz and export the
//! summary as a PDF.
//!
//! # Architecture
//!
//! - `youtube` - Video ID extraction and transcript retrieval
//! - `generation` - Summary and quiz generation with a language model
//! - `quiz` - Quiz text parsing and quiz-taking state
//! - `analyzer` - Session state and the user actions that change it
//! - `export` - PDF export of summaries
//! - `web` - Web interface
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use vidlens::analyzer::{Action, Analyzer, Session};
//! use vidlens::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let analyzer = Analyzer::new(&settings)?;
//!
//!     let mut session = Session::new();
//!     analyzer
//!         .dispatch(&mut session, Action::LoadUrl("https://youtu.be/dQw4w9WgXcQ".into()))
//!         .await?;
//!     analyzer.dispatch(&mut session, Action::GenerateQuiz).await?;
//!
//!     if let Some(Ok(quiz)) = session.quiz() {
//!         println!("{} questions", quiz.quiz().len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod openai;
pub mod quiz;
pub mod web;
pub mod youtube;

pub use error::{Result, VidlensError};
