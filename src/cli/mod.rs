//! CLI module for Vidlens.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Vidlens - YouTube video summaries and quizzes
///
/// Fetches a video's transcript, asks a language model for a summary or a
/// multiple-choice quiz, and serves both as an interactive web page.
#[derive(Parser, Debug)]
#[command(name = "vidlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web interface
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the transcript of a video
    Transcript {
        /// YouTube video URL
        url: String,
    },

    /// Summarize a video
    Summarize {
        /// YouTube video URL
        url: String,

        /// Also save the summary as a PDF at this path
        #[arg(long)]
        pdf: Option<String>,
    },

    /// Take a multiple-choice quiz about a video in the terminal
    Quiz {
        /// YouTube video URL
        url: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Tracing filter directive for the given verbosity count.
///
/// With no `-v` flags the configured level is used.
pub fn log_filter(verbose: u8, configured: &str) -> String {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("vidlens={},tower_http={}", level, level)
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}
