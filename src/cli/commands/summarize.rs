//! Summarize command implementation.

use super::load_video;
use crate::analyzer::{Action, Analyzer, Session};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::export::summary_to_pdf;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(url: &str, pdf: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let analyzer = Analyzer::new(&settings)?;
    let mut session = Session::new();
    load_video(&analyzer, &mut session, url).await?;

    let spinner = Output::spinner("Generating summary...");
    analyzer.dispatch(&mut session, Action::GenerateSummary).await?;
    spinner.finish_and_clear();

    let summary = match session.summary() {
        Some(Ok(summary)) => summary,
        Some(Err(e)) => {
            Output::error(&format!("{}", e));
            anyhow::bail!("summary generation failed");
        }
        None => anyhow::bail!("no summary was produced"),
    };

    Output::header("Video Summary");
    println!("\n{}\n", summary);

    if let Some(path) = pdf {
        let path = Settings::expand_path(&path);
        let bytes = summary_to_pdf(summary, &settings.export)?;
        std::fs::write(&path, bytes)?;
        Output::success(&format!("Saved summary to {}", path.display()));
    }

    Ok(())
}
