//! Interactive quiz command.

use super::load_video;
use crate::analyzer::{Action, Analyzer, Session};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the quiz command.
pub async fn run_quiz(url: &str, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let analyzer = Analyzer::new(&settings)?;
    let mut session = Session::new();
    load_video(&analyzer, &mut session, url).await?;

    let spinner = Output::spinner("Preparing quiz...");
    analyzer.dispatch(&mut session, Action::GenerateQuiz).await?;
    spinner.finish_and_clear();

    let questions = match session.quiz() {
        Some(Ok(quiz)) => quiz.quiz().questions.clone(),
        Some(Err(e)) => {
            Output::error(&format!("{}", e));
            anyhow::bail!("quiz generation failed");
        }
        None => anyhow::bail!("no quiz was produced"),
    };

    if questions.is_empty() {
        Output::warning("No quiz questions were generated. Please try again or check the transcript.");
        return Ok(());
    }

    Output::header("Video Quiz");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for (index, question) in questions.iter().enumerate() {
        println!("\n{}", style(&question.text).bold());

        if question.options.is_empty() {
            Output::warning(&format!("No options available for question {}", index + 1));
            continue;
        }

        for option in &question.options {
            Output::list_item(option);
        }

        loop {
            print!("{} ", style("Your answer (letter, Enter to skip):").green());
            stdout.flush()?;

            let mut input = String::new();
            if stdin.lock().read_line(&mut input)? == 0 {
                break;
            }

            let input = input.trim();
            if input.is_empty() {
                break;
            }

            let Some(option) = parse_choice(input) else {
                Output::warning("Please enter a single letter such as a, b, c or d.");
                continue;
            };

            match analyzer
                .dispatch(&mut session, Action::SelectAnswer { question: index, option })
                .await
            {
                Ok(()) => break,
                Err(e) => Output::warning(&format!("{}", e)),
            }
        }
    }

    let result = analyzer.submit(&mut session).await?;
    Output::quiz_result(&result);

    Ok(())
}

/// Option position for a typed answer letter ("b" or "B)" -> 1).
fn parse_choice(input: &str) -> Option<usize> {
    let input = input.trim().trim_end_matches(')');
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some(usize::from(c.to_ascii_lowercase() as u8 - b'a'))
        }
        _ => None,
    }
}
