//! HTML rendering of a session.
//!
//! Rendering is a pure function of [`Session`]; all text that came from the
//! user, the transcript service or the model is escaped.

use crate::analyzer::Session;
use crate::quiz::{answer_label, QuizSession};
use crate::youtube::embed_url;

const STYLE: &str = r#"
body { background: #1e1e1e; color: #f0f2f6; font-family: sans-serif; margin: 0; }
main { max-width: 960px; margin: 2rem auto; background: #2e2e2e; padding: 2rem; border-radius: 10px; }
h1, h2, h3, p, label, summary { color: #f0f2f6; }
input[type=text], textarea { width: 100%; box-sizing: border-box; background: #2e2e2e; color: #f0f2f6; border: 1px solid #666; padding: .5rem; }
button, .button { display: block; width: 100%; box-sizing: border-box; text-align: center; text-decoration: none; border: 0; border-radius: 5px; background: #444; color: #f0f2f6; padding: .6rem; margin: .5rem 0; cursor: pointer; }
button:hover, .button:hover { background: #666; }
.intro { padding: 20px; background: #3e3e3e; border-radius: 10px; margin-bottom: 20px; }
.columns { display: flex; gap: 1rem; }
.columns form { flex: 1; }
.summary-text { background: #3e3e3e; padding: 20px; border-radius: 10px; border-left: 5px solid #0068c9; margin-bottom: 20px; white-space: pre-wrap; }
.quiz-option { display: block; margin: 10px 0; padding: 15px; border: 1px solid #444; border-radius: 5px; cursor: pointer; }
.quiz-option:hover { background: #3e3e3e; }
.notice { padding: 1rem; border-radius: 5px; margin: .5rem 0; }
.warning { background: #5c4b12; }
.error { background: #5c1f1f; }
.success { background: #1f5c2b; }
.info { background: #1f3f5c; }
iframe { width: 100%; aspect-ratio: 16 / 9; border: 0; }
"#;

/// Posts each radio change as a single answer selection.
///
/// The redirect is not followed. An accepted selection reopens the quiz, so
/// any shown score is removed; a rejected one reloads the page to show the
/// server's state.
const SCRIPT: &str = r#"
document.querySelectorAll('input[data-question]').forEach(function (input) {
  input.addEventListener('change', function () {
    var body = new URLSearchParams({ question: input.dataset.question, option: input.value });
    fetch('/quiz/answer', { method: 'POST', body: body, redirect: 'manual' })
      .then(function (response) {
        if (response.ok || response.type === 'opaqueredirect') {
          var result = document.getElementById('quiz-result');
          if (result) { result.remove(); }
        } else {
          window.location.reload();
        }
      })
      .catch(function () { window.location.reload(); });
  });
});
"#;

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn notice(kind: &str, message: &str) -> String {
    format!(
        "<div class=\"notice {}\">{}</div>\n",
        kind,
        html_escape(message)
    )
}

/// Render the full page for a session.
pub fn render_page(session: &Session) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>YouTube Video Analyzer</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n<main>\n", STYLE));
    html.push_str("<h1>📺 YouTube Video Analyzer</h1>\n");
    html.push_str(
        "<div class=\"intro\"><h3>This tool helps you analyze YouTube videos by providing \
         transcripts, summaries, and interactive quizzes</h3></div>\n",
    );

    html.push_str(&format!(
        "<form method=\"post\" action=\"/video\">\n<label for=\"url\">🔗 Enter YouTube Video URL:</label>\n\
         <input type=\"text\" id=\"url\" name=\"url\" value=\"{}\" autofocus>\n\
         <button type=\"submit\">Load video</button>\n</form>\n",
        html_escape(session.url().unwrap_or_default())
    ));

    html.push_str(&render_video(session));
    html.push_str(&render_summary(session));
    html.push_str(&render_quiz(session));

    html.push_str(&format!("</main>\n<script>{}</script>\n</body>\n</html>\n", SCRIPT));
    html
}

fn render_video(session: &Session) -> String {
    let Some(video) = session.video() else {
        return match session.url() {
            Some(url) if !url.is_empty() => {
                notice("warning", "No YouTube video ID found in this URL.")
            }
            _ => String::new(),
        };
    };

    let mut html = String::new();

    html.push_str(&format!(
        "<details open>\n<summary>📽️ Watch Video</summary>\n<iframe src=\"{}\" title=\"YouTube video\" allowfullscreen></iframe>\n</details>\n",
        html_escape(&embed_url(&video.video_id))
    ));

    match &video.transcript {
        Ok(transcript) => {
            html.push_str(&format!(
                "<details>\n<summary>📝 View Transcript</summary>\n<label for=\"transcript\">Full Transcript</label>\n\
                 <textarea id=\"transcript\" rows=\"15\" readonly>{}</textarea>\n</details>\n",
                html_escape(&transcript.text)
            ));
            html.push_str(
                "<div class=\"columns\">\n\
                 <form method=\"post\" action=\"/summary\"><button type=\"submit\">📊 Generate Summary</button></form>\n\
                 <form method=\"post\" action=\"/quiz\"><button type=\"submit\">🧠 Generate Quiz</button></form>\n\
                 </div>\n",
            );
        }
        Err(e) => {
            html.push_str(&notice("error", &e.to_string()));
        }
    }

    html
}

fn render_summary(session: &Session) -> String {
    let Some(summary) = session.summary() else {
        return String::new();
    };

    let mut html = String::from("<section>\n<h2>📌 Video Summary</h2>\n");
    match summary {
        Ok(text) => {
            html.push_str(&format!(
                "<div class=\"summary-text\">{}</div>\n",
                html_escape(text)
            ));
            html.push_str(
                "<a class=\"button\" href=\"/summary.pdf\" download>💾 Save Summary as PDF</a>\n",
            );
        }
        Err(e) => html.push_str(&notice("error", &e.to_string())),
    }
    html.push_str("</section>\n");
    html
}

fn render_quiz(session: &Session) -> String {
    let Some(quiz) = session.quiz() else {
        return String::new();
    };

    let mut html = String::from("<section>\n<h2>🎓 Video Quiz</h2>\n");
    match quiz {
        Ok(quiz) if quiz.quiz().is_empty() => html.push_str(&notice(
            "warning",
            "No quiz questions were generated. Please try again or check the transcript.",
        )),
        Ok(quiz) => html.push_str(&render_questions(quiz)),
        Err(e) => html.push_str(&notice("error", &e.to_string())),
    }
    html.push_str("</section>\n");
    html
}

fn render_questions(quiz: &QuizSession) -> String {
    let mut html = String::from("<form method=\"post\" action=\"/quiz/submit\">\n");

    for (i, (question, answer)) in quiz.quiz().iter().zip(quiz.answers()).enumerate() {
        html.push_str(&format!("<p>{}</p>\n", html_escape(&question.text)));

        if question.options.is_empty() {
            html.push_str(&notice(
                "warning",
                &format!("No options available for question {}", i + 1),
            ));
        } else {
            html.push_str("<fieldset>\n<legend>Select your answer:</legend>\n");
            for (pos, text) in question.display_options().into_iter().enumerate() {
                let checked = answer_label(pos).is_some_and(|label| *answer == label);
                html.push_str(&format!(
                    "<label class=\"quiz-option\"><input type=\"radio\" name=\"q{i}\" value=\"{pos}\" data-question=\"{i}\"{}> {}</label>\n",
                    if checked { " checked" } else { "" },
                    html_escape(text)
                ));
            }
            html.push_str("</fieldset>\n");
        }
        html.push_str("<hr>\n");
    }

    html.push_str("<button type=\"submit\">📝 Submit Quiz</button>\n</form>\n");

    if let Some(result) = quiz.result() {
        html.push_str("<div id=\"quiz-result\">\n");
        html.push_str(&notice("success", &format!("🎉 {}", result.headline())));
        for feedback in &result.feedback {
            let (kind, icon) = if feedback.is_correct {
                ("info", "✅")
            } else {
                ("error", "❌")
            };
            html.push_str(&notice(kind, &format!("{} {}", icon, feedback)));
        }
        html.push_str("</div>\n");
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_answer_script_checks_response() {
        assert!(SCRIPT.contains("redirect: 'manual'"));
        assert!(SCRIPT.contains("response.ok"));
        assert!(SCRIPT.contains("getElementById('quiz-result')"));
        assert!(SCRIPT.contains("window.location.reload()"));
    }

    #[test]
    fn test_empty_session_shows_only_the_form() {
        let html = render_page(&Session::new());
        assert!(html.contains("name=\"url\""));
        assert!(!html.contains("Generate Summary"));
        assert!(!html.contains("No YouTube video ID"));
        assert!(!html.contains("Video Quiz"));
    }
}
