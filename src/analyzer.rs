//! Session state and the actions that change it.
//!
//! Every user action is one call to [`Analyzer::dispatch`] against an
//! explicit [`Session`]. Failures of the external collaborators (transcript
//! service, language model) are stored in the session as tagged results so
//! that presentation code can branch on them; `dispatch` itself only fails
//! when an action does not make sense in the current state.

use crate::config::{Prompts, Settings};
use crate::error::{Result, VidlensError};
use crate::generation::{self, ContentGenerator, OpenAIGenerator};
use crate::quiz::{Quiz, QuizResult, QuizSession};
use crate::youtube::{extract_video_id, Transcript, TranscriptSource, YoutubeTranscripts};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Enter a video URL; fetches the transcript.
    LoadUrl(String),
    GenerateSummary,
    GenerateQuiz,
    /// Choose the option at `option` (0-based) for question `question` (0-based).
    SelectAnswer { question: usize, option: usize },
    SubmitQuiz,
    /// Apply `(question, option)` selections and score the quiz. Either every
    /// selection is applied and the quiz is scored, or the quiz is left as it was.
    SubmitAnswers(Vec<(usize, usize)>),
}

/// A video whose ID was recognised, with the outcome of fetching its transcript.
#[derive(Debug)]
pub struct LoadedVideo {
    pub url: String,
    pub video_id: String,
    pub transcript: Result<Transcript>,
}

/// Everything one user has produced so far.
///
/// Holds at most one summary and one quiz; generating again replaces them.
#[derive(Debug, Default)]
pub struct Session {
    url: Option<String>,
    video: Option<LoadedVideo>,
    summary: Option<Result<String>>,
    quiz: Option<Result<QuizSession>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last URL entered, recognised or not.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn video(&self) -> Option<&LoadedVideo> {
        self.video.as_ref()
    }

    /// The transcript, if a video is loaded and its transcript was fetched.
    pub fn transcript(&self) -> Option<&Transcript> {
        self.video.as_ref().and_then(|v| v.transcript.as_ref().ok())
    }

    pub fn summary(&self) -> Option<&Result<String>> {
        self.summary.as_ref()
    }

    pub fn quiz(&self) -> Option<&Result<QuizSession>> {
        self.quiz.as_ref()
    }

    fn active_quiz(&mut self) -> Result<&mut QuizSession> {
        match self.quiz.as_mut() {
            Some(Ok(quiz)) => Ok(quiz),
            Some(Err(_)) => Err(VidlensError::Session(
                "The last quiz could not be generated".to_string(),
            )),
            None => Err(VidlensError::Session("No quiz has been generated".to_string())),
        }
    }

    fn transcript_text(&self) -> Result<String> {
        let video = self
            .video
            .as_ref()
            .ok_or_else(|| VidlensError::Session("Load a video first".to_string()))?;

        match &video.transcript {
            Ok(transcript) => Ok(transcript.text.clone()),
            Err(_) => Err(VidlensError::Session(format!(
                "No transcript is available for video {}",
                video.video_id
            ))),
        }
    }
}

/// Runs actions against sessions using the external collaborators.
pub struct Analyzer {
    transcripts: Arc<dyn TranscriptSource>,
    generator: Arc<dyn ContentGenerator>,
    prompts: Prompts,
}

impl Analyzer {
    /// Create an analyzer with YouTube transcripts and an OpenAI generator.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts = Arc::new(YoutubeTranscripts::new(&settings.transcript)?);
        let generator = Arc::new(OpenAIGenerator::new(&settings.llm)?);

        info!("Using model {}", settings.llm.model);

        Ok(Self::with_components(transcripts, generator, prompts))
    }

    /// Create an analyzer with custom components.
    pub fn with_components(
        transcripts: Arc<dyn TranscriptSource>,
        generator: Arc<dyn ContentGenerator>,
        prompts: Prompts,
    ) -> Self {
        Self {
            transcripts,
            generator,
            prompts,
        }
    }

    /// Apply one action to the session.
    #[instrument(skip(self, session))]
    pub async fn dispatch(&self, session: &mut Session, action: Action) -> Result<()> {
        match action {
            Action::LoadUrl(url) => {
                self.load_url(session, url).await;
                Ok(())
            }
            Action::GenerateSummary => {
                let transcript = session.transcript_text()?;
                let summary =
                    generation::summarize(self.generator.as_ref(), &self.prompts, &transcript).await;
                session.summary = Some(summary);
                Ok(())
            }
            Action::GenerateQuiz => {
                let transcript = session.transcript_text()?;
                let quiz = generation::generate_quiz(self.generator.as_ref(), &self.prompts, &transcript)
                    .await
                    .map(|text| QuizSession::new(Quiz::parse(&text)));
                if let Ok(quiz) = &quiz {
                    info!("Quiz stored in session with {} questions", quiz.quiz().len());
                }
                session.quiz = Some(quiz);
                Ok(())
            }
            Action::SelectAnswer { question, option } => {
                session.active_quiz()?.select(question, option)
            }
            Action::SubmitQuiz => {
                session.active_quiz()?.submit();
                Ok(())
            }
            Action::SubmitAnswers(selections) => {
                let quiz = session.active_quiz()?;
                let mut draft = quiz.clone();
                for (question, option) in selections {
                    draft.select(question, option)?;
                }
                draft.submit();
                *quiz = draft;
                Ok(())
            }
        }
    }

    /// Score the session's quiz and return the result.
    pub async fn submit(&self, session: &mut Session) -> Result<QuizResult> {
        self.dispatch(session, Action::SubmitQuiz).await?;
        session
            .active_quiz()?
            .result()
            .cloned()
            .ok_or_else(|| VidlensError::Session("Quiz was not submitted".to_string()))
    }

    async fn load_url(&self, session: &mut Session, url: String) {
        let url = url.trim().to_string();

        // Summary and quiz belong to the previous video.
        session.summary = None;
        session.quiz = None;

        session.video = match extract_video_id(&url) {
            Some(video_id) => {
                let transcript = self.transcripts.fetch(&video_id).await;
                if let Err(e) = &transcript {
                    warn!("Transcript for {} unavailable: {}", video_id, e);
                }
                Some(LoadedVideo {
                    url: url.clone(),
                    video_id,
                    transcript,
                })
            }
            None => {
                warn!("No video ID found in {}", url);
                None
            }
        };
        session.url = Some(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::ScriptedGenerator;
    use async_trait::async_trait;

    struct FakeTranscripts;

    #[async_trait]
    impl TranscriptSource for FakeTranscripts {
        async fn fetch(&self, video_id: &str) -> Result<Transcript> {
            if video_id == "unavailable" {
                Err(VidlensError::Transcript("Subtitles are disabled".to_string()))
            } else {
                Ok(Transcript::from_segments(video_id, ["hello", "world"]))
            }
        }
    }

    const QUIZ_TWO: &str = "Q1: First?\na) x\nb) y\nc) z\nd) w\nCorrect: b\n\nQ2: Second?\na) x\nb) y\nc) z\nd) w\nCorrect: a)";
    const QUIZ_THREE: &str = "Q1: A?\na) 1\nb) 2\nCorrect: a\nQ2: B?\na) 1\nb) 2\nCorrect: b\nQ3: C?\na) 1\nb) 2\nCorrect: a";

    fn analyzer(responses: Vec<Result<String>>) -> Analyzer {
        Analyzer::with_components(
            Arc::new(FakeTranscripts),
            Arc::new(ScriptedGenerator::new(responses)),
            Prompts::default(),
        )
    }

    async fn loaded(analyzer: &Analyzer) -> Session {
        let mut session = Session::new();
        analyzer
            .dispatch(&mut session, Action::LoadUrl("https://youtu.be/dQw4w9WgXcQ".to_string()))
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_load_url_fetches_transcript() {
        let analyzer = analyzer(vec![]);
        let session = loaded(&analyzer).await;

        let video = session.video().unwrap();
        assert_eq!(video.video_id, "dQw4w9WgXcQ");
        assert_eq!(session.transcript().unwrap().text, "hello world");
    }

    #[tokio::test]
    async fn test_unrecognised_url_skips_everything() {
        let analyzer = analyzer(vec![]);
        let mut session = Session::new();
        analyzer
            .dispatch(&mut session, Action::LoadUrl("https://example.com".to_string()))
            .await
            .unwrap();

        assert_eq!(session.url(), Some("https://example.com"));
        assert!(session.video().is_none());
        assert!(analyzer.dispatch(&mut session, Action::GenerateSummary).await.is_err());
    }

    #[tokio::test]
    async fn test_transcript_failure_is_tagged_and_blocks_generation() {
        let analyzer = analyzer(vec![Ok("never used".to_string())]);
        let mut session = Session::new();
        analyzer
            .dispatch(&mut session, Action::LoadUrl("https://youtu.be/unavailable".to_string()))
            .await
            .unwrap();

        let video = session.video().unwrap();
        assert!(matches!(video.transcript, Err(VidlensError::Transcript(_))));
        assert!(session.transcript().is_none());

        let result = analyzer.dispatch(&mut session, Action::GenerateQuiz).await;
        assert!(matches!(result, Err(VidlensError::Session(_))));
        assert!(session.quiz().is_none());
    }

    #[tokio::test]
    async fn test_summary_failure_is_stored_as_err() {
        let analyzer = analyzer(vec![Err(VidlensError::OpenAI("boom".to_string()))]);
        let mut session = loaded(&analyzer).await;

        analyzer.dispatch(&mut session, Action::GenerateSummary).await.unwrap();
        assert!(matches!(session.summary(), Some(Err(VidlensError::OpenAI(_)))));
    }

    #[tokio::test]
    async fn test_quiz_flow_scores_answers() {
        let analyzer = analyzer(vec![Ok(QUIZ_TWO.to_string())]);
        let mut session = loaded(&analyzer).await;

        analyzer.dispatch(&mut session, Action::GenerateQuiz).await.unwrap();
        analyzer
            .dispatch(&mut session, Action::SelectAnswer { question: 0, option: 1 })
            .await
            .unwrap();
        analyzer
            .dispatch(&mut session, Action::SelectAnswer { question: 1, option: 2 })
            .await
            .unwrap();

        let result = analyzer.submit(&mut session).await.unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
    }

    #[tokio::test]
    async fn test_rejected_submission_leaves_quiz_untouched() {
        let analyzer = analyzer(vec![Ok(QUIZ_TWO.to_string())]);
        let mut session = loaded(&analyzer).await;
        analyzer.dispatch(&mut session, Action::GenerateQuiz).await.unwrap();

        let result = analyzer
            .dispatch(&mut session, Action::SubmitAnswers(vec![(0, 1), (9, 0)]))
            .await;
        assert!(matches!(result, Err(VidlensError::InvalidInput(_))));

        let quiz = session.quiz().unwrap().as_ref().unwrap();
        assert_eq!(quiz.answers(), &["", ""]);
        assert!(quiz.result().is_none());

        analyzer
            .dispatch(&mut session, Action::SubmitAnswers(vec![(0, 1), (1, 0)]))
            .await
            .unwrap();
        let quiz = session.quiz().unwrap().as_ref().unwrap();
        assert_eq!(quiz.result().unwrap().score, 2);
    }

    #[tokio::test]
    async fn test_regenerating_quiz_resets_answers() {
        let analyzer = analyzer(vec![Ok(QUIZ_TWO.to_string()), Ok(QUIZ_THREE.to_string())]);
        let mut session = loaded(&analyzer).await;

        analyzer.dispatch(&mut session, Action::GenerateQuiz).await.unwrap();
        analyzer
            .dispatch(&mut session, Action::SelectAnswer { question: 0, option: 1 })
            .await
            .unwrap();
        analyzer.dispatch(&mut session, Action::SubmitQuiz).await.unwrap();

        analyzer.dispatch(&mut session, Action::GenerateQuiz).await.unwrap();

        let quiz = session.quiz().unwrap().as_ref().unwrap();
        assert_eq!(quiz.answers(), &["", "", ""]);
        assert!(quiz.result().is_none());
    }

    #[tokio::test]
    async fn test_empty_quiz_is_not_a_failure() {
        let analyzer = analyzer(vec![Ok("  \n".to_string())]);
        let mut session = loaded(&analyzer).await;

        analyzer.dispatch(&mut session, Action::GenerateQuiz).await.unwrap();

        let quiz = session.quiz().unwrap().as_ref().unwrap();
        assert!(quiz.quiz().is_empty());
    }

    #[tokio::test]
    async fn test_answer_without_quiz_is_rejected() {
        let analyzer = analyzer(vec![]);
        let mut session = loaded(&analyzer).await;

        let result = analyzer
            .dispatch(&mut session, Action::SelectAnswer { question: 0, option: 0 })
            .await;
        assert!(matches!(result, Err(VidlensError::Session(_))));
        assert!(analyzer.submit(&mut session).await.is_err());
    }

    #[tokio::test]
    async fn test_loading_new_url_clears_generated_content() {
        let analyzer = analyzer(vec![Ok("Summary".to_string()), Ok(QUIZ_TWO.to_string())]);
        let mut session = loaded(&analyzer).await;

        analyzer.dispatch(&mut session, Action::GenerateSummary).await.unwrap();
        analyzer.dispatch(&mut session, Action::GenerateQuiz).await.unwrap();
        assert!(session.summary().is_some());

        analyzer
            .dispatch(&mut session, Action::LoadUrl("https://youtu.be/abcdefghijk".to_string()))
            .await
            .unwrap();

        assert!(session.summary().is_none());
        assert!(session.quiz().is_none());
        assert_eq!(session.video().unwrap().video_id, "abcdefghijk");
    }
}
