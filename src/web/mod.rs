//! Web interface.
//!
//! Each POST route maps to one analyzer action on the caller's session and
//! redirects back to the page, which is re-rendered from session state.

mod render;
mod store;

pub use render::{html_escape, render_page};
pub use store::SessionStore;

use crate::analyzer::{Action, Analyzer, Session};
use crate::config::ExportSettings;
use crate::error::VidlensError;
use crate::export::summary_to_pdf;
use axum::{
    extract::{FromRequestParts, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        request::Parts,
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "vidlens_session";

/// Shared application state.
pub struct AppState {
    pub analyzer: Analyzer,
    pub sessions: SessionStore,
    pub export: ExportSettings,
}

/// Build the router for the web interface.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/video", post(load_video))
        .route("/summary", post(generate_summary))
        .route("/summary.pdf", get(summary_pdf))
        .route("/quiz", post(generate_quiz))
        .route("/quiz/answer", post(select_answer))
        .route("/quiz/submit", post(submit_quiz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The caller's session, resolved from the session cookie.
pub struct SessionHandle {
    id: Uuid,
    session: Arc<Mutex<Session>>,
    created: bool,
}

impl SessionHandle {
    /// Attach the session cookie to `response` if the session is new.
    fn respond(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.created {
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(SET_COOKIE, value);
            }
        }
        response
    }
}

impl FromRequestParts<Arc<AppState>> for SessionHandle {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_id_from_cookie);

        let (id, session, created) = state.sessions.get_or_create(id);
        Ok(Self {
            id,
            session,
            created,
        })
    }
}

/// Find the session ID in a `Cookie` header value.
fn session_id_from_cookie(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct LoadVideoForm {
    url: String,
}

#[derive(Deserialize)]
struct AnswerForm {
    question: usize,
    option: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(e: VidlensError) -> Response {
    let status = match &e {
        VidlensError::InvalidInput(_) | VidlensError::Session(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!("Request failed: {}", e);
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

async fn run(state: &AppState, handle: &SessionHandle, actions: Vec<Action>) -> Response {
    let mut session = handle.session.lock().await;
    for action in actions {
        if let Err(e) = state.analyzer.dispatch(&mut session, action).await {
            return handle.respond(error_response(e));
        }
    }
    handle.respond(Redirect::to("/"))
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index(handle: SessionHandle) -> Response {
    let session = handle.session.lock().await;
    let page = render_page(&session);
    handle.respond(Html(page))
}

async fn load_video(
    State(state): State<Arc<AppState>>,
    handle: SessionHandle,
    Form(form): Form<LoadVideoForm>,
) -> Response {
    run(&state, &handle, vec![Action::LoadUrl(form.url)]).await
}

async fn generate_summary(State(state): State<Arc<AppState>>, handle: SessionHandle) -> Response {
    run(&state, &handle, vec![Action::GenerateSummary]).await
}

async fn generate_quiz(State(state): State<Arc<AppState>>, handle: SessionHandle) -> Response {
    run(&state, &handle, vec![Action::GenerateQuiz]).await
}

async fn select_answer(
    State(state): State<Arc<AppState>>,
    handle: SessionHandle,
    Form(form): Form<AnswerForm>,
) -> Response {
    run(
        &state,
        &handle,
        vec![Action::SelectAnswer {
            question: form.question,
            option: form.option,
        }],
    )
    .await
}

/// Applies the radio selections carried by the form (`q<index>=<position>`),
/// then scores the quiz.
async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    handle: SessionHandle,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let mut selections: Vec<(usize, usize)> = Vec::new();
    for (key, value) in &fields {
        let parsed = key
            .strip_prefix('q')
            .and_then(|index| index.parse::<usize>().ok())
            .zip(value.parse::<usize>().ok());
        match parsed {
            Some(selection) => selections.push(selection),
            None => debug!("Ignoring form field {}", key),
        }
    }
    selections.sort_unstable();

    run(&state, &handle, vec![Action::SubmitAnswers(selections)]).await
}

async fn summary_pdf(State(state): State<Arc<AppState>>, handle: SessionHandle) -> Response {
    let session = handle.session.lock().await;

    let Some(Ok(summary)) = session.summary() else {
        return handle.respond((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No summary has been generated".to_string(),
            }),
        ));
    };

    match summary_to_pdf(summary, &state.export) {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{}\"", state.export.file_name);
            handle.respond((
                [
                    (CONTENT_TYPE, "application/pdf".to_string()),
                    (CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            ))
        }
        Err(e) => handle.respond(error_response(e)),
    }
}
