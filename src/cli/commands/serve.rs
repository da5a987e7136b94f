//! Web interface server.

use crate::analyzer::Analyzer;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::web::{router, AppState, SessionStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Run the web server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, mut settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    let state = Arc::new(AppState {
        analyzer: Analyzer::new(&settings)?,
        sessions: SessionStore::new(settings.server.session_ttl_minutes),
        export: settings.export.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(cors);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Vidlens");
    println!();
    Output::success(&format!("Open http://{} in your browser", addr));
    Output::kv("Model", &settings.llm.model);
    Output::kv("Session timeout", &format!("{} minutes", settings.server.session_ttl_minutes));
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
