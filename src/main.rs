mod error;
mod fetcher;
mod models;
mod parser;
mod scorer;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use models::{AnalyzeRequest, AnalyzeResponse};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("product_trust_analyzer=info".parse()?),
        )
        .init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let allowed_origin =
        std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let client = fetcher::build_client()?;
    let app = build_router(client, &allowed_origin);

    let addr = format!("{host}:{port}");
    info!(%addr, %allowed_origin, "listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(client: Client, allowed_origin: &str) -> Router {
    // Fixed at startup; a malformed origin falls back to permissive.
    let cors = match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(client)
}

/// One-shot analysis: fetch the page, extract the record, score it.
/// Any fetch failure collapses into the single generic error body.
async fn analyze(
    State(client): State<Client>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    match fetcher::fetch_html(&client, &req.url).await {
        Ok(html) => {
            let record = parser::extract(&html);
            let verdict = scorer::score(&record);
            info!(url = %req.url, score = verdict.score, "analyzed");
            Json(AnalyzeResponse::Report(Box::new(verdict)))
        }
        Err(err) => {
            warn!(url = %req.url, error = %err, "analysis blocked");
            Json(AnalyzeResponse::blocked())
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
