//! HTTP serving mode for the generation endpoint

use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::github::GithubConfig;
use crate::openrouter::OpenRouterConfig;

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve the generation endpoint over HTTP")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

/// Inbound generation request
///
/// Credentials travel with each request; the server holds no per-user state.
#[derive(Debug, serde::Deserialize, serde::Serialize, Clone)]
pub struct GenerateRequest {
    pub openrouter: String,
    pub github: String,
    pub username: String,
    pub prompt: String,
}

/// Outbound generation response
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(untagged)]
pub enum GenerateResponse {
    Success {
        success: bool,
        repo: String,
        url: String,
        github_url: String,
    },
    Failure {
        error: String,
    },
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", app.host, app.port);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let shared_global = Arc::new(global.clone());

    let app_router = Router::new()
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .layer(cors)
        .with_state(shared_global);

    if global.verbose {
        eprintln!("siteforge listening on http://{}", addr);
        eprintln!("Generation endpoint: http://{}/generate", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "siteforge"
    }))
}

async fn generate_handler(
    State(global): State<Arc<crate::Global>>,
    Json(request): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    Json(handle_generate(request, &global).await)
}

/// Run the pipeline for one request, collapsing every failure into the
/// `{error}` response shape at this boundary.
async fn handle_generate(request: GenerateRequest, global: &crate::Global) -> GenerateResponse {
    let openrouter_config = OpenRouterConfig::for_key(request.openrouter);
    let github_config = GithubConfig::for_credentials(request.github, request.username);

    match crate::generate::generate_site_data(&openrouter_config, &github_config, &request.prompt)
        .await
    {
        Ok(report) => GenerateResponse::Success {
            success: true,
            repo: report.repo,
            url: report.url,
            github_url: report.github_url,
        },
        Err(e) => {
            if global.verbose {
                eprintln!("Generation failed: {e}");
            }
            GenerateResponse::Failure {
                error: e.to_string(),
            }
        }
    }
}
