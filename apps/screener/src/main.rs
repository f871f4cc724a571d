use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::config::Config;
use screener::feedback::{DisabledFeedback, FeedbackProvider, LlmFeedback};
use screener::llm_client::{LlmClient, LlmClientConfig};
use screener::model::ModelArtifacts;
use screener::routes::build_router;
use screener::screening::InferenceContext;
use screener::state::AppState;
use screener::storage::UploadStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Artifacts are a hard requirement: refuse to start without a valid matched set.
    let model = ModelArtifacts::load(&config.models_dir).with_context(|| {
        format!(
            "Failed to load model artifacts from '{}'. Run the `train` binary to generate them.",
            config.models_dir.display()
        )
    })?;
    let inference = Arc::new(InferenceContext::new(model, config.confidence));
    info!(
        "Match score heuristic: x{} clamped to [{}, {}]",
        config.confidence.multiplier, config.confidence.floor, config.confidence.ceiling
    );

    let feedback = build_feedback_provider(&config)?;

    let uploads = UploadStore::open(&config.upload_dir, config.retain_uploads)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory '{}'",
                config.upload_dir.display()
            )
        })?;
    info!("Uploads stored in {}", uploads.dir().display());

    let state = AppState {
        inference,
        feedback,
        uploads,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_feedback_provider(config: &Config) -> Result<Arc<dyn FeedbackProvider>> {
    let Some(api_key) = config.openrouter_api_key.clone() else {
        warn!("OPENROUTER_API_KEY is not set; feedback will be unavailable");
        return Ok(Arc::new(DisabledFeedback {
            reason: "OPENROUTER_API_KEY is not set".to_string(),
        }));
    };

    let client = LlmClient::new(LlmClientConfig {
        api_url: config.openrouter_api_url.clone(),
        api_key,
        model: config.feedback_model.clone(),
        timeout: config.feedback_timeout,
        max_attempts: config.feedback_max_attempts,
    })
    .context("Failed to build feedback HTTP client")?;
    info!("Feedback client initialized (model: {})", client.model());

    Ok(Arc::new(LlmFeedback(client)))
}
