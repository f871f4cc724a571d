//! Offline trainer: fits the vectorizer, classifier and label encoder and writes
//! them to `MODELS_DIR` as one matched artifact set.
//!
//! Usage: `train [corpus.json]`. Without an argument the built-in corpus is used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::config::Config;
use screener::model::corpus::{builtin_corpus, load_corpus};
use screener::model::ModelArtifacts;

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("train={0},screener={0}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let corpus = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Loading training corpus from {}", path.display());
            load_corpus(&path)?
        }
        None => {
            info!("Using built-in training corpus");
            builtin_corpus()
        }
    };

    let model = ModelArtifacts::train(&corpus).context("Training failed")?;
    model.save(&config.models_dir).with_context(|| {
        format!(
            "Failed to write model artifacts to '{}'",
            config.models_dir.display()
        )
    })?;

    info!(
        artifact_set = %model.artifact_set(),
        examples = corpus.len(),
        vocabulary = model.vocabulary_len(),
        "Model training complete; artifacts saved to {}",
        config.models_dir.display()
    );

    Ok(())
}
