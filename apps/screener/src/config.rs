use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::screening::confidence::HeuristicConfidence;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub models_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub retain_uploads: bool,
    pub max_upload_bytes: usize,
    pub openrouter_api_key: Option<String>,
    pub openrouter_api_url: String,
    pub feedback_model: String,
    pub feedback_timeout: Duration,
    pub feedback_max_attempts: u32,
    pub confidence: HeuristicConfidence,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = HeuristicConfidence::default();
        let confidence = HeuristicConfidence {
            multiplier: parse_or(&get, "MATCH_SCORE_MULTIPLIER", defaults.multiplier)?,
            floor: parse_or(&get, "MATCH_SCORE_FLOOR", defaults.floor)?,
            ceiling: parse_or(&get, "MATCH_SCORE_CEILING", defaults.ceiling)?,
        };
        confidence
            .validate()
            .map_err(|e| anyhow!("Invalid match score settings: {e}"))?;

        Ok(Config {
            port: parse_or(&get, "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            models_dir: get("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("models")),
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            retain_uploads: parse_or(&get, "RETAIN_UPLOADS", false)?,
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            openrouter_api_key: get("OPENROUTER_API_KEY"),
            openrouter_api_url: get("OPENROUTER_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            feedback_model: get("GEMMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            feedback_timeout: Duration::from_secs(parse_or(&get, "FEEDBACK_TIMEOUT_SECS", 60)?),
            feedback_max_attempts: parse_or(&get, "FEEDBACK_MAX_ATTEMPTS", 1)?,
            confidence,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
