use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on the multipart request body, in bytes.
    pub max_upload_bytes: usize,
    /// How many missing keywords get an itemized call-out in the suggestions.
    pub suggestion_top_n: usize,
    /// Weight of one phrase occurrence. Must be >= 1.0.
    pub phrase_weight: f64,
    pub enable_stemming: bool,
    /// Replaces the built-in stopword list when set.
    pub stopwords_path: Option<PathBuf>,
    /// Replaces the built-in phrase dictionary when set.
    pub phrases_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            suggestion_top_n: 5,
            phrase_weight: 1.5,
            enable_stemming: false,
            stopwords_path: None,
            phrases_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            suggestion_top_n: parse_or(&lookup, "SUGGESTION_TOP_N", defaults.suggestion_top_n)?,
            phrase_weight: parse_or(&lookup, "PHRASE_WEIGHT", defaults.phrase_weight)?,
            enable_stemming: parse_or(&lookup, "ENABLE_STEMMING", defaults.enable_stemming)?,
            stopwords_path: lookup("STOPWORDS_PATH").map(PathBuf::from),
            phrases_path: lookup("PHRASES_PATH").map(PathBuf::from),
        };

        if !config.phrase_weight.is_finite() || config.phrase_weight < 1.0 {
            bail!(
                "PHRASE_WEIGHT must be a number >= 1.0, got {}",
                config.phrase_weight
            );
        }
        if config.max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }

        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
