use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_INFERENCE_URL: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "llama3.2:1b";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Sampling parameters forwarded with every inference call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 2048,
            top_p: 1.0,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub inference_url: String,
    pub default_model: String,
    pub inference_timeout: Duration,
    pub generation: GenerationParams,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GenerationParams::default();

        let timeout_secs: u64 = parse_or(&lookup, "INFERENCE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("INFERENCE_TIMEOUT_SECS must be greater than zero");
        }

        let generation = GenerationParams {
            temperature: parse_or(&lookup, "TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_or(&lookup, "MAX_TOKENS", defaults.max_tokens)?,
            top_p: parse_or(&lookup, "TOP_P", defaults.top_p)?,
        };
        if !(0.0..=2.0).contains(&generation.temperature) {
            bail!("TEMPERATURE must be between 0.0 and 2.0");
        }
        if !(0.0..=1.0).contains(&generation.top_p) {
            bail!("TOP_P must be between 0.0 and 1.0");
        }
        if generation.max_tokens == 0 {
            bail!("MAX_TOKENS must be greater than zero");
        }

        Ok(Config {
            inference_url: non_empty_or(&lookup, "INFERENCE_URL", DEFAULT_INFERENCE_URL),
            default_model: non_empty_or(&lookup, "DEFAULT_MODEL", DEFAULT_MODEL),
            inference_timeout: Duration::from_secs(timeout_secs),
            generation,
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: non_empty_or(&lookup, "RUST_LOG", "info"),
        })
    }
}

fn non_empty_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        _ => Ok(default),
    }
}
