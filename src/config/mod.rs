use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Settings for the completion boundary and the retry loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    /// Completion attempts per request, first call included.
    pub max_attempts: u32,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    /// Base delay between attempts; doubles each retry.
    pub retry_backoff_ms: u64,
    /// Keys shorter than this are treated as missing.
    pub min_key_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 30,
            max_attempts: 3,
            max_tokens: 1000,
            temperature: 0.7,
            top_p: 0.9,
            retry_backoff_ms: 250,
            min_key_len: 20,
        }
    }
}

impl Settings {
    /// Load from an optional YAML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to deserialize settings from {}", path.display()))
    }

    /// Apply overrides from a variable source. Split out so tests need not touch the process env.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var("ROADMAPPER_API_KEY").or_else(|| var("GROQ_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(url) = var("ROADMAPPER_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = var("ROADMAPPER_MODEL") {
            self.model = model;
        }
        if let Some(secs) = var("ROADMAPPER_TIMEOUT_SECS").and_then(|s| s.trim().parse().ok()) {
            self.request_timeout_secs = secs;
        }
    }

    /// The credential, if present and plausibly long enough to be real.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| k.len() >= self.min_key_len)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn retry_backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(1u64 << retry.min(6)))
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
