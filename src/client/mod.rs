use async_trait::async_trait;
use std::fmt::Debug;
use crate::config::Settings;
use crate::error::GenerationError;

pub mod chat;

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl CompletionParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
        }
    }

    /// Parameters for a compliance retry: cooler sampling, shorter output.
    ///
    /// `retry` counts from 1 for the first retry.
    pub fn narrowed(&self, retry: u32) -> Self {
        if retry == 0 {
            return *self;
        }
        let factor = 0.5f32.powi(retry as i32);
        Self {
            max_tokens: ((self.max_tokens as f32) * (1.0 - 0.1 * retry.min(3) as f32))
                .max(256.0)
                .min(self.max_tokens as f32) as u32,
            temperature: (self.temperature * factor).max(0.1).min(self.temperature),
            top_p: (self.top_p - 0.1 * retry as f32).max(0.5).min(self.top_p),
        }
    }
}

/// The external text-completion boundary. One call, no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync + Debug {
    fn name(&self) -> &str;
    async fn complete(&self, prompt: &str, params: &CompletionParams) -> Result<String, GenerationError>;
}
