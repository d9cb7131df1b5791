use std::time::Duration;
use thiserror::Error;

/// Failures inside the generation pipeline.
///
/// None of these reach the caller of `Generator::generate`: the orchestrator
/// logs them and falls back to the synthesized roadmap.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The completion service answered, but not with a usable completion.
    #[error("upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport failure before any response arrived.
    #[error("network error: {0}")]
    Network(String),

    #[error("malformed completion output: {reason} (raw: {preview:?})")]
    MalformedOutput { reason: String, preview: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid dependency graph: {0}")]
    InvalidDependencyGraph(String),
}

impl GenerationError {
    /// Whether another completion attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            // 2xx here means an unusable payload shape, worth another try.
            GenerationError::Upstream { status, .. } => {
                *status == 429 || *status >= 500 || (200..300).contains(status)
            }
            GenerationError::Timeout(_) | GenerationError::Network(_) => true,
            GenerationError::MalformedOutput { .. } | GenerationError::InvalidDependencyGraph(_) => true,
            GenerationError::Configuration(_) => false,
        }
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Upstream { .. } => "upstream",
            GenerationError::Timeout(_) => "timeout",
            GenerationError::Network(_) => "network",
            GenerationError::MalformedOutput { .. } => "malformed_output",
            GenerationError::Configuration(_) => "configuration",
            GenerationError::InvalidDependencyGraph(_) => "invalid_dependency_graph",
        }
    }

    /// True for failures of the completion text itself, as opposed to transport.
    pub fn is_output_defect(&self) -> bool {
        matches!(
            self,
            GenerationError::MalformedOutput { .. } | GenerationError::InvalidDependencyGraph(_)
        )
    }
}

/// First `limit` characters of `text`, marked when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
