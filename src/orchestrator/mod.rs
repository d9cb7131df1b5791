use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::client::chat::ChatCompletionClient;
use crate::client::{CompletionClient, CompletionParams};
use crate::config::Settings;
use crate::error::GenerationError;
use crate::fallback::synthesize;
use crate::model::RoadmapResult;
use crate::normalize::{check_dependencies, dedup, prune_dangling, rescale};
use crate::prompt::build_prompt;
use crate::profile::Purpose;
use crate::sanitize::sanitize_and_parse;

/// Opaque per-call context from the web layer. Only used to tag log events.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerContext {
    pub request_id: Uuid,
    pub caller: Option<String>,
}

impl CallerContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller: None,
        }
    }

    pub fn with_caller(caller: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller: Some(caller.into()),
        }
    }

    fn caller_label(&self) -> &str {
        self.caller.as_deref().unwrap_or("anonymous")
    }
}

impl Default for CallerContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub topics: Vec<String>,
    pub purpose: Purpose,
    pub total_hours: Option<f64>,
}

impl GenerationRequest {
    /// The purpose string is mapped here, once; unknown values become `Purpose::Other`.
    pub fn new(topics: Vec<String>, purpose: &str, total_hours: Option<f64>) -> Self {
        Self {
            topics,
            purpose: Purpose::parse(purpose),
            total_hours,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapSource {
    Completion,
    Fallback,
}

/// A finished generation: always carries a usable roadmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub result: RoadmapResult,
    pub source: RoadmapSource,
    /// Completion calls made.
    pub attempts: u32,
    /// Why the completion path was abandoned, for diagnostics only.
    pub fallback_reason: Option<String>,
}

/// Runs prompt → completion → recovery → normalization, falling back to the
/// synthesized roadmap on any failure.
#[derive(Debug)]
pub struct Generator {
    client: Option<Arc<dyn CompletionClient>>,
    settings: Settings,
}

impl Generator {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, settings: Settings) -> Self {
        Self { client, settings }
    }

    /// Builds the HTTP adapter from `settings`. Without a usable credential the
    /// generator runs fallback-only and never touches the network.
    pub fn from_settings(settings: Settings) -> Self {
        let client: Option<Arc<dyn CompletionClient>> = match ChatCompletionClient::from_settings(&settings) {
            Ok(c) => {
                info!(model = %c.model(), url = %settings.completions_url(), "Completion client ready");
                Some(Arc::new(c) as Arc<dyn CompletionClient>)
            }
            Err(e) => {
                warn!(error = %e, "Completion client unavailable, running in fallback-only mode");
                None
            }
        };
        Self::new(client, settings)
    }

    pub fn offline(settings: Settings) -> Self {
        Self::new(None, settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate a roadmap. Never fails: the worst case is the synthesized fallback.
    pub async fn generate(&self, request: &GenerationRequest, ctx: &CallerContext) -> Generation {
        self.run(request, ctx, &AtomicU32::new(0)).await
    }

    pub async fn generate_roadmap(&self, request: &GenerationRequest, ctx: &CallerContext) -> RoadmapResult {
        self.generate(request, ctx).await.result
    }

    /// `generate` bounded by a deadline on the whole call; on expiry the fallback is returned.
    /// `attempts` then counts the completion calls started before the deadline hit.
    pub async fn generate_with_deadline(
        &self,
        request: &GenerationRequest,
        ctx: &CallerContext,
        deadline: Duration,
    ) -> Generation {
        let attempts = AtomicU32::new(0);
        match timeout(deadline, self.run(request, ctx, &attempts)).await {
            Ok(generation) => generation,
            Err(_) => {
                let attempts = attempts.load(Ordering::Relaxed);
                warn!(request_id = %ctx.request_id, attempts, "Generation exceeded deadline of {:?}", deadline);
                let generation = self.fallback(request, attempts, format!("deadline of {:?} exceeded", deadline));
                self.finish(request, generation)
            }
        }
    }

    async fn run(&self, request: &GenerationRequest, ctx: &CallerContext, attempts: &AtomicU32) -> Generation {
        info!(
            request_id = %ctx.request_id,
            caller = ctx.caller_label(),
            topics = ?request.topics,
            purpose = %request.purpose,
            total_hours = ?request.total_hours,
            "Generating roadmap"
        );

        let generation = match self.complete_with_retries(request, ctx, attempts).await {
            Ok((result, attempts)) => Generation {
                result,
                source: RoadmapSource::Completion,
                attempts,
                fallback_reason: None,
            },
            Err((e, attempts)) => {
                warn!(
                    request_id = %ctx.request_id,
                    kind = e.kind(),
                    attempts,
                    error = %e,
                    "Completion path failed, using fallback roadmap"
                );
                self.fallback(request, attempts, e.to_string())
            }
        };
        self.finish(request, generation)
    }

    async fn complete_with_retries(
        &self,
        request: &GenerationRequest,
        ctx: &CallerContext,
        calls: &AtomicU32,
    ) -> Result<(RoadmapResult, u32), (GenerationError, u32)> {
        let Some(client) = &self.client else {
            return Err((
                GenerationError::Configuration("no completion client configured".to_string()),
                0,
            ));
        };

        let prompt = build_prompt(&request.topics, request.purpose, request.total_hours);
        let base = CompletionParams::from_settings(&self.settings);
        let max_attempts = self.settings.max_attempts.max(1);
        let mut output_defects = 0;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                sleep(self.settings.retry_backoff(attempt - 2)).await;
            }
            let params = base.narrowed(output_defects);
            calls.fetch_add(1, Ordering::Relaxed);
            debug!(request_id = %ctx.request_id, attempt, client = client.name(), ?params, "Requesting completion");

            let outcome = match client.complete(&prompt, &params).await {
                Ok(raw) => recover(&raw),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(result) => {
                    info!(
                        request_id = %ctx.request_id,
                        attempt,
                        nodes = result.node_count(),
                        "Completion produced a valid roadmap"
                    );
                    return Ok((result, attempt));
                }
                Err(e) => {
                    warn!(request_id = %ctx.request_id, attempt, kind = e.kind(), error = %e, "Completion attempt failed");
                    if !e.is_retryable() {
                        return Err((e, attempt));
                    }
                    if e.is_output_defect() {
                        output_defects += 1;
                    }
                    last_error = Some(e);
                }
            }
        }

        let e = last_error
            .unwrap_or_else(|| GenerationError::Configuration("no completion attempt was made".to_string()));
        Err((e, max_attempts))
    }

    fn fallback(&self, request: &GenerationRequest, attempts: u32, reason: String) -> Generation {
        Generation {
            result: synthesize(&request.topics, request.purpose),
            source: RoadmapSource::Fallback,
            attempts,
            fallback_reason: Some(reason),
        }
    }

    fn finish(&self, request: &GenerationRequest, mut generation: Generation) -> Generation {
        generation.result.main_topics = request.topics.clone();
        generation.result = rescale(generation.result, request.total_hours);
        info!(
            source = ?generation.source,
            nodes = generation.result.node_count(),
            total_hours = generation.result.total_hours(),
            "Roadmap ready"
        );
        generation
    }
}

/// Sanitize, dedup and check one completion. Dangling prerequisites are pruned.
pub fn recover(raw: &str) -> Result<RoadmapResult, GenerationError> {
    let result = dedup(sanitize_and_parse(raw)?);
    let (result, pruned) = prune_dangling(result);
    if pruned > 0 {
        debug!(pruned, "Removed dangling prerequisite references");
    }
    check_dependencies(&result)?;
    Ok(result)
}
