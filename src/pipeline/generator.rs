//! Generation Orchestrator
//!
//! The single `generate` entry point: cache lookup, prompt, model call,
//! sanitize, validate, cache write.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::cache::ExpiringCache;
use crate::error::GenerationError;
use crate::model::LanguageModel;
use crate::pipeline::{build_prompt, sanitize, validate, DiagramType, SanitizePolicy};

/// Cache key for a request: `{type}-{description}`.
pub fn cache_key(diagram_type: DiagramType, description: &str) -> String {
    format!("{}-{}", diagram_type.tag(), description)
}

/// Turns descriptions into validated diagram source, memoizing successes.
#[derive(Debug)]
pub struct Generator {
    model: Arc<dyn LanguageModel>,
    cache: Arc<ExpiringCache>,
    policy: SanitizePolicy,
}

impl Generator {
    pub fn new(model: Arc<dyn LanguageModel>, cache: Arc<ExpiringCache>) -> Self {
        Self {
            model,
            cache,
            policy: SanitizePolicy::default(),
        }
    }

    /// Sets how model output is filtered before validation.
    pub fn with_policy(mut self, policy: SanitizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache(&self) -> &Arc<ExpiringCache> {
        &self.cache
    }

    /// Generates diagram source for `description`.
    ///
    /// A cached result short-circuits everything else. On a miss the model is
    /// called once; its answer is cleaned, validated and cached. Failures are
    /// not retried and leave the cache untouched. The caller is responsible
    /// for rejecting empty descriptions.
    #[instrument(skip(self, description))]
    pub async fn generate(
        &self,
        description: &str,
        diagram_type: DiagramType,
    ) -> Result<String, GenerationError> {
        let key = cache_key(diagram_type, description);

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Serving diagram from cache");
            return Ok(cached);
        }

        let prompt = build_prompt(diagram_type, description);

        let raw = self
            .model
            .generate_content(&prompt)
            .await
            .map_err(|source| {
                error!(model = self.model.name(), "Model call failed: {}", source);
                GenerationError::Model {
                    diagram_type,
                    source,
                }
            })?;

        let cleaned = sanitize(&raw, diagram_type, self.policy);

        if let Err(e) = validate(&cleaned, diagram_type) {
            warn!("Discarding model output that failed validation: {}", e);
            return Err(e.into());
        }

        if let Err(e) = self.cache.set(&key, &cleaned).await {
            warn!("Failed to cache generated diagram: {}", e);
        }

        info!(lines = cleaned.lines().count(), "Diagram generated");
        Ok(cleaned)
    }
}
