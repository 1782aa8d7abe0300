//! API Handlers
//!
//! HTTP request handlers for each generator endpoint.

use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, Json};
use tracing::debug;

use crate::api::gate::MinIntervalGate;
use crate::cache::{ExpiringCache, FileStore, KeyValueStore, MemoryStore};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::model::{GeminiClient, LanguageModel};
use crate::models::{
    DiagramTypesResponse, GenerateRequest, GenerateResponse, HealthResponse, StatsResponse,
};
use crate::pipeline::{cache_key, Generator};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Generation orchestrator with its cache
    pub generator: Arc<Generator>,
    /// Debounce gate for identical requests
    pub gate: Arc<MinIntervalGate>,
}

impl AppState {
    /// Creates a new AppState around a generator and a gate.
    pub fn new(generator: Generator, gate: MinIntervalGate) -> Self {
        Self {
            generator: Arc::new(generator),
            gate: Arc::new(gate),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the file-backed cache when a cache path is configured and wires
    /// the Gemini client as the model.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.cache_path {
            Some(path) => Arc::new(
                FileStore::open(path)
                    .await
                    .with_context(|| format!("opening cache file {}", path.display()))?,
            ),
            None => Arc::new(MemoryStore::new()),
        };

        let model: Arc<dyn LanguageModel> = Arc::new(GeminiClient::from_config(config));
        let cache = Arc::new(ExpiringCache::new(store, config.cache_ttl()));
        let generator = Generator::new(model, cache).with_policy(config.sanitize_policy());

        Ok(Self::new(
            generator,
            MinIntervalGate::new(config.debounce_interval()),
        ))
    }
}

/// Handler for POST /generate
///
/// Generates (or recalls from cache) diagram source for a description.
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let diagram_type = req.diagram_type();
    let key = cache_key(diagram_type, &req.description);

    if !state.gate.try_pass(&key).await {
        debug!(%diagram_type, "Debounced identical request");
        return Err(ApiError::Debounced(format!(
            "identical {} request within {} ms",
            diagram_type,
            state.gate.min_interval().as_millis()
        )));
    }

    let code = state
        .generator
        .generate(&req.description, diagram_type)
        .await?;

    Ok(Json(GenerateResponse::new(diagram_type, code)))
}

/// Handler for GET /diagram-types
pub async fn diagram_types_handler() -> Json<DiagramTypesResponse> {
    Json(DiagramTypesResponse::all())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.generator.cache();
    let stats = cache.stats().await;

    Json(StatsResponse::new(&stats, cache.ttl().as_secs()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
