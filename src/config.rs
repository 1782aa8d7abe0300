//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::SanitizePolicy;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the generative model; requests fail without it
    pub gemini_api_key: Option<String>,
    /// Model identifier
    pub gemini_model: String,
    /// Base URL of the model service
    pub gemini_base_url: String,
    /// Cache file location; `None` keeps the cache in memory
    pub cache_path: Option<PathBuf>,
    /// Cache TTL in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Minimum quiet period between identical requests, in milliseconds
    pub debounce_ms: u64,
    /// Apply the legacy flowchart character filter
    pub legacy_sanitize: bool,
}

const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_CACHE_PATH: &str = "diagram_cache.json";

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GEMINI_API_KEY` - Model API key (no default)
    /// - `GEMINI_MODEL` - Model name (default: gemini-pro)
    /// - `GEMINI_BASE_URL` - Model service URL (default: Google endpoint)
    /// - `CACHE_PATH` - Cache file (default: diagram_cache.json, empty for in-memory)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 86400)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEBOUNCE_MS` - Identical-request gate in milliseconds (default: 500)
    /// - `LEGACY_SANITIZE` - `true`/`1` enables the legacy filter (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            cache_path: match env::var("CACHE_PATH") {
                Ok(path) if path.trim().is_empty() => None,
                Ok(path) => Some(PathBuf::from(path)),
                Err(_) => defaults.cache_path,
            },
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            debounce_ms: env::var("DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            legacy_sanitize: env::var("LEGACY_SANITIZE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.legacy_sanitize),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn sanitize_policy(&self) -> SanitizePolicy {
        if self.legacy_sanitize {
            SanitizePolicy::Legacy
        } else {
            SanitizePolicy::Standard
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            cache_path: Some(PathBuf::from(DEFAULT_CACHE_PATH)),
            cache_ttl: 24 * 60 * 60,
            server_port: 3000,
            debounce_ms: 500,
            legacy_sanitize: false,
        }
    }
}
