//! Response DTOs for the generator API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::pipeline::DiagramType;

/// Response body for POST /generate
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// The type the code was generated for
    pub diagram_type: DiagramType,
    /// Cleaned diagram source
    pub code: String,
}

impl GenerateResponse {
    pub fn new(diagram_type: DiagramType, code: impl Into<String>) -> Self {
        Self {
            diagram_type,
            code: code.into(),
        }
    }
}

/// Response body for GET /diagram-types
#[derive(Debug, Clone, Serialize)]
pub struct DiagramTypesResponse {
    /// Type used when none or an unknown one is requested
    pub default: DiagramType,
    /// Every supported type
    pub types: Vec<DiagramType>,
}

impl DiagramTypesResponse {
    pub fn all() -> Self {
        Self {
            default: DiagramType::default(),
            types: DiagramType::ALL.to_vec(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries dropped for being older than the TTL
    pub expired: u64,
    /// Number of cached generations written
    pub writes: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Cache TTL in seconds
    pub ttl_seconds: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, ttl_seconds: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            writes: stats.writes,
            hit_rate: stats.hit_rate(),
            ttl_seconds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
