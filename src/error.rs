//! Error types for the diagram generator
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::pipeline::DiagramType;

// == Model Error ==
/// Failures of the external generative model call.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No API key was configured for the model service
    #[error("model API key is not configured")]
    MissingApiKey,

    /// The request never produced an HTTP response, or its body could not be decoded
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("model service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response carried no generated text
    #[error("model response contained no text")]
    EmptyResponse,
}

// == Validation Error ==
/// Cleaned source did not match the structural pattern for its diagram type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("generated source is not a valid {diagram_type} declaration")]
pub struct ValidationError {
    pub diagram_type: DiagramType,
}

// == Generation Error ==
/// Failure of a single `generate` call, tagged with the requested diagram type.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("failed to generate {diagram_type} diagram: {source}")]
    Model {
        diagram_type: DiagramType,
        #[source]
        source: ModelError,
    },

    #[error("failed to generate {diagram_type} diagram: {source}")]
    Validation {
        diagram_type: DiagramType,
        #[source]
        source: ValidationError,
    },
}

impl GenerationError {
    /// The diagram type the failed request asked for.
    pub fn diagram_type(&self) -> DiagramType {
        match self {
            GenerationError::Model { diagram_type, .. } => *diagram_type,
            GenerationError::Validation { diagram_type, .. } => *diagram_type,
        }
    }
}

impl From<ValidationError> for GenerationError {
    fn from(err: ValidationError) -> Self {
        GenerationError::Validation {
            diagram_type: err.diagram_type,
            source: err,
        }
    }
}

// == Store Error ==
/// Failures of the durable key-value store behind the cache.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == API Error ==
/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An identical request arrived inside the debounce window
    #[error("Request debounced: {0}")]
    Debounced(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Debounced(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Generation(GenerationError::Model { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Generation(GenerationError::Validation { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
