//! API Module
//!
//! HTTP handlers and routing for the diagram generator REST API.
//!
//! # Endpoints
//! - `POST /generate` - Generate diagram source from a description
//! - `GET /diagram-types` - List supported diagram types
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod gate;
pub mod handlers;
pub mod routes;

pub use gate::MinIntervalGate;
pub use handlers::*;
pub use routes::create_router;
