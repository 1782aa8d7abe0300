//! Diagram Gen - Natural-language to Mermaid diagram service
//!
//! Prompts a generative model for diagram source, cleans and validates the
//! reply, and keeps accepted results in a 24 hour expiring cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod pipeline;

pub use api::{create_router, AppState};
pub use config::Config;
pub use pipeline::{DiagramType, Generator};
