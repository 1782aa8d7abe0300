//! Request DTOs for the generator API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::pipeline::DiagramType;

/// Request body for POST /generate
///
/// # Fields
/// - `description`: Natural-language description of the diagram
/// - `diagram_type`: Optional type tag; unknown or missing tags mean flowchart
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// What the diagram should show
    pub description: String,
    /// Requested diagram type tag
    #[serde(default)]
    pub diagram_type: Option<String>,
}

impl GenerateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.description.trim().is_empty() {
            return Some("Description cannot be empty".to_string());
        }
        None
    }

    /// Resolved diagram type, falling back to flowchart.
    pub fn diagram_type(&self) -> DiagramType {
        DiagramType::resolve(self.diagram_type.as_deref())
    }
}
