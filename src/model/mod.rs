//! Model Module
//!
//! The seam between the generator and the external generative language model.

mod gemini;

use async_trait::async_trait;

use crate::error::ModelError;

pub use gemini::GeminiClient;

/// A text-in, text-out generative model.
///
/// Implementations send one request carrying `prompt` and return the generated
/// text untouched; cleaning it is the pipeline's job.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for logs.
    fn name(&self) -> &str;

    /// Sends `prompt` and returns the raw generated text.
    async fn generate_content(&self, prompt: &str) -> Result<String, ModelError>;
}

impl std::fmt::Debug for dyn LanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LanguageModel({})", self.name())
    }
}
