//! Generation Pipeline Module
//!
//! Prompt selection, response sanitizing, structural validation and the
//! orchestrator tying them to the model and the cache.

mod diagram_type;
mod generator;
mod prompt;
mod sanitize;
mod validate;

#[cfg(test)]
mod property_tests;

pub use diagram_type::{DiagramType, UnknownDiagramType};
pub use generator::{cache_key, Generator};
pub use prompt::{build_prompt, select_template, PromptTemplate};
pub use sanitize::{
    apply_legacy_filter, drop_preamble, ensure_declaration, has_declaration,
    normalize_line_endings, sanitize, strip_code_fences, trim_lines, SanitizePolicy,
};
pub use validate::{required_pattern, validate};
