//! Syntax Validator Module
//!
//! Pattern-based acceptance check on cleaned source. This is not a grammar;
//! it only confirms the text opens with the declaration its type requires.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::pipeline::DiagramType;

/// Required-prefix pattern source per diagram type.
///
/// Types missing from this table are accepted unchecked.
const PATTERNS: &[(DiagramType, &str)] = &[
    (DiagramType::Flowchart, r"^flowchart\s+(TD|LR|BT|RL)\b"),
    (DiagramType::Sequence, r"^sequenceDiagram\b"),
    (DiagramType::EntityRelationship, r"^erDiagram\b"),
];

fn compiled() -> &'static Vec<(DiagramType, Regex)> {
    static TABLE: OnceLock<Vec<(DiagramType, Regex)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|(diagram_type, pattern)| {
                (*diagram_type, Regex::new(pattern).expect("valid regex"))
            })
            .collect()
    })
}

/// Pattern registered for `diagram_type`, if any.
pub fn required_pattern(diagram_type: DiagramType) -> Option<&'static Regex> {
    compiled()
        .iter()
        .find(|(registered, _)| *registered == diagram_type)
        .map(|(_, re)| re)
}

/// Checks `cleaned` against the pattern for `diagram_type`.
pub fn validate(cleaned: &str, diagram_type: DiagramType) -> Result<(), ValidationError> {
    match required_pattern(diagram_type) {
        Some(re) if !re.is_match(cleaned) => Err(ValidationError { diagram_type }),
        _ => Ok(()),
    }
}
