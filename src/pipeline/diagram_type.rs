//! Diagram Type Module
//!
//! The closed set of diagram kinds the generator knows how to ask for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

// == Diagram Type ==
/// A diagram kind, identified on the wire by a short tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    #[default]
    Flowchart,
    Sequence,
    #[serde(rename = "er")]
    EntityRelationship,
    Class,
    State,
}

impl DiagramType {
    /// Every known type, default first.
    pub const ALL: [DiagramType; 5] = [
        DiagramType::Flowchart,
        DiagramType::Sequence,
        DiagramType::EntityRelationship,
        DiagramType::Class,
        DiagramType::State,
    ];

    /// Wire tag, also used to build cache keys.
    pub fn tag(&self) -> &'static str {
        match self {
            DiagramType::Flowchart => "flowchart",
            DiagramType::Sequence => "sequence",
            DiagramType::EntityRelationship => "er",
            DiagramType::Class => "class",
            DiagramType::State => "state",
        }
    }

    /// Canonical first line of a diagram of this kind.
    pub fn declaration(&self) -> &'static str {
        match self {
            DiagramType::Flowchart => "flowchart TD",
            DiagramType::Sequence => "sequenceDiagram",
            DiagramType::EntityRelationship => "erDiagram",
            DiagramType::Class => "classDiagram",
            DiagramType::State => "stateDiagram-v2",
        }
    }

    /// Resolves a tag, falling back to the default type for anything unrecognized.
    ///
    /// A missing or unknown tag is tolerated rather than rejected.
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag {
            None => DiagramType::default(),
            Some(tag) => tag.parse().unwrap_or_else(|_| {
                debug!(tag, "Unknown diagram type, falling back to flowchart");
                DiagramType::default()
            }),
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raised by [`DiagramType::from_str`] for tags outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagram type: {0}")]
pub struct UnknownDiagramType(pub String);

impl FromStr for DiagramType {
    type Err = UnknownDiagramType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "flowchart" => Ok(DiagramType::Flowchart),
            "sequence" => Ok(DiagramType::Sequence),
            "er" | "erd" | "entity-relationship" => Ok(DiagramType::EntityRelationship),
            "class" => Ok(DiagramType::Class),
            "state" => Ok(DiagramType::State),
            _ => Err(UnknownDiagramType(s.to_string())),
        }
    }
}
