//! Prompt Template Module
//!
//! Builds the instruction text sent to the language model for each diagram type.

use crate::pipeline::DiagramType;

// == Templates ==
/// Fixed instruction block for one diagram type.
///
/// The user's description is appended after `rules` and `example`.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    /// Role sentence that opens the prompt
    pub role: &'static str,
    /// Numbered formatting rules the model must follow
    pub rules: &'static [&'static str],
    /// A well-formed sample diagram
    pub example: &'static str,
}

const FLOWCHART: PromptTemplate = PromptTemplate {
    role: "You are a flowchart generator. Generate a properly formatted Mermaid flowchart with these rules:",
    rules: &[
        "Start with 'flowchart TD'",
        "Each node and connection MUST be on a new line",
        "Regular nodes: A[Text without special characters]",
        "Decision nodes: B{Question without special characters?}",
        "Connections: A --> B",
        "Conditional paths: A -->|condition| B",
        "Avoid using parentheses () in node text",
        "Use simple alphanumeric characters for node text",
        "Keep node names short and descriptive",
    ],
    example: "flowchart TD\n  A[Start] --> B{Decision}\n  B -->|yes| C[Process]\n  B -->|no| D[Alternative]\n  C --> E[End]\n  D --> E",
};

const SEQUENCE: PromptTemplate = PromptTemplate {
    role: "You are a sequence diagram generator. Generate a properly formatted Mermaid sequence diagram with these rules:",
    rules: &[
        "Start with 'sequenceDiagram'",
        "Declare every participant first: participant A as Name",
        "Each message MUST be on a new line",
        "Synchronous messages: A->>B: Message text",
        "Replies: B-->>A: Reply text",
        "Use alt / else / end blocks for conditional flows",
        "Avoid special characters in message text",
    ],
    example: "sequenceDiagram\n  participant U as User\n  participant S as Server\n  U->>S: Submit credentials\n  S-->>U: Session token",
};

const ENTITY_RELATIONSHIP: PromptTemplate = PromptTemplate {
    role: "You are an entity relationship diagram generator. Generate a properly formatted Mermaid ER diagram with these rules:",
    rules: &[
        "Start with 'erDiagram'",
        "Entity names are single uppercase words",
        "Relationships: CUSTOMER ||--o{ ORDER : places",
        "Attributes go in braces below the entity: type name",
        "Each relationship MUST be on a new line",
        "Avoid special characters in labels",
    ],
    example: "erDiagram\n  CUSTOMER ||--o{ ORDER : places\n  ORDER ||--|{ LINE_ITEM : contains\n  CUSTOMER {\n    string name\n    string email\n  }",
};

const CLASS: PromptTemplate = PromptTemplate {
    role: "You are a class diagram generator. Generate a properly formatted Mermaid class diagram with these rules:",
    rules: &[
        "Start with 'classDiagram'",
        "Declare classes with their members: class Name { +type field +method() }",
        "Inheritance: Parent <|-- Child",
        "Composition: Whole *-- Part",
        "Association: A --> B",
        "Each relationship MUST be on a new line",
    ],
    example: "classDiagram\n  class Animal {\n    +String name\n    +speak()\n  }\n  Animal <|-- Dog",
};

const STATE: PromptTemplate = PromptTemplate {
    role: "You are a state diagram generator. Generate a properly formatted Mermaid state diagram with these rules:",
    rules: &[
        "Start with 'stateDiagram-v2'",
        "Use [*] for the initial and final states",
        "Transitions: StateA --> StateB : event",
        "State names are single words without spaces",
        "Each transition MUST be on a new line",
    ],
    example: "stateDiagram-v2\n  [*] --> Idle\n  Idle --> Running : start\n  Running --> Idle : stop\n  Running --> [*]",
};

impl PromptTemplate {
    /// Template registered for a diagram type.
    pub fn for_type(diagram_type: DiagramType) -> &'static PromptTemplate {
        match diagram_type {
            DiagramType::Flowchart => &FLOWCHART,
            DiagramType::Sequence => &SEQUENCE,
            DiagramType::EntityRelationship => &ENTITY_RELATIONSHIP,
            DiagramType::Class => &CLASS,
            DiagramType::State => &STATE,
        }
    }

    /// Renders the full instruction with `description` embedded verbatim.
    pub fn render(&self, description: &str) -> String {
        let mut prompt = String::with_capacity(1024 + description.len());
        prompt.push_str(self.role);
        prompt.push('\n');

        for (i, rule) in self.rules.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, rule));
        }

        prompt.push_str("\nExample of correct formatting:\n");
        prompt.push_str(self.example);
        prompt.push_str("\n\nReturn ONLY the clean Mermaid code with proper line breaks.");
        prompt.push_str("\n\nUser request: ");
        prompt.push_str(description);
        prompt
    }
}

// == Selection ==
/// Builds the prompt for an already resolved diagram type.
pub fn build_prompt(diagram_type: DiagramType, description: &str) -> String {
    PromptTemplate::for_type(diagram_type).render(description)
}

/// Builds the prompt for a raw type tag.
///
/// Unrecognized tags use the flowchart template.
pub fn select_template(tag: &str, description: &str) -> String {
    build_prompt(DiagramType::resolve(Some(tag)), description)
}
