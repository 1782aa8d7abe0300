//! Response Sanitizer Module
//!
//! Turns free-form model output into diagram source the renderer can consume.
//! Every step is a named pure function; [`sanitize`] chains them in order.

use std::sync::OnceLock;

use regex::Regex;

use crate::pipeline::DiagramType;

// == Policy ==
/// How aggressively model output is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SanitizePolicy {
    /// Trust the model to follow the prompt rules; only structural cleanup.
    #[default]
    Standard,
    /// Additionally strip parenthesized text and characters outside the
    /// flowchart allow-list. Applies to flowcharts only.
    Legacy,
}

/// First tokens that already open a Mermaid diagram.
const KNOWN_DECLARATIONS: &[&str] = &[
    "flowchart",
    "graph",
    "sequenceDiagram",
    "erDiagram",
    "classDiagram",
    "classDiagram-v2",
    "stateDiagram",
    "stateDiagram-v2",
    "gantt",
    "pie",
    "journey",
    "mindmap",
    "timeline",
    "gitGraph",
];

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[\w+.-]*[ \t]*\r?\n?").expect("valid regex"))
}

fn parenthesized_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").expect("valid regex"))
}

fn disallowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s\[\]{}>|-]").expect("valid regex"))
}

// == Steps ==
/// Removes every fenced code-block delimiter, with or without a language tag.
///
/// Repeats until no triple backtick is left, so removals cannot splice a new
/// delimiter together.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("```") {
        out = fence_re().replace_all(&out, "").into_owned();
    }
    out
}

/// Converts `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Trims the whole text and the trailing whitespace of each line.
///
/// Leading indentation is kept; it carries nesting in several diagram kinds.
pub fn trim_lines(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Legacy flowchart filter: drops `( ... )` groups and any character outside
/// word characters, whitespace, brackets, braces, `|`, `>` and `-`. Lines are
/// fully trimmed and blank lines removed.
pub fn apply_legacy_filter(text: &str) -> String {
    text.lines()
        .map(|line| {
            let line = parenthesized_re().replace_all(line, "");
            disallowed_re().replace_all(&line, "").trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn opens_with_declaration(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map(|token| KNOWN_DECLARATIONS.contains(&token.trim_end_matches(';')))
        .unwrap_or(false)
}

/// True when the first line opens with a known diagram declaration.
pub fn has_declaration(text: &str) -> bool {
    text.lines().next().map(opens_with_declaration).unwrap_or(false)
}

/// Drops chatter the model wrote above its diagram: every line before the
/// first one that opens with a known declaration. Text without any
/// declaration line is returned unchanged.
pub fn drop_preamble(text: &str) -> String {
    if has_declaration(text) {
        return text.to_string();
    }

    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|line| opens_with_declaration(line)) {
        Some(start) => lines[start..].join("\n").trim_start().to_string(),
        None => text.to_string(),
    }
}

/// Prepends the canonical declaration for `diagram_type` when none is present.
pub fn ensure_declaration(text: &str, diagram_type: DiagramType) -> String {
    if has_declaration(text) {
        text.to_string()
    } else if text.is_empty() {
        diagram_type.declaration().to_string()
    } else {
        format!("{}\n{}", diagram_type.declaration(), text)
    }
}

// == Pipeline ==
/// Cleans raw model output for `diagram_type`.
///
/// Never fails: the worst case is best-effort text that validation rejects.
/// Idempotent for any input.
pub fn sanitize(raw: &str, diagram_type: DiagramType, policy: SanitizePolicy) -> String {
    let text = strip_code_fences(raw);
    let text = normalize_line_endings(&text);
    let text = trim_lines(&text);
    let mut text = drop_preamble(&text);

    if policy == SanitizePolicy::Legacy && diagram_type == DiagramType::Flowchart {
        text = apply_legacy_filter(&text);
    }

    ensure_declaration(&text, diagram_type)
}
