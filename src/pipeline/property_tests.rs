//! Property-Based Tests for the Generation Pipeline
//!
//! Uses proptest to check the prompt, sanitize and validate contracts over
//! arbitrary model output.

use proptest::prelude::*;

use crate::pipeline::{
    build_prompt, sanitize, select_template, validate, DiagramType, PromptTemplate,
    SanitizePolicy,
};

// == Strategies ==
fn diagram_type_strategy() -> impl Strategy<Value = DiagramType> {
    prop::sample::select(DiagramType::ALL.to_vec())
}

fn policy_strategy() -> impl Strategy<Value = SanitizePolicy> {
    prop_oneof![Just(SanitizePolicy::Standard), Just(SanitizePolicy::Legacy)]
}

/// Text shaped like model output: fences, declarations, CRLF, padding.
fn model_output_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("```".to_string()),
        Just("```mermaid\n".to_string()),
        Just("flowchart TD\n".to_string()),
        Just("graph LR\n".to_string()),
        Just("sequenceDiagram\n".to_string()),
        Just("\r\n".to_string()),
        Just("   ".to_string()),
        Just("`".to_string()),
        "[a-zA-Z0-9 \\[\\]{}()|>:;!?-]{0,20}",
        any::<String>(),
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Every template embeds the description verbatim along with its rules.
    #[test]
    fn prop_prompt_contains_description(
        diagram_type in diagram_type_strategy(),
        description in any::<String>()
    ) {
        let prompt = build_prompt(diagram_type, &description);
        prop_assert!(prompt.contains(&description));
        for rule in PromptTemplate::for_type(diagram_type).rules {
            prop_assert!(prompt.contains(rule));
        }
    }

    // Unknown tags always receive the flowchart template.
    #[test]
    fn prop_unknown_tag_falls_back(tag in "[a-z]{1,12}", description in ".{0,40}") {
        prop_assume!(tag.parse::<DiagramType>().is_err());
        prop_assert_eq!(
            select_template(&tag, &description),
            build_prompt(DiagramType::Flowchart, &description)
        );
    }

    // Sanitizing cleaned output changes nothing.
    #[test]
    fn prop_sanitize_idempotent(
        raw in model_output_strategy(),
        diagram_type in diagram_type_strategy(),
        policy in policy_strategy()
    ) {
        let once = sanitize(&raw, diagram_type, policy);
        let twice = sanitize(&once, diagram_type, policy);
        prop_assert_eq!(once, twice);
    }

    // No fence delimiter survives, however many the input had.
    #[test]
    fn prop_sanitize_removes_fences(
        raw in model_output_strategy(),
        diagram_type in diagram_type_strategy(),
        policy in policy_strategy()
    ) {
        let cleaned = sanitize(&raw, diagram_type, policy);
        prop_assert!(!cleaned.contains("```"), "fence left in {:?}", cleaned);
    }

    // Output has normalized line endings and no trailing whitespace.
    #[test]
    fn prop_sanitize_output_shape(
        raw in model_output_strategy(),
        diagram_type in diagram_type_strategy()
    ) {
        let cleaned = sanitize(&raw, diagram_type, SanitizePolicy::Standard);
        prop_assert!(!cleaned.contains('\r'));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        for line in cleaned.lines() {
            prop_assert_eq!(line.trim_end(), line);
        }
    }

    // Validation fails exactly when the required prefix is missing.
    #[test]
    fn prop_flowchart_validation_matches_prefix(
        direction in prop::sample::select(vec!["TD", "LR", "BT", "RL", "TB", "XY", ""]),
        body in "[A-Z][a-z]{0,5} --> [A-Z][a-z]{0,5}"
    ) {
        let source = format!("flowchart {}\n  {}", direction, body);
        let expected_ok = matches!(direction, "TD" | "LR" | "BT" | "RL");
        prop_assert_eq!(validate(&source, DiagramType::Flowchart).is_ok(), expected_ok);
    }

    // Types without a registered pattern never fail validation.
    #[test]
    fn prop_unpatterned_types_pass(text in any::<String>()) {
        prop_assert!(validate(&text, DiagramType::Class).is_ok());
        prop_assert!(validate(&text, DiagramType::State).is_ok());
    }

    // Sanitized output that passes validation opens with the type's keyword.
    #[test]
    fn prop_valid_output_opens_with_declaration(
        raw in model_output_strategy(),
        diagram_type in prop::sample::select(vec![
            DiagramType::Flowchart,
            DiagramType::Sequence,
            DiagramType::EntityRelationship,
        ])
    ) {
        let cleaned = sanitize(&raw, diagram_type, SanitizePolicy::Standard);
        if validate(&cleaned, diagram_type).is_ok() {
            let keyword = diagram_type.declaration().split_whitespace().next().unwrap();
            prop_assert!(cleaned.starts_with(keyword));
        }
    }
}
