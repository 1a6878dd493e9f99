//! Property-based tests for the pipeline
//!
//! Random text (arbitrary strings, and lines shaped like the inputs each
//! parser looks for) must never panic, must redact idempotently and must
//! always render to well-formed, deterministic markup.

use proptest::prelude::*;
use textvis::{
    detect, generate, parse, redact, svg, RenderOptions, TypeOverride, VisualRequest, VisualType,
};

/// A line shaped like something one of the parsers or the redactor reacts to
fn shaped_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ]{1,30}",
        "[A-Za-z ]{1,20}\\?",
        "(Yes|No|Maybe): [A-Za-z ]{1,20}",
        "Step [0-9]{1,2}: [A-Za-z ]{1,20}",
        "[A-Za-z]{1,8} -> [A-Za-z]{1,8}( -> [A-Za-z]{1,8})?",
        "if [a-z ]{1,10} then [a-z ]{1,10}( else [a-z ]{1,10})?",
        "[A-Za-z]{1,10} (calls|uses|queries|connects to|sends data to) [A-Za-z]{1,10}",
        "[A-Za-z0-9 ]{1,12}: -?\\$?[0-9,]{1,9}(\\.[0-9]{1,3})?%?",
        "(password|token|api_key|secret) ?[:=] ?[!-~]{1,16}",
        "(password|secret): [a-z]{2,6}@[a-z]{2,6}\\.[a-z]{2,4}[!#][A-Za-z0-9]{4,8}",
        "[a-z.]{1,10}@[a-z]{1,8}\\.(com|org|io)",
        "[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}",
        "Bearer [A-Za-z0-9._-]{8,24}",
        "(sk|pk)-[A-Za-z0-9]{20,30}",
        "[\\x00-\\x1f<>&\"'\\[\\]]{1,6}",
    ]
}

fn shaped_text() -> impl Strategy<Value = String> {
    prop::collection::vec(shaped_line(), 0..24).prop_map(|lines| lines.join("\n"))
}

fn any_visual_type() -> impl Strategy<Value = VisualType> {
    prop_oneof![
        Just(VisualType::Flowchart),
        Just(VisualType::Diagram),
        Just(VisualType::Chart),
    ]
}

fn assert_well_formed(svg: &str) {
    if let Err(e) = roxmltree::Document::parse(svg) {
        panic!("malformed SVG ({}):\n{}", e, svg);
    }
}

proptest! {
    #[test]
    fn redaction_is_idempotent(text in prop_oneof![shaped_text(), any::<String>()]) {
        let once = redact(&text);
        let twice = redact(&once.text);
        prop_assert_eq!(&twice.text, &once.text);
        prop_assert_eq!(twice.replacements, 0);
    }

    #[test]
    fn credential_holding_an_email_is_masked_whole(
        key in "(password|secret)",
        local in "[a-z]{2,6}",
        domain in "[a-z]{2,6}\\.[a-z]{2,4}",
        tail in "[!#][A-Za-z0-9]{4,8}",
    ) {
        let line = format!("{}: {}@{}{}", key, local, domain, tail);
        let redacted = redact(&line);
        prop_assert_eq!(redacted.text, format!("{}: [REDACTED]", key));
    }

    #[test]
    fn redaction_keeps_line_structure(text in prop_oneof![shaped_text(), any::<String>()]) {
        let redacted = redact(&text);
        prop_assert_eq!(redacted.text.matches('\n').count(), text.matches('\n').count());
    }

    #[test]
    fn override_always_wins(text in shaped_text(), visual_type in any_visual_type()) {
        prop_assert_eq!(detect(&text, TypeOverride::Fixed(visual_type)), visual_type);
    }

    #[test]
    fn parsing_and_rendering_are_total(
        text in prop_oneof![shaped_text(), any::<String>()],
        visual_type in any_visual_type(),
    ) {
        let model = parse(&text, visual_type);
        prop_assert_eq!(model.visual_type(), visual_type);
        let markup = svg::render(&model, &RenderOptions::default());
        prop_assert!(markup.width > 0.0 && markup.height > 0.0);
        assert_well_formed(&markup.svg);
    }

    #[test]
    fn generation_is_deterministic(text in shaped_text()) {
        let request = VisualRequest::new(text);
        let options = RenderOptions::default();
        let first = generate(&request, &options).unwrap();
        let second = generate(&request, &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn flowchart_edges_reference_known_nodes(text in shaped_text()) {
        let chart = textvis::parser::parse_flowchart(&text);
        for edge in &chart.edges {
            prop_assert!(edge.from < chart.nodes.len() && edge.to < chart.nodes.len());
            prop_assert_ne!(edge.from, edge.to);
        }
    }
}
