//! Integration tests using test data fixtures
//!
//! Each file in testdata/<visual type>/ gets its own test function. A fixture
//! is the input text, a `---` line, then the expected structural dump.
//! Run all tests with: cargo test

use std::fs;
use std::path::PathBuf;

use textvis::{detect, generate, parse, RenderOptions, TypeOverride, VisualRequest, VisualType};

/// Get the path to the fixture directory for one visual type
fn get_fixture_dir(kind: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join(kind)
}

/// Parse a test file into (input, expected_output)
fn parse_test_file(content: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = content.splitn(2, "\n---\n").collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parts[0].to_string(), parts[1].trim_end().to_string()))
}

/// Normalize output for comparison (trim trailing whitespace from each line)
fn normalize_output(s: &str) -> String {
    s.lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// Pull the inline <svg> element out of an HTML document
fn extract_svg(html: &str) -> &str {
    let start = html.find("<svg").expect("document has no <svg>");
    let end = html.rfind("</svg>").expect("document has no </svg>") + "</svg>".len();
    &html[start..end]
}

/// Run one fixture: detection, structural dump, and the rendered document
fn run_fixture(kind: &str, test_name: &str) {
    let test_file = get_fixture_dir(kind).join(format!("{}.txt", test_name));
    let content = fs::read_to_string(&test_file)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", test_file, e));

    let (input, expected) = parse_test_file(&content)
        .unwrap_or_else(|| panic!("Failed to parse test file: {:?}", test_file));

    let visual_type = match kind.parse::<TypeOverride>() {
        Ok(TypeOverride::Fixed(visual_type)) => visual_type,
        other => panic!("fixture directory {} is not a visual type: {:?}", kind, other),
    };

    assert_eq!(
        detect(&input, TypeOverride::Auto),
        visual_type,
        "detection for fixture {}",
        test_name
    );

    let actual = parse(&input, visual_type).to_string();
    let expected_normalized = normalize_output(&expected);
    let actual_normalized = normalize_output(&actual);

    if expected_normalized != actual_normalized {
        eprintln!("=== Test: {}/{} ===", kind, test_name);
        eprintln!("Input:\n{}", input);
        eprintln!("\n--- Expected ---");
        eprintln!("{}", expected_normalized);
        eprintln!("\n--- Actual ---");
        eprintln!("{}", actual_normalized);
        eprintln!("\n--- Diff ---");

        let expected_lines: Vec<_> = expected_normalized.lines().collect();
        let actual_lines: Vec<_> = actual_normalized.lines().collect();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).unwrap_or(&"<missing>");
            let act = actual_lines.get(i).unwrap_or(&"<missing>");
            if exp != act {
                eprintln!("Line {}: expected {:?}", i + 1, exp);
                eprintln!("Line {}: actual   {:?}", i + 1, act);
            }
        }

        panic!("Output mismatch for test: {}/{}", kind, test_name);
    }

    let doc = generate(&VisualRequest::new(input.as_str()), &RenderOptions::default())
        .unwrap_or_else(|e| panic!("Failed to render: {}", e));
    assert_eq!(doc.visual_type, Some(visual_type));
    let svg = extract_svg(&doc.html);
    let tree = roxmltree::Document::parse(svg)
        .unwrap_or_else(|e| panic!("SVG for {}/{} is not well-formed: {}", kind, test_name, e));
    assert_eq!(tree.root_element().tag_name().name(), "svg");
}

/// Macro to generate fixture test functions
macro_rules! fixture_test {
    ($kind:ident, $name:ident) => {
        paste::paste! {
            #[test]
            fn [<$kind _ $name>]() {
                run_fixture(stringify!($kind), stringify!($name));
            }
        }
    };
}

// =============================================================================
// Flowchart fixtures
// =============================================================================

fixture_test!(flowchart, login);
fixture_test!(flowchart, arrow_chain);
fixture_test!(flowchart, step_prefix);
fixture_test!(flowchart, if_then_else);
fixture_test!(flowchart, retry_loop);

// =============================================================================
// Diagram fixtures
// =============================================================================

fixture_test!(diagram, single);
fixture_test!(diagram, architecture);
fixture_test!(diagram, arrows);

// =============================================================================
// Chart fixtures
// =============================================================================

fixture_test!(chart, quarters);
fixture_test!(chart, revenue);
fixture_test!(chart, months);
fixture_test!(chart, negatives);
fixture_test!(chart, survey);
fixture_test!(chart, titled);

// =============================================================================
// End-to-end checks on the rendered markup
// =============================================================================

fn render(text: &str, visual_type: &str) -> String {
    textvis::render_html(text, visual_type).unwrap()
}

#[test]
fn test_every_fixture_has_a_test() {
    let mut count = 0;
    for kind in ["flowchart", "diagram", "chart"] {
        count += fs::read_dir(get_fixture_dir(kind))
            .unwrap()
            .flatten()
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
            .count();
    }
    assert_eq!(count, 14, "add a fixture_test! line for each new fixture");
}

#[test]
fn test_login_flowchart_markup() {
    let html = render(
        "Start\nCheck user authentication?\nYes: Load user dashboard\nNo: Show login form\nEnd",
        "auto",
    );
    let svg = extract_svg(&html);
    let tree = roxmltree::Document::parse(svg).unwrap();
    let classes: Vec<&str> = tree
        .descendants()
        .filter_map(|n| n.attribute("class"))
        .filter(|c| c.starts_with("node "))
        .collect();
    assert_eq!(
        classes,
        vec!["node terminal", "node decision", "node process", "node process", "node terminal"]
    );
    let edges = tree
        .descendants()
        .filter(|n| n.attribute("class") == Some("edge"))
        .count();
    assert_eq!(edges, 5);
    for label in ["Yes", "No", "Load user dashboard"] {
        assert!(tree.descendants().any(|n| n.text() == Some(label)), "{}", label);
    }
}

#[test]
fn test_chart_q2_taller_than_q1() {
    let html = render("Q1: 1000\nQ2: 1500", "auto");
    let svg = extract_svg(&html);
    let tree = roxmltree::Document::parse(svg).unwrap();
    let height = |label: &str| -> f64 {
        tree.descendants()
            .find(|n| n.attribute("class") == Some("bar") && n.attribute("data-label") == Some(label))
            .and_then(|n| n.attribute("height"))
            .and_then(|h| h.parse().ok())
            .unwrap_or_else(|| panic!("no bar for {}", label))
    };
    assert!(height("Q2") > height("Q1"));
}

#[test]
fn test_survey_answers_render_as_bars() {
    let html = render("Yes: 62\nNo: 38\nUnsure: 10", "auto");
    assert!(html.contains("data-visual-type=\"chart\""));
    assert_eq!(html.matches("class=\"bar\"").count(), 3);
}

#[test]
fn test_months_render_as_line() {
    let html = render("Jan: 120\nFeb: 135\nMar: 160\nApr: 142", "auto");
    assert!(html.contains("series-line"));
    assert!(!html.contains("class=\"bar\""));
}

#[test]
fn test_diagram_markup() {
    let html = render("Frontend connects to API", "auto");
    let svg = extract_svg(&html);
    let tree = roxmltree::Document::parse(svg).unwrap();
    let entities = tree
        .descendants()
        .filter(|n| n.attribute("class") == Some("node entity"))
        .count();
    assert_eq!(entities, 2);
    assert!(tree.descendants().any(|n| n.text() == Some("connects to")));
}

#[test]
fn test_secrets_never_reach_the_document() {
    let text = "Start\nLog in with password: hunter2\nEmail ops@example.com\nCharge 4111 1111 1111 1111\nSend Authorization: Bearer abcdef123456\nUse key sk-abcdefghijklmnopqrstuvwx\nAdmin password: ab@cd.efgh!Xy9secret\nEnd";
    let doc = generate(&VisualRequest::new(text), &RenderOptions::default()).unwrap();
    for secret in [
        "hunter2",
        "ops@example.com",
        "4111 1111 1111 1111",
        "abcdef123456",
        "sk-abcdefghij",
        "cd.efgh",
        "Xy9secret",
    ] {
        assert!(!doc.html.contains(secret), "{} leaked", secret);
    }
    assert_eq!(doc.redactions, 7);
}

#[test]
fn test_override_precedence() {
    let text = "Start\nCheck?\nYes: Go\nEnd";
    for (name, visual_type) in [
        ("chart", VisualType::Chart),
        ("diagram", VisualType::Diagram),
        ("flowchart", VisualType::Flowchart),
    ] {
        let doc = generate(&VisualRequest::new(text).with_type(name), &RenderOptions::default()).unwrap();
        assert_eq!(doc.visual_type, Some(visual_type));
    }
    // nothing chart-shaped in the text: the chart is empty but still valid
    let html = render(text, "chart");
    assert!(html.contains("Nothing to draw"));
}

#[test]
fn test_determinism() {
    let text = "Web app calls Auth service\nAuth service queries User DB\nUser DB returns data to Auth service";
    assert_eq!(render(text, "auto"), render(text, "auto"));
}

#[test]
fn test_document_is_self_contained() {
    let html = render("Start -> Process -> End", "flowchart");
    for banned in ["<script", "<link", "@import", "<img", "<iframe"] {
        assert!(!html.contains(banned), "{}", banned);
    }
    // the only URL is the SVG namespace
    assert_eq!(html.matches("http").count(), 1);
    assert!(html.contains("xmlns=\"http://www.w3.org/2000/svg\""));
}

#[test]
fn test_large_flowchart_is_truncated() {
    let text: String = (1..=75).map(|i| format!("Task number {}\n", i)).collect();
    let doc = generate(&VisualRequest::new(text), &RenderOptions::default()).unwrap();
    assert_eq!(doc.visual_type, Some(VisualType::Flowchart));
    assert!(doc.truncated);
    assert!(doc.html.contains("+15 more steps not shown"));
}
