//! Line-oriented parsers turning redacted text into structural models.
//!
//! Every parser is total: lines that match nothing are skipped, and any
//! input (including an empty string) yields a valid, possibly empty, model.

pub mod chart;
pub mod diagram;
pub mod flowchart;

use crate::types::{StructuralModel, VisualType};
use lazy_static::lazy_static;
use regex::Regex;

pub use chart::parse_chart;
pub use diagram::parse_diagram;
pub use flowchart::parse_flowchart;

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref RE_ARROW: Regex = Regex::new(r"\s*(?:->|→)\s*").unwrap();
}

/// Parse text with the parser for `visual_type`
pub fn parse(text: &str, visual_type: VisualType) -> StructuralModel {
    match visual_type {
        VisualType::Flowchart => StructuralModel::Flowchart(parse_flowchart(text)),
        VisualType::Diagram => StructuralModel::Diagram(parse_diagram(text)),
        VisualType::Chart => StructuralModel::Chart(parse_chart(text)),
    }
}

/// Trimmed, non-empty lines in input order
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Collapse runs of whitespace to one space and trim
pub fn collapse_whitespace(s: &str) -> String {
    RE_WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Split `A -> B -> C` into its trimmed, non-empty parts.
///
/// Returns `None` unless the line holds at least one arrow between two parts.
pub fn split_arrow_chain(line: &str) -> Option<Vec<&str>> {
    if !RE_ARROW.is_match(line) {
        return None;
    }
    let parts: Vec<&str> = RE_ARROW
        .split(line)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() >= 2 {
        Some(parts)
    } else {
        None
    }
}
