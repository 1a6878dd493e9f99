//! Visual type detection.
//!
//! Each visual type has a pure scoring predicate returning a confidence in
//! `[0, 1]` over the non-empty lines. A chart majority (every line a chart
//! line, or at least [`CHART_MAJORITY_LINES`] of them making up more than
//! half the text) settles it first, so a titled chart or `Yes: 62` survey
//! results stay charts. Otherwise a score strictly above [`CONCLUSIVE_SCORE`]
//! counts; the highest counting score wins, with ties resolved in the order
//! flowchart, diagram, chart. Nothing conclusive means flowchart, the shape
//! of the common "list of steps" input.

use crate::parser::{chart, content_lines, diagram, flowchart, split_arrow_chain};
use crate::types::{TypeOverride, VisualType};
use log::debug;

/// A signal must score strictly above this to be considered
pub const CONCLUSIVE_SCORE: f64 = 0.5;

/// Chart lines that outvote any flowchart marker once they are the majority
pub const CHART_MAJORITY_LINES: usize = 3;

/// Longest line, in words, still counted as a short step phrase
pub const SHORT_PHRASE_MAX_WORDS: usize = 8;

type Predicate = fn(&[&str]) -> f64;

/// Predicates in tie-break order
const PREDICATES: [(VisualType, Predicate); 3] = [
    (VisualType::Flowchart, flowchart_score),
    (VisualType::Diagram, diagram_score),
    (VisualType::Chart, chart_score),
];

/// Per-type confidence for a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub flowchart: f64,
    pub diagram: f64,
    pub chart: f64,
}

impl Scores {
    pub fn get(&self, visual_type: VisualType) -> f64 {
        match visual_type {
            VisualType::Flowchart => self.flowchart,
            VisualType::Diagram => self.diagram,
            VisualType::Chart => self.chart,
        }
    }
}

/// Decide the visual type. An explicit override always wins.
pub fn detect(text: &str, type_override: TypeOverride) -> VisualType {
    if let TypeOverride::Fixed(visual_type) = type_override {
        return visual_type;
    }

    let lines = content_lines(text);
    if is_chart_majority(&lines) {
        debug!(lines = lines.len(); "Chart lines form a majority");
        return VisualType::Chart;
    }

    let scores = score_lines(&lines);
    let mut best: Option<(VisualType, f64)> = None;
    for (visual_type, _) in PREDICATES {
        let value = scores.get(visual_type);
        if value <= CONCLUSIVE_SCORE {
            continue;
        }
        if best.map_or(true, |(_, top)| value > top) {
            best = Some((visual_type, value));
        }
    }

    let detected = best.map_or(VisualType::Flowchart, |(visual_type, _)| visual_type);
    debug!(
        flowchart = scores.flowchart,
        diagram = scores.diagram,
        chart = scores.chart,
        detected = detected.as_str();
        "Scored visual types"
    );
    detected
}

/// Run every predicate over the text
pub fn score(text: &str) -> Scores {
    score_lines(&content_lines(text))
}

fn score_lines(lines: &[&str]) -> Scores {
    let mut scores = Scores {
        flowchart: 0.0,
        diagram: 0.0,
        chart: 0.0,
    };
    for (visual_type, predicate) in PREDICATES {
        let value = predicate(lines);
        match visual_type {
            VisualType::Flowchart => scores.flowchart = value,
            VisualType::Diagram => scores.diagram = value,
            VisualType::Chart => scores.chart = value,
        }
    }
    scores
}

fn fraction(lines: &[&str], pred: impl Fn(&str) -> bool) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let hits = lines.iter().filter(|l| pred(l)).count();
    hits as f64 / lines.len() as f64
}

/// Label:number lines whose label reads like a name, not a sentence
fn chart_score(lines: &[&str]) -> f64 {
    fraction(lines, is_chart_line)
}

fn is_chart_majority(lines: &[&str]) -> bool {
    let hits = lines.iter().filter(|l| is_chart_line(l)).count();
    hits > 0 && (hits == lines.len() || (hits >= CHART_MAJORITY_LINES && hits * 2 > lines.len()))
}

fn is_chart_line(line: &str) -> bool {
    if !chart::is_point_shaped(line) {
        return false;
    }
    let label = line.split(|c| c == ':' || c == '=').next().unwrap_or("");
    !diagram::contains_connective(label)
}

/// Any flow marker settles it; otherwise the share of short step phrases
fn flowchart_score(lines: &[&str]) -> f64 {
    if lines.iter().any(|l| flowchart::has_flow_marker(l)) {
        return 1.0;
    }
    fraction(lines, is_step_phrase)
}

fn is_step_phrase(line: &str) -> bool {
    if split_arrow_chain(line).is_some() {
        return true;
    }
    let words = line.split_whitespace().count();
    let starts_with_letter = line.chars().next().is_some_and(char::is_alphabetic);
    words <= SHORT_PHRASE_MAX_WORDS
        && starts_with_letter
        && !chart::is_point_shaped(line)
        && !diagram::has_relation(line)
}

fn diagram_score(lines: &[&str]) -> f64 {
    fraction(lines, diagram::has_relation)
}
