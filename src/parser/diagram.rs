//! Diagram parser: `<source> <connective phrase> <target>` lines become
//! entities and labeled relations.

use super::{collapse_whitespace, content_lines, split_arrow_chain};
use crate::types::{Diagram, DiagramEntity, DiagramRelation};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Connective phrases, most specific first within each verb family
const CONNECTIVES: &str = r"connects\s+to|sends(?:\s+(?:data|requests?|messages?))?\s+to|routes\s+to|links\s+to|queries|returns(?:\s+(?:data|responses?|results?))?\s+to|calls|reads\s+from|writes\s+to|depends\s+on|talks\s+to|publishes\s+to|subscribes\s+to|forwards\s+to|notifies|stores\s+data\s+in|uses";

lazy_static! {
    static ref RE_RELATION: Regex = Regex::new(&format!(
        r"(?i)^(?P<source>.+?)\s+(?P<verb>{})\s+(?P<target>.+)$",
        CONNECTIVES
    ))
    .unwrap();
    static ref RE_CONNECTIVE_WORD: Regex =
        Regex::new(&format!(r"(?i)\b(?:{})\b", CONNECTIVES)).unwrap();
    static ref RE_CLAUSE_BREAK: Regex = Regex::new(r";|\.(?:\s+|$)").unwrap();
    static ref RE_ARTICLE: Regex = Regex::new(r"(?i)^(?:the|a|an)\s+").unwrap();
    static ref RE_TRAILING_PUNCT: Regex = Regex::new(r"[.,;:!]+$").unwrap();
}

/// Parse relation lines into a deduplicated entity set and relation list
pub fn parse_diagram(text: &str) -> Diagram {
    let mut diagram = Diagram::new();

    for line in content_lines(text) {
        let mut matched = false;
        for clause in RE_CLAUSE_BREAK.split(line) {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            matched |= parse_clause(clause, &mut diagram);
        }
        if !matched {
            debug!(line = line; "Skipping line without a connective phrase");
        }
    }

    diagram
}

fn parse_clause(clause: &str, diagram: &mut Diagram) -> bool {
    if let Some(caps) = RE_RELATION.captures(clause) {
        let label = collapse_whitespace(&caps["verb"]).to_lowercase();
        return add_relation(diagram, &caps["source"], &caps["target"], Some(label));
    }

    if let Some(parts) = split_arrow_chain(clause) {
        let mut any = false;
        for pair in parts.windows(2) {
            any |= add_relation(diagram, pair[0], pair[1], None);
        }
        return any;
    }

    false
}

fn add_relation(diagram: &mut Diagram, source: &str, target: &str, label: Option<String>) -> bool {
    let source = normalize_entity(source);
    let target = normalize_entity(target);
    if source.is_empty() || target.is_empty() {
        return false;
    }

    let source_idx = intern_entity(diagram, &source);
    let target_idx = intern_entity(diagram, &target);
    if source_idx == target_idx {
        return true;
    }

    let relation = DiagramRelation {
        source: source_idx,
        target: target_idx,
        label,
    };
    if !diagram.relations.contains(&relation) {
        diagram.relations.push(relation);
    }
    true
}

fn intern_entity(diagram: &mut Diagram, name: &str) -> usize {
    diagram.entities.intern(name, || DiagramEntity {
        name: name.to_string(),
    })
}

/// Canonical entity name: collapsed whitespace, no leading article, no
/// trailing punctuation
pub fn normalize_entity(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let without_punct = RE_TRAILING_PUNCT.replace(&collapsed, "");
    let without_article = RE_ARTICLE.replace(without_punct.trim(), "");
    without_article.trim().to_string()
}

/// True when the line links two terms with a connective phrase
pub fn has_relation(line: &str) -> bool {
    RE_RELATION.is_match(line.trim())
}

/// True when a connective verb appears anywhere in the text
pub fn contains_connective(text: &str) -> bool {
    RE_CONNECTIVE_WORD.is_match(text)
}
