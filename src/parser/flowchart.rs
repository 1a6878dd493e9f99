//! Flowchart parser
//!
//! Accepted line shapes:
//! - `Some step` : an action node, joined to the previous step
//! - `Is it valid?` : a decision node
//! - `Yes: Target` / `No: Target` : up to two branch lines right after a decision
//! - `If cond then A else B` : shorthand for a decision with Yes/No branches
//! - `A -> B -> C` : an inline chain of steps
//! - `Step 3: Do it` : the `Step N:` prefix is dropped
//!
//! Branch targets that have not been connected elsewhere flow into the next
//! main-line step once the branch block is over.

use super::{content_lines, split_arrow_chain};
use crate::types::{FlowNode, Flowchart};
use lazy_static::lazy_static;
use regex::Regex;

/// Lines after a decision that may be read as branches
pub const MAX_BRANCH_LINES: usize = 2;
const MAX_BRANCH_LABEL_WORDS: usize = 3;
const MAX_BRANCH_LABEL_CHARS: usize = 20;

lazy_static! {
    static ref RE_STEP_PREFIX: Regex = Regex::new(r"(?i)^step\s*\d+\s*[:.)-]\s*(.+)$").unwrap();
    static ref RE_STEP_LABEL: Regex = Regex::new(r"(?i)^step\s*\d+$").unwrap();
    static ref RE_BRANCH: Regex = Regex::new(r"^(?P<label>[^:]+?)\s*:\s*(?P<target>\S.*)$").unwrap();
    static ref RE_IF_THEN: Regex = Regex::new(
        r"(?i)^if\s+(?P<cond>.+?)\s+then\s+(?P<then>.+?)(?:\s+else\s+(?P<else>.+))?$"
    )
    .unwrap();
}

const START_WORDS: [&str; 2] = ["start", "begin"];
const END_WORDS: [&str; 3] = ["end", "finish", "stop"];

struct Builder {
    chart: Flowchart,
    /// Exit node of the previous main-line step, if it continues sequentially
    prev_exit: Option<usize>,
    /// Branch targets waiting to be joined to the next main-line step
    pending_merge: Vec<usize>,
}

impl Builder {
    fn new() -> Self {
        Self {
            chart: Flowchart::new(),
            prev_exit: None,
            pending_merge: Vec::new(),
        }
    }

    fn node(&mut self, label: &str) -> usize {
        self.chart.nodes.intern(label, || make_node(label))
    }

    fn is_decision(&self, idx: usize) -> bool {
        self.chart.node(idx).is_some_and(|n| n.is_decision)
    }

    /// Join a new main-line step to whatever precedes it
    fn enter_step(&mut self, entry: usize) {
        if let Some(prev) = self.prev_exit.take() {
            self.chart.connect(prev, entry, None);
        }
        for target in std::mem::take(&mut self.pending_merge) {
            if !self.chart.has_outgoing(target) {
                self.chart.connect(target, entry, None);
            }
        }
    }

    fn branch(&mut self, decision: usize, label: &str, target: &str) {
        let target = self.node(target);
        self.chart.connect(decision, target, Some(label.to_string()));
        if target != decision {
            self.pending_merge.push(target);
        }
    }
}

/// Parse flowchart text into nodes and edges.
pub fn parse_flowchart(text: &str) -> Flowchart {
    let lines = content_lines(text);
    let mut builder = Builder::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(caps) = RE_IF_THEN.captures(line) {
            let cond = caps["cond"].trim();
            let label = if cond.ends_with('?') {
                cond.to_string()
            } else {
                format!("{}?", cond)
            };
            let decision = builder.node(&label);
            builder.enter_step(decision);
            builder.branch(decision, "Yes", strip_step_prefix(&caps["then"]));
            if let Some(otherwise) = caps.name("else") {
                builder.branch(decision, "No", strip_step_prefix(otherwise.as_str()));
            }
            i += 1;
            continue;
        }

        let exit = match split_arrow_chain(line) {
            Some(parts) => {
                let ids: Vec<usize> = parts
                    .iter()
                    .map(|part| builder.node(strip_step_prefix(part)))
                    .collect();
                builder.enter_step(ids[0]);
                for pair in ids.windows(2) {
                    builder.chart.connect(pair[0], pair[1], None);
                }
                ids[ids.len() - 1]
            }
            None => {
                let node = builder.node(strip_step_prefix(line));
                builder.enter_step(node);
                node
            }
        };

        i += 1;
        if builder.is_decision(exit) {
            let mut branches = 0;
            while branches < MAX_BRANCH_LINES && i < lines.len() {
                match parse_branch(lines[i]) {
                    Some((label, target)) => {
                        builder.branch(exit, label, strip_step_prefix(target));
                        branches += 1;
                        i += 1;
                    }
                    None => break,
                }
            }
            if branches > 0 {
                continue;
            }
        }
        builder.prev_exit = Some(exit);
    }

    builder.chart
}

fn make_node(label: &str) -> FlowNode {
    let first_word = label
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    FlowNode {
        label: label.to_string(),
        is_decision: label.ends_with('?'),
        is_start: START_WORDS.contains(&first_word.as_str()),
        is_end: END_WORDS.contains(&first_word.as_str()),
    }
}

fn strip_step_prefix(line: &str) -> &str {
    match RE_STEP_PREFIX.captures(line) {
        Some(caps) => caps.get(1).map_or(line, |m| m.as_str().trim()),
        None => line.trim(),
    }
}

/// Read a `<label>: <target>` branch line
fn parse_branch(line: &str) -> Option<(&str, &str)> {
    let caps = RE_BRANCH.captures(line)?;
    let label = caps.name("label")?.as_str().trim();
    let target = caps.name("target")?.as_str().trim();
    if label.is_empty()
        || label.len() > MAX_BRANCH_LABEL_CHARS
        || label.split_whitespace().count() > MAX_BRANCH_LABEL_WORDS
        || RE_STEP_LABEL.is_match(label)
    {
        return None;
    }
    Some((label, target))
}

/// True when a line carries an unmistakable flowchart marker: a question,
/// a start/end word or an if-then clause. `Yes:`/`No:` lines are left out,
/// they read just as well as chart categories.
pub fn has_flow_marker(line: &str) -> bool {
    let line = line.trim();
    if line.ends_with('?') || RE_IF_THEN.is_match(line) {
        return true;
    }
    let node = make_node(line);
    node.is_start || node.is_end
}
