//! Type definitions for the structural models produced by the parsers

use crate::error::VisualError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The kind of visual a piece of text is turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualType {
    Flowchart,
    Diagram,
    Chart,
}

impl VisualType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualType::Flowchart => "flowchart",
            VisualType::Diagram => "diagram",
            VisualType::Chart => "chart",
        }
    }

    /// Capitalized name, used in document titles
    pub fn title(&self) -> &'static str {
        match self {
            VisualType::Flowchart => "Flowchart",
            VisualType::Diagram => "Diagram",
            VisualType::Chart => "Chart",
        }
    }
}

impl fmt::Display for VisualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested visual type: either let the detector decide or force one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeOverride {
    #[default]
    Auto,
    Fixed(VisualType),
}

impl FromStr for TypeOverride {
    type Err = VisualError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(TypeOverride::Auto),
            "flowchart" => Ok(TypeOverride::Fixed(VisualType::Flowchart)),
            "diagram" => Ok(TypeOverride::Fixed(VisualType::Diagram)),
            "chart" => Ok(TypeOverride::Fixed(VisualType::Chart)),
            _ => Err(VisualError::InvalidOverride(s.to_string())),
        }
    }
}

impl From<VisualType> for TypeOverride {
    fn from(visual_type: VisualType) -> Self {
        TypeOverride::Fixed(visual_type)
    }
}

// ============================================================================
// Label arena
// ============================================================================

/// Insertion-ordered store that hands out one stable index per distinct label.
///
/// Edges and relations refer to items by index, so labels are stored once
/// and iteration order always matches first appearance in the input.
#[derive(Debug, Clone)]
pub struct LabelArena<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> LabelArena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Return the index for `label`, creating the item with `make` on first sight.
    pub fn intern(&mut self, label: &str, make: impl FnOnce() -> T) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.items.len();
        self.items.push(make());
        self.index.insert(label.to_string(), idx);
        idx
    }

    pub fn get_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.items.get_mut(idx)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for LabelArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Flowchart types
// ============================================================================

/// A step in a flowchart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub label: String,
    pub is_decision: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl FlowNode {
    pub fn is_terminal(&self) -> bool {
        self.is_start || self.is_end
    }
}

/// A directed connection between two flowchart nodes (by index)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    /// Branch label such as "Yes" / "No" for edges leaving a decision
    pub label: Option<String>,
}

/// A parsed flowchart: deduplicated nodes plus ordered edges
#[derive(Debug, Clone, Default)]
pub struct Flowchart {
    pub nodes: LabelArena<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl Flowchart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, idx: usize) -> Option<&FlowNode> {
        self.nodes.get(idx)
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    pub fn has_outgoing(&self, from: usize) -> bool {
        self.edges.iter().any(|e| e.from == from)
    }

    /// Add an edge unless it is a self-loop or the pair already exists.
    /// Returns true when the edge was added.
    pub fn connect(&mut self, from: usize, to: usize, label: Option<String>) -> bool {
        if from == to || self.has_edge(from, to) {
            return false;
        }
        self.edges.push(FlowEdge { from, to, label });
        true
    }
}

impl fmt::Display for Flowchart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.items() {
            let mut flags = Vec::new();
            if node.is_decision {
                flags.push("decision");
            }
            if node.is_start {
                flags.push("start");
            }
            if node.is_end {
                flags.push("end");
            }
            if flags.is_empty() {
                writeln!(f, "node {}", node.label)?;
            } else {
                writeln!(f, "node {} [{}]", node.label, flags.join(","))?;
            }
        }
        for edge in &self.edges {
            let from = self.nodes.get(edge.from).map(|n| n.label.as_str()).unwrap_or("?");
            let to = self.nodes.get(edge.to).map(|n| n.label.as_str()).unwrap_or("?");
            match &edge.label {
                Some(label) => writeln!(f, "edge {} -> {} ({})", from, to, label)?,
                None => writeln!(f, "edge {} -> {}", from, to)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Diagram types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEntity {
    pub name: String,
}

/// A labeled, directed relation between two entities (by index)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRelation {
    pub source: usize,
    pub target: usize,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub entities: LabelArena<DiagramEntity>,
    pub relations: Vec<DiagramRelation>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, idx: usize) -> Option<&DiagramEntity> {
        self.entities.get(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entity in self.entities.items() {
            writeln!(f, "entity {}", entity.name)?;
        }
        for rel in &self.relations {
            let source = self.entities.get(rel.source).map(|e| e.name.as_str()).unwrap_or("?");
            let target = self.entities.get(rel.target).map(|e| e.name.as_str()).unwrap_or("?");
            match &rel.label {
                Some(label) => writeln!(f, "relation {} -> {} ({})", source, target, label)?,
                None => writeln!(f, "relation {} -> {}", source, target)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Chart types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Labeled numeric series in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest value in the series, or 0 when empty
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0f64, f64::max)
    }
}

impl fmt::Display for ChartSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in &self.points {
            writeln!(f, "point {} = {}", point.label, point.value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// The structural model for whichever visual type was detected
#[derive(Debug, Clone)]
pub enum StructuralModel {
    Flowchart(Flowchart),
    Diagram(Diagram),
    Chart(ChartSeries),
}

impl StructuralModel {
    pub fn visual_type(&self) -> VisualType {
        match self {
            StructuralModel::Flowchart(_) => VisualType::Flowchart,
            StructuralModel::Diagram(_) => VisualType::Diagram,
            StructuralModel::Chart(_) => VisualType::Chart,
        }
    }
}

impl fmt::Display for StructuralModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralModel::Flowchart(chart) => chart.fmt(f),
            StructuralModel::Diagram(diagram) => diagram.fmt(f),
            StructuralModel::Chart(series) => series.fmt(f),
        }
    }
}
