//! SVG-specific types for positioned graphs ready for rendering.

/// Positioned graph - after layout, ready for SVG rendering
#[derive(Debug, Clone)]
pub struct PositionedGraph {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
    /// Footnote drawn under the graph, e.g. how many nodes were left out
    pub note: Option<String>,
}

/// A positioned node with computed coordinates
#[derive(Debug, Clone)]
pub struct PositionedNode {
    pub label: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedNode {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// What a node stands for; decides its shape and colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Process,
    Decision,
    Terminal,
    Entity,
}

impl NodeKind {
    pub fn shape(self) -> NodeShape {
        match self {
            NodeKind::Process | NodeKind::Entity => NodeShape::Rounded,
            NodeKind::Decision => NodeShape::Diamond,
            NodeKind::Terminal => NodeShape::Stadium,
        }
    }

    /// CSS class on the shape element
    pub fn class(self) -> &'static str {
        match self {
            NodeKind::Process => "node process",
            NodeKind::Decision => "node decision",
            NodeKind::Terminal => "node terminal",
            NodeKind::Entity => "node entity",
        }
    }
}

/// Node shape variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Rounded,
    Diamond,
    Stadium,
}

/// A positioned edge with path points
#[derive(Debug, Clone)]
pub struct PositionedEdge {
    pub label: Option<String>,
    /// Path points including bends
    pub points: Vec<Point>,
}

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Final SVG markup for one visual
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarkup {
    pub svg: String,
    pub width: f64,
    pub height: f64,
    /// Nodes, entities or points left out because of the size limits
    pub omitted: usize,
}

impl RenderedMarkup {
    pub fn is_truncated(&self) -> bool {
        self.omitted > 0
    }
}
