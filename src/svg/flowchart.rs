//! Flowchart renderer.
//!
//! Layout is a breadth-first layering from the first node: each edge moves
//! one row down, several successors of one node spread side by side, and a
//! cell already taken pushes the newcomer right. Nodes the walk never reaches
//! start fresh walks further down. Edges that point up or sideways route
//! around the right-hand side.

use super::shapes::{render_graph, NOTE_HEIGHT};
use super::styles::{display_label, estimate_text_width, FontSizes, FontWeights};
use super::theme::DiagramColors;
use super::types::{NodeKind, Point, PositionedEdge, PositionedGraph, PositionedNode, RenderedMarkup};
use crate::types::Flowchart;
use log::warn;
use std::collections::{HashSet, VecDeque};

const MARGIN: f64 = 40.0;
const NODE_PADDING_X: f64 = 24.0;
const MIN_NODE_WIDTH: f64 = 140.0;
const MAX_NODE_WIDTH: f64 = 300.0;
const NODE_HEIGHT: f64 = 52.0;
const DECISION_HEIGHT: f64 = 76.0;
const H_GAP: f64 = 48.0;
const V_GAP: f64 = 56.0;
const BACK_EDGE_LANE: f64 = 16.0;

/// Grid slot of a node. Columns are counted in half steps so two branches
/// can sit either side of their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    row: usize,
    half_col: i64,
}

pub fn render_flowchart(chart: &Flowchart, colors: &DiagramColors, max_nodes: usize) -> RenderedMarkup {
    let total = chart.nodes.len();
    let visible = total.min(max_nodes);
    let omitted = total - visible;
    if omitted > 0 {
        warn!(shown = visible, omitted = omitted; "Flowchart truncated");
    }

    let graph = layout(chart, visible, omitted);
    RenderedMarkup {
        svg: render_graph(&graph, colors, "visual flowchart"),
        width: graph.width,
        height: graph.height,
        omitted,
    }
}

fn layout(chart: &Flowchart, visible: usize, omitted: usize) -> PositionedGraph {
    let items = &chart.nodes.items()[..visible];

    let widest = items
        .iter()
        .map(|n| estimate_text_width(&display_label(&n.label), FontSizes::NODE_LABEL, FontWeights::NODE_LABEL))
        .fold(0.0, f64::max);
    let node_width = (widest + NODE_PADDING_X * 2.0).clamp(MIN_NODE_WIDTH, MAX_NODE_WIDTH);
    let row_height = if items.iter().any(|n| n.is_decision) {
        DECISION_HEIGHT
    } else {
        NODE_HEIGHT
    };

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); visible];
    for edge in &chart.edges {
        if edge.from < visible && edge.to < visible {
            successors[edge.from].push(edge.to);
        }
    }

    let slots = assign_slots(&successors);
    let min_half = slots.iter().map(|s| s.half_col).min().unwrap_or(0);
    let max_half = slots.iter().map(|s| s.half_col).max().unwrap_or(0);
    let rows = slots.iter().map(|s| s.row + 1).max().unwrap_or(0);

    let col_step = node_width + H_GAP;
    let nodes: Vec<PositionedNode> = items
        .iter()
        .zip(&slots)
        .map(|(node, slot)| {
            let (kind, height) = if node.is_decision {
                (NodeKind::Decision, DECISION_HEIGHT)
            } else if node.is_terminal() {
                (NodeKind::Terminal, NODE_HEIGHT)
            } else {
                (NodeKind::Process, NODE_HEIGHT)
            };
            PositionedNode {
                label: node.label.clone(),
                kind,
                x: MARGIN + (slot.half_col - min_half) as f64 / 2.0 * col_step,
                y: MARGIN + slot.row as f64 * (row_height + V_GAP) + (row_height - height) / 2.0,
                width: node_width,
                height,
            }
        })
        .collect();

    let content_right = MARGIN + (max_half - min_half) as f64 / 2.0 * col_step + node_width;
    let mut edges = Vec::new();
    let mut back_lanes = 0;
    for edge in &chart.edges {
        if edge.from >= visible || edge.to >= visible {
            continue;
        }
        let from = &nodes[edge.from];
        let to = &nodes[edge.to];
        let points = if slots[edge.to].row > slots[edge.from].row {
            forward_route(from, to)
        } else {
            back_lanes += 1;
            back_route(from, to, content_right + BACK_EDGE_LANE * back_lanes as f64)
        };
        edges.push(PositionedEdge {
            label: edge.label.clone(),
            points,
        });
    }

    let note = (omitted > 0).then(|| format!("+{} more steps not shown", omitted));
    let width = content_right + BACK_EDGE_LANE * back_lanes as f64 + MARGIN;
    let mut height = MARGIN * 2.0 + rows as f64 * (row_height + V_GAP) - V_GAP;
    if note.is_some() {
        height += NOTE_HEIGHT;
    }

    PositionedGraph {
        width: width.max(MIN_NODE_WIDTH + MARGIN * 2.0),
        height: height.max(NODE_HEIGHT + MARGIN * 2.0),
        nodes,
        edges,
        note,
    }
}

/// Breadth-first slot assignment over the visible nodes
fn assign_slots(successors: &[Vec<usize>]) -> Vec<Slot> {
    let count = successors.len();
    let mut slots = vec![Slot { row: 0, half_col: 0 }; count];
    let mut placed = vec![false; count];
    let mut occupied: HashSet<(usize, i64)> = HashSet::new();
    let mut next_row = 0;

    // The first node starts the walk; anything left unreached starts its own
    for root in 0..count {
        if placed[root] {
            continue;
        }
        let mut queue = VecDeque::from([(root, Slot { row: next_row, half_col: 0 })]);
        while let Some((idx, wanted)) = queue.pop_front() {
            if placed[idx] {
                continue;
            }
            let slot = free_slot(&occupied, wanted);
            occupied.insert((slot.row, slot.half_col));
            slots[idx] = slot;
            placed[idx] = true;
            next_row = next_row.max(slot.row + 1);

            let children: Vec<usize> = successors[idx].iter().copied().filter(|&c| !placed[c]).collect();
            let spread = children.len() as i64 - 1;
            for (j, child) in children.into_iter().enumerate() {
                let child_slot = Slot {
                    row: slot.row + 1,
                    half_col: slot.half_col + 2 * j as i64 - spread,
                };
                queue.push_back((child, child_slot));
            }
        }
    }

    slots
}

/// Nearest slot at or right of `wanted` that does not overlap a neighbour
fn free_slot(occupied: &HashSet<(usize, i64)>, wanted: Slot) -> Slot {
    let mut half_col = wanted.half_col;
    while (half_col - 1..=half_col + 1).any(|c| occupied.contains(&(wanted.row, c))) {
        half_col += 2;
    }
    Slot {
        row: wanted.row,
        half_col,
    }
}

/// Downward edge: decisions leave from the side facing the target,
/// everything else from the bottom
fn forward_route(from: &PositionedNode, to: &PositionedNode) -> Vec<Point> {
    let start = from.center();
    let end = to.center();
    let top = to.y;

    let mut points = if from.kind == NodeKind::Decision && (end.x - start.x).abs() > 0.5 {
        let side = if end.x < start.x { from.x } else { from.right() };
        vec![
            Point { x: side, y: start.y },
            Point { x: end.x, y: start.y },
            Point { x: end.x, y: top },
        ]
    } else {
        let bend = from.bottom() + V_GAP / 2.0;
        vec![
            Point { x: start.x, y: from.bottom() },
            Point { x: start.x, y: bend },
            Point { x: end.x, y: bend },
            Point { x: end.x, y: top },
        ]
    };
    points.dedup_by(|a, b| (a.x - b.x).abs() < 0.01 && (a.y - b.y).abs() < 0.01);
    points
}

/// Upward or same-row edge, out of the right side and around through a lane
fn back_route(from: &PositionedNode, to: &PositionedNode, lane_x: f64) -> Vec<Point> {
    let start = from.center();
    let end = to.center();
    vec![
        Point { x: from.right(), y: start.y },
        Point { x: lane_x, y: start.y },
        Point { x: lane_x, y: end.y },
        Point { x: to.right(), y: end.y },
    ]
}
