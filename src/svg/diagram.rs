//! Diagram renderer.
//!
//! One entity sits in the middle, up to [`CIRCLE_MAX`] entities go round a
//! circle, larger diagrams fall back to a grid. Connectors run between box
//! borders; a pair related both ways gets two parallel connectors.

use super::shapes::{render_graph, NOTE_HEIGHT};
use super::styles::{display_label, estimate_text_width, FontSizes, FontWeights};
use super::theme::DiagramColors;
use super::types::{NodeKind, Point, PositionedEdge, PositionedGraph, PositionedNode, RenderedMarkup};
use crate::types::Diagram;
use log::warn;
use std::f64::consts::PI;

/// Most entities laid out on a circle
pub const CIRCLE_MAX: usize = 8;

const MARGIN: f64 = 48.0;
const ENTITY_PADDING_X: f64 = 20.0;
const MIN_ENTITY_WIDTH: f64 = 110.0;
const MAX_ENTITY_WIDTH: f64 = 260.0;
const ENTITY_HEIGHT: f64 = 48.0;
const MIN_RADIUS: f64 = 150.0;
const ENTITY_GAP: f64 = 60.0;
const GRID_GAP: f64 = 90.0;
const PARALLEL_OFFSET: f64 = 10.0;

pub fn render_diagram(diagram: &Diagram, colors: &DiagramColors, max_entities: usize) -> RenderedMarkup {
    let total = diagram.entities.len();
    let visible = total.min(max_entities);
    let omitted = total - visible;
    if omitted > 0 {
        warn!(shown = visible, omitted = omitted; "Diagram truncated");
    }

    let graph = layout(diagram, visible, omitted);
    RenderedMarkup {
        svg: render_graph(&graph, colors, "visual diagram"),
        width: graph.width,
        height: graph.height,
        omitted,
    }
}

fn layout(diagram: &Diagram, visible: usize, omitted: usize) -> PositionedGraph {
    let entities = &diagram.entities.items()[..visible];
    let widest = entities
        .iter()
        .map(|e| estimate_text_width(&display_label(&e.name), FontSizes::NODE_LABEL, FontWeights::NODE_LABEL))
        .fold(0.0, f64::max);
    let width = (widest + ENTITY_PADDING_X * 2.0).clamp(MIN_ENTITY_WIDTH, MAX_ENTITY_WIDTH);

    let centers = if visible <= CIRCLE_MAX {
        circle_centers(visible, width)
    } else {
        grid_centers(visible, width)
    };

    // Shift so the top-left box corner lands on the margin
    let min_x = centers.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
    let min_y = centers.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
    let dx = MARGIN + width / 2.0 - if min_x.is_finite() { min_x } else { 0.0 };
    let dy = MARGIN + ENTITY_HEIGHT / 2.0 - if min_y.is_finite() { min_y } else { 0.0 };

    let nodes: Vec<PositionedNode> = entities
        .iter()
        .zip(&centers)
        .map(|(entity, c)| PositionedNode {
            label: entity.name.clone(),
            kind: NodeKind::Entity,
            x: c.x + dx - width / 2.0,
            y: c.y + dy - ENTITY_HEIGHT / 2.0,
            width,
            height: ENTITY_HEIGHT,
        })
        .collect();

    let mut edges = Vec::new();
    for relation in &diagram.relations {
        if relation.source >= visible || relation.target >= visible {
            continue;
        }
        let opposed = diagram
            .relations
            .iter()
            .any(|r| r.source == relation.target && r.target == relation.source);
        let offset = if opposed { PARALLEL_OFFSET } else { 0.0 };
        edges.push(PositionedEdge {
            label: relation.label.clone(),
            points: connector(&nodes[relation.source], &nodes[relation.target], offset),
        });
    }

    let note = (omitted > 0).then(|| format!("+{} more entities not shown", omitted));
    let right = nodes.iter().map(|n| n.right()).fold(0.0, f64::max);
    let bottom = nodes.iter().map(|n| n.bottom()).fold(0.0, f64::max);
    let mut height = bottom + MARGIN;
    if note.is_some() {
        height += NOTE_HEIGHT;
    }

    PositionedGraph {
        width: (right + MARGIN).max(MIN_ENTITY_WIDTH + MARGIN * 2.0),
        height,
        nodes,
        edges,
        note,
    }
}

/// Centers around the origin, first entity at the top, going clockwise
fn circle_centers(count: usize, width: f64) -> Vec<Point> {
    if count == 1 {
        return vec![Point { x: 0.0, y: 0.0 }];
    }
    // Neighbouring boxes need a chord of at least their width plus a gap
    let chord = width + ENTITY_GAP;
    let radius = (chord / (2.0 * (PI / count as f64).sin())).max(MIN_RADIUS);
    (0..count)
        .map(|i| {
            let angle = -PI / 2.0 + 2.0 * PI * i as f64 / count as f64;
            Point {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        })
        .collect()
}

fn grid_centers(count: usize, width: f64) -> Vec<Point> {
    let cols = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| Point {
            x: (i % cols) as f64 * (width + GRID_GAP),
            y: (i / cols) as f64 * (ENTITY_HEIGHT + GRID_GAP),
        })
        .collect()
}

/// Straight connector between the borders of two boxes, shifted sideways
/// by `offset` along the normal of the center line
fn connector(from: &PositionedNode, to: &PositionedNode, offset: f64) -> Vec<Point> {
    let a = from.center();
    let b = to.center();
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return vec![a, b];
    }
    let (nx, ny) = (-dy / len * offset, dx / len * offset);
    let a = Point { x: a.x + nx, y: a.y + ny };
    let b = Point { x: b.x + nx, y: b.y + ny };
    vec![border_point(from, a, b), border_point(to, b, a)]
}

/// Where the ray from `inside` toward `toward` leaves the node's box
fn border_point(node: &PositionedNode, inside: Point, toward: Point) -> Point {
    let (dx, dy) = (toward.x - inside.x, toward.y - inside.y);
    let half_w = node.width / 2.0;
    let half_h = node.height / 2.0;
    let center = node.center();
    // Distance from the ray origin to each side, along the ray
    let tx = if dx > 0.0 {
        (center.x + half_w - inside.x) / dx
    } else if dx < 0.0 {
        (center.x - half_w - inside.x) / dx
    } else {
        f64::INFINITY
    };
    let ty = if dy > 0.0 {
        (center.y + half_h - inside.y) / dy
    } else if dy < 0.0 {
        (center.y - half_h - inside.y) / dy
    } else {
        f64::INFINITY
    };
    let t = tx.min(ty);
    if !t.is_finite() {
        return inside;
    }
    Point {
        x: inside.x + dx * t,
        y: inside.y + dy * t,
    }
}
