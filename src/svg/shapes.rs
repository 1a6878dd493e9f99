//! SVG drawing primitives shared by the renderers.
//!
//! Pure string building, no DOM manipulation.
//! Graphs render back-to-front: edges → edge labels → nodes → node labels → note.

use super::styles::{
    display_label, estimate_text_width, ArrowHead, FontSizes, FontWeights, StrokeWidths,
    TEXT_BASELINE_SHIFT,
};
use super::theme::{build_style_block, svg_open_tag, DiagramColors};
use super::types::{NodeKind, NodeShape, Point, PositionedEdge, PositionedGraph, PositionedNode};

/// Height reserved under a graph for its footnote
pub const NOTE_HEIGHT: f64 = 28.0;

/// Render a positioned graph as an SVG string.
pub fn render_graph(graph: &PositionedGraph, colors: &DiagramColors, class: &str) -> String {
    let mut parts = document_head(graph.width, graph.height, colors, class);

    for edge in &graph.edges {
        parts.push(render_edge(edge));
    }
    for edge in &graph.edges {
        if edge.label.is_some() {
            parts.push(render_edge_label(edge));
        }
    }
    for node in &graph.nodes {
        parts.push(render_node_shape(node));
    }
    for node in &graph.nodes {
        parts.push(render_node_label(node));
    }
    if let Some(note) = &graph.note {
        parts.push(render_note(note, graph.width / 2.0, graph.height - NOTE_HEIGHT / 2.0));
    }

    parts.push("</svg>".to_string());
    parts.join("\n")
}

/// Opening tag, style block and marker defs
pub fn document_head(width: f64, height: f64, colors: &DiagramColors, class: &str) -> Vec<String> {
    vec![
        svg_open_tag(width, height, colors, class),
        build_style_block(),
        "<defs>".to_string(),
        arrow_marker_defs(),
        "</defs>".to_string(),
    ]
}

/// A small SVG holding a single centered message
pub fn render_message(message: &str, colors: &DiagramColors, class: &str) -> (String, f64, f64) {
    let width = 480.0;
    let height = 120.0;
    let mut parts = document_head(width, height, colors, class);
    parts.push(format!(
        r#"<rect x="8" y="8" width="{}" height="{}" rx="8" ry="8" fill="var(--_node-fill)" stroke="var(--_inner-stroke)" stroke-width="1" stroke-dasharray="6 4" />"#,
        fmt_num(width - 16.0),
        fmt_num(height - 16.0)
    ));
    parts.push(render_note(message, width / 2.0, height / 2.0));
    parts.push("</svg>".to_string());
    (parts.join("\n"), width, height)
}

// ============================================================================
// Arrow marker definitions
// ============================================================================

fn arrow_marker_defs() -> String {
    let w = ArrowHead::WIDTH;
    let h = ArrowHead::HEIGHT;
    format!(
        r#"  <marker id="arrowhead" markerWidth="{w}" markerHeight="{h}" refX="{w}" refY="{half_h}" orient="auto">
    <polygon points="0 0, {w} {half_h}, 0 {h}" fill="var(--_arrow)" />
  </marker>"#,
        w = fmt_num(w),
        h = fmt_num(h),
        half_h = fmt_num(h / 2.0)
    )
}

// ============================================================================
// Edge rendering
// ============================================================================

fn render_edge(edge: &PositionedEdge) -> String {
    if edge.points.len() < 2 {
        return String::new();
    }

    format!(
        r#"<polyline class="edge" points="{}" fill="none" stroke="var(--_line)" stroke-width="{}" marker-end="url(#arrowhead)" />"#,
        points_to_polyline_path(&edge.points),
        fmt_num(StrokeWidths::CONNECTOR)
    )
}

/// Convert points to SVG polyline points attribute: "x1,y1 x2,y2 ..."
pub fn points_to_polyline_path(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_edge_label(edge: &PositionedEdge) -> String {
    let label = match &edge.label {
        Some(l) => display_label(l),
        None => return String::new(),
    };

    let mid = edge_midpoint(&edge.points);
    let text_width = estimate_text_width(&label, FontSizes::EDGE_LABEL, FontWeights::EDGE_LABEL);
    let padding = 6.0;

    // Background pill behind text for readability
    let bg_width = text_width + padding * 2.0;
    let bg_height = FontSizes::EDGE_LABEL + padding * 2.0;

    format!(
        r#"<rect class="edge-label" x="{}" y="{}" width="{}" height="{}" rx="4" ry="4" fill="var(--bg)" stroke="var(--_inner-stroke)" stroke-width="0.5" />
<text x="{}" y="{}" text-anchor="middle" dy="{}" font-size="{}" font-weight="{}" fill="var(--_text-muted)">{}</text>"#,
        fmt_num(mid.x - bg_width / 2.0),
        fmt_num(mid.y - bg_height / 2.0),
        fmt_num(bg_width),
        fmt_num(bg_height),
        fmt_num(mid.x),
        fmt_num(mid.y),
        TEXT_BASELINE_SHIFT,
        fmt_num(FontSizes::EDGE_LABEL),
        FontWeights::EDGE_LABEL,
        escape_xml(&label)
    )
}

/// Get the midpoint of a polyline (by walking segments)
pub fn edge_midpoint(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point { x: 0.0, y: 0.0 };
    }
    if points.len() == 1 {
        return points[0];
    }

    let total_length: f64 = points.windows(2).map(|pair| dist(&pair[0], &pair[1])).sum();

    // Walk to the halfway point
    let mut remaining = total_length / 2.0;
    for pair in points.windows(2) {
        let seg_len = dist(&pair[0], &pair[1]);
        if remaining <= seg_len && seg_len > 0.0 {
            let t = remaining / seg_len;
            return Point {
                x: pair[0].x + t * (pair[1].x - pair[0].x),
                y: pair[0].y + t * (pair[1].y - pair[0].y),
            };
        }
        remaining -= seg_len;
    }

    points[points.len() - 1]
}

pub fn dist(a: &Point, b: &Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

// ============================================================================
// Node rendering
// ============================================================================

fn render_node_shape(node: &PositionedNode) -> String {
    let (x, y, w, h) = (node.x, node.y, node.width, node.height);
    let (fill, stroke) = match node.kind {
        NodeKind::Decision => ("var(--_decision-fill)", "var(--decision)"),
        NodeKind::Terminal => ("var(--_terminal-fill)", "var(--terminal)"),
        _ => ("var(--_node-fill)", "var(--_node-stroke)"),
    };
    let class = node.kind.class();

    match node.kind.shape() {
        NodeShape::Diamond => render_diamond(class, x, y, w, h, fill, stroke),
        NodeShape::Stadium => render_rounded(class, x, y, w, h, h / 2.0, fill, stroke),
        NodeShape::Rounded => render_rounded(class, x, y, w, h, 8.0, fill, stroke),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_rounded(class: &str, x: f64, y: f64, w: f64, h: f64, r: f64, fill: &str, stroke: &str) -> String {
    format!(
        r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
        class,
        fmt_num(x),
        fmt_num(y),
        fmt_num(w),
        fmt_num(h),
        fmt_num(r),
        fmt_num(r),
        fill,
        stroke,
        fmt_num(StrokeWidths::NODE)
    )
}

fn render_diamond(class: &str, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str) -> String {
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let points = [
        Point { x: cx, y },
        Point { x: x + w, y: cy },
        Point { x: cx, y: y + h },
        Point { x, y: cy },
    ];
    format!(
        r#"<polygon class="{}" points="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
        class,
        points_to_polyline_path(&points),
        fill,
        stroke,
        fmt_num(StrokeWidths::NODE)
    )
}

// ============================================================================
// Text rendering
// ============================================================================

fn render_node_label(node: &PositionedNode) -> String {
    let center = node.center();
    format!(
        r#"<text x="{}" y="{}" text-anchor="middle" dy="{}" font-size="{}" font-weight="{}" fill="var(--_text)">{}</text>"#,
        fmt_num(center.x),
        fmt_num(center.y),
        TEXT_BASELINE_SHIFT,
        fmt_num(FontSizes::NODE_LABEL),
        FontWeights::NODE_LABEL,
        escape_xml(&display_label(&node.label))
    )
}

/// Muted centered text, used for notes and messages
pub fn render_note(text: &str, cx: f64, cy: f64) -> String {
    format!(
        r#"<text class="note" x="{}" y="{}" text-anchor="middle" dy="{}" font-size="{}" font-weight="{}" font-style="italic" fill="var(--_text-sec)">{}</text>"#,
        fmt_num(cx),
        fmt_num(cy),
        TEXT_BASELINE_SHIFT,
        fmt_num(FontSizes::NOTE),
        FontWeights::NOTE,
        escape_xml(text)
    )
}

// ============================================================================
// Utilities
// ============================================================================

/// Escape special XML characters in text content. Characters XML 1.0 does
/// not allow at all are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{FFFE}' | '\u{FFFF}' => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Format a coordinate with at most two decimals and no trailing zeros
pub fn fmt_num(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{:.0}", rounded);
    }
    let s = format!("{:.2}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-4.25), "-4.25");
        assert_eq!(fmt_num(1e20), "100000000000000000000");
        assert_eq!(fmt_num(-3.0), "-3");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
        assert_eq!(escape_xml("a\u{1}b\u{FFFF}"), "ab");
    }

    #[test]
    fn test_edge_midpoint_walks_segments() {
        let points = [
            Point { x: 0.0, y: 0.0 },
            Point { x: 0.0, y: 10.0 },
            Point { x: 30.0, y: 10.0 },
        ];
        assert_eq!(edge_midpoint(&points), Point { x: 10.0, y: 10.0 });
    }

    #[test]
    fn test_message_is_single_text() {
        let (svg, width, height) = render_message("Nothing to draw", &DiagramColors::default(), "visual");
        assert!(svg.contains("Nothing to draw"));
        assert_eq!((width, height), (480.0, 120.0));
        assert!(svg.ends_with("</svg>"));
    }
}
