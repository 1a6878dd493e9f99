//! SVG renderer - turns structural models into self-contained SVG markup.
//!
//! Supports all visual types:
//! - Flowcharts (render_flowchart)
//! - Diagrams (render_diagram)
//! - Charts (render_chart)
//!
//! Pure string building, no DOM manipulation.

mod chart;
mod diagram;
mod flowchart;
mod shapes;
mod styles;
mod theme;
mod types;

pub use chart::{format_value, is_sequential_periods, render_chart};
pub use diagram::render_diagram;
pub use flowchart::render_flowchart;
pub use shapes::escape_xml;
pub use theme::DiagramColors;
pub use types::*;

use crate::config::RenderOptions;
use crate::types::{StructuralModel, VisualType};

/// Render any structural model with the configured theme and limits.
///
/// A model with nothing in it still yields a valid SVG carrying a short
/// note instead of an empty canvas.
pub fn render(model: &StructuralModel, options: &RenderOptions) -> RenderedMarkup {
    let colors = DiagramColors::from_theme(options.theme);
    let visual_type = model.visual_type();
    let is_empty = match model {
        StructuralModel::Flowchart(chart) => chart.nodes.is_empty(),
        StructuralModel::Diagram(diagram) => diagram.is_empty(),
        StructuralModel::Chart(series) => series.is_empty(),
    };
    if is_empty {
        return render_empty(visual_type, &colors);
    }

    match model {
        StructuralModel::Flowchart(chart) => render_flowchart(chart, &colors, options.max_flow_nodes),
        StructuralModel::Diagram(diagram) => render_diagram(diagram, &colors, options.max_diagram_entities),
        StructuralModel::Chart(series) => {
            render_chart(series, &colors, options.chart_style, options.max_chart_points)
        }
    }
}

fn render_empty(visual_type: VisualType, colors: &DiagramColors) -> RenderedMarkup {
    let message = match visual_type {
        VisualType::Flowchart => "Nothing to draw: no steps found",
        VisualType::Diagram => "Nothing to draw: no relationships found",
        VisualType::Chart => "Nothing to draw: no label: value pairs found",
    };
    let class = format!("visual {} empty", visual_type.as_str());
    let (svg, width, height) = shapes::render_message(message, colors, &class);
    RenderedMarkup {
        svg,
        width,
        height,
        omitted: 0,
    }
}
