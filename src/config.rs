//! Rendering options shared by the renderers and the HTML assembler

use serde::{Deserialize, Serialize};

/// Color theme for the generated SVG and page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light page, indigo accents
    #[default]
    Default,
    /// Dark page, light text
    Dark,
}

/// How a chart series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// Line when every label is a sequential period, bars otherwise
    #[default]
    Auto,
    Bar,
    Line,
}

/// Options controlling redaction, layout limits and styling.
///
/// Every field has a default, so a partial TOML file is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Mask secrets before anything else looks at the text. Default: true
    pub redact: bool,
    /// Document title. Default: "Text Visual"
    pub title: String,
    pub theme: Theme,
    pub chart_style: ChartStyle,
    /// Flowchart nodes drawn before truncating. Default: 60
    pub max_flow_nodes: usize,
    /// Diagram entities drawn before truncating. Default: 40
    pub max_diagram_entities: usize,
    /// Chart points drawn before truncating. Default: 50
    pub max_chart_points: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            redact: true,
            title: "Text Visual".to_string(),
            theme: Theme::Default,
            chart_style: ChartStyle::Auto,
            max_flow_nodes: 60,
            max_diagram_entities: 40,
            max_chart_points: 50,
        }
    }
}
