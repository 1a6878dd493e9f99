//! Font metrics and styling constants.
//!
//! Text width is estimated from character count; the page uses the system
//! UI font stack, so no font file is ever fetched.

/// Approximate rendered width in px at the given font size and weight
pub fn estimate_text_width(text: &str, font_size: f64, font_weight: u32) -> f64 {
    // Average glyph width as a fraction of font size; bolder runs wider.
    let width_ratio = if font_weight >= 600 {
        0.6
    } else if font_weight >= 500 {
        0.57
    } else {
        0.54
    };
    text.chars().count() as f64 * font_size * width_ratio
}

/// Labels longer than this are cut with an ellipsis before layout
pub const MAX_LABEL_CHARS: usize = 40;

/// Shorten a label to [`MAX_LABEL_CHARS`] characters
pub fn display_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut cut: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    cut = cut.trim_end().to_string();
    cut.push('…');
    cut
}

/// Fixed font sizes used in the renderers (in px)
pub struct FontSizes;

impl FontSizes {
    pub const NODE_LABEL: f64 = 14.0;
    pub const EDGE_LABEL: f64 = 12.0;
    pub const AXIS_LABEL: f64 = 13.0;
    pub const NOTE: f64 = 13.0;
}

/// Font weights used per element type
pub struct FontWeights;

impl FontWeights {
    pub const NODE_LABEL: u32 = 600;
    pub const EDGE_LABEL: u32 = 600;
    pub const AXIS_LABEL: u32 = 500;
    pub const NOTE: u32 = 400;
}

/// Stroke widths per element type (in px)
pub struct StrokeWidths;

impl StrokeWidths {
    pub const NODE: f64 = 2.0;
    pub const CONNECTOR: f64 = 2.0;
    pub const AXIS: f64 = 2.0;
}

/// Arrow head dimensions
pub struct ArrowHead;

impl ArrowHead {
    pub const WIDTH: f64 = 10.0;
    pub const HEIGHT: f64 = 7.0;
}

/// Vertical shift applied to all text elements for font-agnostic centering.
/// Using 0.35em ensures it scales with font size.
pub const TEXT_BASELINE_SHIFT: &str = "0.35em";
