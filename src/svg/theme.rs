//! Theme system - CSS custom property-based theming for SVG visuals.
//!
//! Architecture:
//!   - Two required variables: --bg (background) and --fg (foreground)
//!   - Optional enrichment variables: --line, --accent, --muted, --surface, --border
//!   - Per-role colors: --decision and --terminal tint the matching flowchart nodes
//!   - Unset optionals fall back to color-mix() derivations from bg + fg
//!
//! Everything lives inline in the markup; no stylesheet or font is fetched.

use crate::config::Theme;

/// Visual color configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramColors {
    /// Background color → CSS variable --bg
    pub bg: String,
    /// Foreground / primary text color → CSS variable --fg
    pub fg: String,
    /// Edge/connector color → CSS variable --line (optional)
    pub line: Option<String>,
    /// Arrow heads, bars, highlights → CSS variable --accent (optional)
    pub accent: Option<String>,
    /// Secondary text, edge labels → CSS variable --muted (optional)
    pub muted: Option<String>,
    /// Node/box fill tint → CSS variable --surface (optional)
    pub surface: Option<String>,
    /// Node stroke color → CSS variable --border (optional)
    pub border: Option<String>,
    /// Decision node stroke → CSS variable --decision
    pub decision: String,
    /// Start/end node stroke → CSS variable --terminal
    pub terminal: String,
}

impl Default for DiagramColors {
    fn default() -> Self {
        Self::from_theme(Theme::Default)
    }
}

impl DiagramColors {
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Default => Self {
                bg: "#FFFFFF".to_string(),
                fg: "#2C3E50".to_string(),
                line: Some("#5D6D7E".to_string()),
                accent: Some("#667EEA".to_string()),
                muted: Some("#5D6D7E".to_string()),
                surface: Some("#EEF0FD".to_string()),
                border: Some("#667EEA".to_string()),
                decision: "#E74C3C".to_string(),
                terminal: "#27AE60".to_string(),
            },
            Theme::Dark => Self {
                bg: "#1E1E2E".to_string(),
                fg: "#E0E0E6".to_string(),
                line: Some("#9AA0B4".to_string()),
                accent: Some("#8C9EFF".to_string()),
                muted: Some("#9AA0B4".to_string()),
                surface: Some("#2A2C44".to_string()),
                border: Some("#8C9EFF".to_string()),
                decision: "#FF7A6B".to_string(),
                terminal: "#4CD68A".to_string(),
            },
        }
    }
}

/// color-mix() weights for derived CSS variables
pub struct Mix;

impl Mix {
    pub const TEXT_SEC: u8 = 60;
    pub const TEXT_MUTED: u8 = 40;
    pub const LINE: u8 = 30;
    pub const ARROW: u8 = 50;
    pub const NODE_FILL: u8 = 3;
    pub const NODE_STROKE: u8 = 20;
    pub const INNER_STROKE: u8 = 12;
    pub const ROLE_FILL: u8 = 14;
    pub const GRID: u8 = 10;
}

/// Build the <style> block with derived CSS variables.
pub fn build_style_block() -> String {
    let derived_vars = format!(
        r#"
    --_text:          var(--fg);
    --_text-sec:      var(--muted, color-mix(in srgb, var(--fg) {}%, var(--bg)));
    --_text-muted:    var(--muted, color-mix(in srgb, var(--fg) {}%, var(--bg)));
    --_line:          var(--line, color-mix(in srgb, var(--fg) {}%, var(--bg)));
    --_arrow:         var(--accent, color-mix(in srgb, var(--fg) {}%, var(--bg)));
    --_node-fill:     var(--surface, color-mix(in srgb, var(--fg) {}%, var(--bg)));
    --_node-stroke:   var(--border, color-mix(in srgb, var(--fg) {}%, var(--bg)));
    --_inner-stroke:  color-mix(in srgb, var(--fg) {}%, var(--bg));
    --_decision-fill: color-mix(in srgb, var(--decision) {}%, var(--bg));
    --_terminal-fill: color-mix(in srgb, var(--terminal) {}%, var(--bg));
    --_bar:           var(--accent, var(--fg));
    --_grid:          color-mix(in srgb, var(--fg) {}%, var(--bg));"#,
        Mix::TEXT_SEC,
        Mix::TEXT_MUTED,
        Mix::LINE,
        Mix::ARROW,
        Mix::NODE_FILL,
        Mix::NODE_STROKE,
        Mix::INNER_STROKE,
        Mix::ROLE_FILL,
        Mix::ROLE_FILL,
        Mix::GRID,
    );

    format!(
        r#"<style>
  text {{ font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif; }}
  svg {{{}
  }}
</style>"#,
        derived_vars
    )
}

/// Build the SVG opening tag with CSS variables set as inline styles.
pub fn svg_open_tag(width: f64, height: f64, colors: &DiagramColors, class: &str) -> String {
    let mut vars = vec![format!("--bg:{}", colors.bg), format!("--fg:{}", colors.fg)];

    if let Some(ref line) = colors.line {
        vars.push(format!("--line:{}", line));
    }
    if let Some(ref accent) = colors.accent {
        vars.push(format!("--accent:{}", accent));
    }
    if let Some(ref muted) = colors.muted {
        vars.push(format!("--muted:{}", muted));
    }
    if let Some(ref surface) = colors.surface {
        vars.push(format!("--surface:{}", surface));
    }
    if let Some(ref border) = colors.border {
        vars.push(format!("--border:{}", border));
    }
    vars.push(format!("--decision:{}", colors.decision));
    vars.push(format!("--terminal:{}", colors.terminal));

    let w_str = super::shapes::fmt_num(width);
    let h_str = super::shapes::fmt_num(height);

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" role="img" viewBox="0 0 {} {}" width="{}" height="{}" style="{};background:var(--bg)">"#,
        class,
        w_str,
        h_str,
        w_str,
        h_str,
        vars.join(";")
    )
}
