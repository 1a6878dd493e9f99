//! textvis - Turn plain text into a flowchart, diagram or chart
//!
//! This library detects what kind of visual a piece of text describes,
//! extracts a structural model from it and renders that model as inline SVG
//! inside a self-contained HTML document. Secrets are masked before the text
//! is looked at.
//!
//! # Example
//!
//! ```rust
//! use textvis::render_html;
//!
//! let html = render_html("Start\nLoad data\nEnd", "auto").unwrap();
//! assert!(html.contains("<svg"));
//! ```
//!
//! # Supported Visual Types
//!
//! - Flowcharts (steps, `?` decisions with `Yes:`/`No:` branches, `A -> B` chains)
//! - Diagrams (`<entity> <connective phrase> <entity>` lines)
//! - Charts (`<label>: <number>` lines)

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod html;
pub mod parser;
pub mod redact;
pub mod service;
pub mod svg;
pub mod types;

pub use config::{ChartStyle, RenderOptions, Theme};
pub use detect::detect;
pub use error::VisualError;
pub use parser::parse;
pub use redact::{redact, RedactedText};
pub use types::*;

use log::info;
use serde::{Deserialize, Serialize};

/// Text to visualize plus the requested visual type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualRequest {
    pub text: String,
    /// `auto`, `flowchart`, `diagram` or `chart`
    #[serde(default = "default_visual_type")]
    pub visual_type: String,
}

fn default_visual_type() -> String {
    "auto".to_string()
}

impl VisualRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visual_type: default_visual_type(),
        }
    }

    pub fn with_type(mut self, visual_type: impl Into<String>) -> Self {
        self.visual_type = visual_type.into();
        self
    }
}

/// A finished HTML document and what went into it
#[derive(Debug, Clone, PartialEq)]
pub struct VisualDocument {
    pub html: String,
    /// `None` for the "no data" placeholder
    pub visual_type: Option<VisualType>,
    pub truncated: bool,
    pub redactions: usize,
}

/// Run the whole pipeline: redact, detect, parse, render, assemble.
///
/// The only failure is an unrecognized visual type. Empty text yields the
/// placeholder document.
pub fn generate(request: &VisualRequest, options: &RenderOptions) -> Result<VisualDocument, VisualError> {
    let type_override: TypeOverride = request.visual_type.parse()?;

    let redacted = if options.redact {
        redact(&request.text)
    } else {
        RedactedText::unredacted(&request.text)
    };

    if redacted.as_str().trim().is_empty() {
        info!(redactions = redacted.replacements; "No text to visualize, returning placeholder");
        return Ok(VisualDocument {
            html: html::assemble_placeholder(options),
            visual_type: None,
            truncated: false,
            redactions: redacted.replacements,
        });
    }

    let visual_type = detect(redacted.as_str(), type_override);
    let model = parse(redacted.as_str(), visual_type);
    let markup = svg::render(&model, options);
    let html = html::assemble(&markup, visual_type, options);

    info!(
        visual_type = visual_type.as_str(),
        redactions = redacted.replacements,
        omitted = markup.omitted,
        bytes = html.len();
        "Generated visual"
    );

    Ok(VisualDocument {
        html,
        visual_type: Some(visual_type),
        truncated: markup.is_truncated(),
        redactions: redacted.replacements,
    })
}

/// Render text to an HTML document with default options.
///
/// # Example
/// ```rust
/// let html = textvis::render_html("Q1: 1000\nQ2: 1500", "chart").unwrap();
/// assert!(html.contains("class=\"bar\""));
/// ```
pub fn render_html(text: &str, visual_type: &str) -> Result<String, VisualError> {
    let request = VisualRequest::new(text).with_type(visual_type);
    generate(&request, &RenderOptions::default()).map(|doc| doc.html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_detects_type() {
        let doc = generate(&VisualRequest::new("Frontend connects to API"), &RenderOptions::default()).unwrap();
        assert_eq!(doc.visual_type, Some(VisualType::Diagram));
        assert!(!doc.truncated);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let request = VisualRequest::new("Q1: 1").with_type("pie");
        assert_eq!(
            generate(&request, &RenderOptions::default()),
            Err(VisualError::InvalidOverride("pie".to_string()))
        );
    }

    #[test]
    fn test_blank_text_gives_placeholder() {
        let doc = generate(&VisualRequest::new("  \n\t "), &RenderOptions::default()).unwrap();
        assert_eq!(doc.visual_type, None);
        assert!(doc.html.contains("No data to visualize"));
        assert!(!doc.html.contains("<svg"));
    }

    #[test]
    fn test_secrets_are_masked_in_output() {
        let doc = generate(
            &VisualRequest::new("Start\nLogin with password: hunter2\nEnd"),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(!doc.html.contains("hunter2"));
        assert!(doc.html.contains("[REDACTED]"));
        assert_eq!(doc.redactions, 1);
    }

    #[test]
    fn test_redaction_can_be_disabled() {
        let options = RenderOptions {
            redact: false,
            ..RenderOptions::default()
        };
        let doc = generate(&VisualRequest::new("Start\npassword: hunter2"), &options).unwrap();
        assert!(doc.html.contains("hunter2"));
        assert_eq!(doc.redactions, 0);
    }

    #[test]
    fn test_request_defaults_to_auto() {
        let request: VisualRequest = serde_json::from_str(r#"{"text": "a"}"#).unwrap();
        assert_eq!(request.visual_type, "auto");
    }
}
