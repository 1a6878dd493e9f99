//! Error types for the visual pipeline

use thiserror::Error;

/// Failures the core can report to a caller.
///
/// Everything else (unstructured text, unmatched lines, oversized models)
/// degrades to an empty or truncated visual instead of an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VisualError {
    #[error("invalid visual type '{0}': expected auto, flowchart, diagram or chart")]
    InvalidOverride(String),
}

impl VisualError {
    /// Short machine-readable name used by the JSON boundary
    pub fn kind(&self) -> &'static str {
        match self {
            VisualError::InvalidOverride(_) => "invalid_override",
        }
    }
}
