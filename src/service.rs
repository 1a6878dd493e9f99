//! JSON boundary for automation pipelines.
//!
//! A request is `{"text": "...", "visual_type": "auto"}`; the response
//! carries the finished document or a structured error, never partial HTML.

use crate::config::RenderOptions;
use crate::types::VisualType;
use crate::{generate, VisualRequest};
use log::warn;
use serde::{Deserialize, Serialize};

/// Machine-readable failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    Success {
        html_output: String,
        /// `null` when the text was empty and the placeholder was returned
        visual_type: Option<VisualType>,
        text_length: usize,
        truncated: bool,
        redactions: usize,
    },
    Failure {
        error: ErrorBody,
        html_output: String,
    },
}

impl ServiceResponse {
    fn failure(kind: &str, message: String) -> Self {
        warn!(kind = kind, message = message.as_str(); "Request failed");
        ServiceResponse::Failure {
            error: ErrorBody {
                kind: kind.to_string(),
                message,
            },
            html_output: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResponse::Success { .. })
    }

    pub fn html_output(&self) -> &str {
        match self {
            ServiceResponse::Success { html_output, .. } | ServiceResponse::Failure { html_output, .. } => {
                html_output
            }
        }
    }
}

/// Run one parsed request through the pipeline
pub fn handle_request(request: &VisualRequest, options: &RenderOptions) -> ServiceResponse {
    match generate(request, options) {
        Ok(doc) => ServiceResponse::Success {
            html_output: doc.html,
            visual_type: doc.visual_type,
            text_length: request.text.chars().count(),
            truncated: doc.truncated,
            redactions: doc.redactions,
        },
        Err(err) => ServiceResponse::failure(err.kind(), err.to_string()),
    }
}

/// Parse a raw JSON request and run it; malformed input is reported as
/// `invalid_request`
pub fn handle_json(body: &str, options: &RenderOptions) -> ServiceResponse {
    match serde_json::from_str::<VisualRequest>(body) {
        Ok(request) => handle_request(&request, options),
        Err(err) => ServiceResponse::failure("invalid_request", format!("malformed request: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn json(response: &ServiceResponse) -> Value {
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_success_shape() {
        let response = handle_json(r#"{"text": "Q1: 1000\nQ2: 1500"}"#, &RenderOptions::default());
        assert!(response.is_success());
        let value = json(&response);
        assert_eq!(value["visual_type"], "chart");
        assert_eq!(value["text_length"], 17);
        assert_eq!(value["truncated"], false);
        assert!(value["html_output"].as_str().unwrap().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_invalid_override_shape() {
        let response = handle_json(r#"{"text": "x", "visual_type": "pie"}"#, &RenderOptions::default());
        let value = json(&response);
        assert_eq!(value["error"]["kind"], "invalid_override");
        assert_eq!(value["html_output"], "");
        assert!(value.get("visual_type").is_none());
    }

    #[test]
    fn test_malformed_json() {
        let response = handle_json("{not json", &RenderOptions::default());
        assert!(!response.is_success());
        assert_eq!(json(&response)["error"]["kind"], "invalid_request");
        let missing_text = handle_json(r#"{"visual_type": "chart"}"#, &RenderOptions::default());
        assert_eq!(json(&missing_text)["error"]["kind"], "invalid_request");
    }

    #[test]
    fn test_placeholder_has_null_type() {
        let response = handle_request(&VisualRequest::new(""), &RenderOptions::default());
        let value = json(&response);
        assert!(value["visual_type"].is_null());
        assert!(!response.html_output().is_empty());
    }

    #[test]
    fn test_response_round_trips() {
        let response = handle_json(r#"{"text": "{broken"}"#, &RenderOptions::default());
        let text = serde_json::to_string(&response).unwrap();
        let back: ServiceResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, response);
    }
}
