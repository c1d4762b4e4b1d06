//! Uniform success and error envelopes returned by every tool.

use crate::inventory::services::DiagnosticsServiceError;
use serde::Serialize;
use serde_json::{Value, json};

/// Error payload of a failed tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolError {
    /// Human-readable failure message.
    pub error: String,
    /// Operator guidance, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&DiagnosticsServiceError> for ToolError {
    fn from(err: &DiagnosticsServiceError) -> Self {
        Self {
            error: err.to_string(),
            hint: err.hint().map(str::to_owned),
        }
    }
}

/// Tool result tagged with a `status` field.
///
/// Success payloads are flattened next to `"status": "success"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolEnvelope<T> {
    /// The tool completed.
    Success(T),
    /// The tool failed.
    Error(ToolError),
}

impl<T: Serialize> ToolEnvelope<T> {
    /// Wraps a service result.
    #[must_use]
    pub fn from_result(result: Result<T, DiagnosticsServiceError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::Error(ToolError::from(&err)),
        }
    }

    /// Returns `true` for success envelopes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts the envelope into a JSON value.
    ///
    /// A payload that cannot be serialized becomes an error envelope.
    #[must_use]
    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or_else(|err| {
            json!({
                "status": "error",
                "error": format!("Failed to serialize tool result: {err}"),
            })
        })
    }
}
