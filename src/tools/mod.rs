//! Tool catalog: schemas, registry, dispatch and the operations themselves.
//!
//! The flow for one `tools/call` request is:
//!
//! ```text
//! name + arguments ──▶ registry lookup ──▶ schema validation ──▶ handler
//!                                                                   │
//!            ToolCallResult ◀── content serialisation ◀─────────────┘
//! ```
//!
//! Every failure along that path is folded into a [`ToolCallResult`] with
//! `isError` set; the registry never lets a handler error escape upward.

pub mod calculator;
pub mod presentations;
pub mod registry;
pub mod schema;

pub use registry::{ToolDescriptor, ToolRegistry};
pub use schema::{FieldType, InputSchema};

use serde::Serialize;

/// One unit of tool output, tagged with its content kind.
///
/// Only the `text` kind is produced today; the tag structure matches the
/// wire format so further kinds can be added without breaking clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Plain text content.
    Text {
        /// The text payload.
        text: String,
    },
}

impl ToolContent {
    /// Creates a text content item.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Response envelope for one tool call.
///
/// Every request yields exactly one of these; `content` may be empty only
/// when the tool legitimately has nothing to report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Ordered content items returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the call failed.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Wraps handler output into a success envelope.
    #[must_use]
    pub const fn success(content: Vec<ToolContent>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Creates an error envelope with a single descriptive text item.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(message)],
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_wire_shape() {
        let item = ToolContent::text("hello");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hello"}));
    }

    #[test]
    fn success_envelope_omits_error_flag() {
        let result = ToolCallResult::success(vec![ToolContent::text("ok")]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("isError"));
    }

    #[test]
    fn error_envelope_carries_single_text_item() {
        let result = ToolCallResult::error("something broke");
        assert!(result.is_error);
        assert_eq!(result.content, vec![ToolContent::text("something broke")]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], true);
    }
}
