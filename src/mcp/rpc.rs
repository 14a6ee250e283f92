//! JSON-RPC 2.0 message types.
//!
//! One incoming line is either a request (carries an `id` and expects a
//! reply) or a notification (no `id`, no reply). Request IDs are strings or
//! integers, never null.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The protocol revision advertised during initialisation.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// A request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier.
    String(String),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// An incoming request.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Must be "2.0".
    pub jsonrpc: String,
    /// Unique request identifier.
    pub id: MessageId,
    /// Method to invoke.
    pub method: String,
    /// Optional method parameters.
    #[serde(default)]
    pub params: Option<Value>,
}

/// An incoming notification.
#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    /// Must be "2.0".
    pub jsonrpc: String,
    /// Notification method.
    pub method: String,
    /// Optional parameters.
    #[serde(default)]
    pub params: Option<Value>,
}

/// A successful response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// Always "2.0".
    pub jsonrpc: &'static str,
    /// The request this responds to.
    pub id: MessageId,
    /// Result of the method call.
    pub result: Value,
}

impl Response {
    /// Creates a success response.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value is not const-compatible
    pub fn new(id: MessageId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result,
        }
    }
}

/// Standard JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON was received.
    ParseError,
    /// The JSON is not a valid request object.
    InvalidRequest,
    /// The method does not exist.
    MethodNotFound,
    /// Invalid method parameters.
    InvalidParams,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Numeric code on the wire.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// The error member of an error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    /// Numeric error code.
    pub code: i32,
    /// Short description of the error.
    pub message: String,
}

/// An error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always "2.0".
    pub jsonrpc: &'static str,
    /// The request this responds to, when it could be determined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    /// Error details.
    pub error: ErrorObject,
}

impl ErrorResponse {
    /// Creates an error response with the given code and message.
    #[must_use]
    pub fn new(id: Option<MessageId>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            error: ErrorObject {
                code: code.code(),
                message: message.into(),
            },
        }
    }

    /// Invalid JSON; the request ID cannot be determined.
    #[must_use]
    pub fn parse_error() -> Self {
        Self::new(None, ErrorCode::ParseError, "Parse error")
    }

    /// Structurally invalid request object.
    #[must_use]
    pub fn invalid_request(id: Option<MessageId>) -> Self {
        Self::new(id, ErrorCode::InvalidRequest, "Invalid Request")
    }

    /// The requested method does not exist.
    #[must_use]
    pub fn method_not_found(id: MessageId, method: &str) -> Self {
        Self::new(
            Some(id),
            ErrorCode::MethodNotFound,
            format!("Method not found: {method}"),
        )
    }

    /// The method parameters are invalid.
    #[must_use]
    pub fn invalid_params(id: MessageId, message: impl Into<String>) -> Self {
        Self::new(Some(id), ErrorCode::InvalidParams, message)
    }

    /// An internal error occurred while handling the request.
    #[must_use]
    pub fn internal_error(id: MessageId, message: impl Into<String>) -> Self {
        Self::new(Some(id), ErrorCode::InternalError, message)
    }
}

/// One parsed incoming message.
#[derive(Debug, Clone)]
pub enum Message {
    /// A request expecting a response.
    Request(Request),
    /// A notification; no response expected.
    Notification(Notification),
}

impl Message {
    /// Parses one line of input.
    ///
    /// A message with an `id` member is a request, otherwise a notification.
    ///
    /// # Errors
    ///
    /// Returns a ready-to-send [`ErrorResponse`]: a parse error for
    /// malformed JSON, an invalid-request error for anything that is JSON
    /// but not a well-formed message.
    pub fn parse(line: &str) -> Result<Self, ErrorResponse> {
        let value: Value =
            serde_json::from_str(line).map_err(|_| ErrorResponse::parse_error())?;

        if value.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Err(ErrorResponse::invalid_request(None));
        }

        if value.get("id").is_some() {
            let request: Request = serde_json::from_value(value)
                .map_err(|_| ErrorResponse::invalid_request(None))?;
            if request.method.is_empty() {
                return Err(ErrorResponse::invalid_request(Some(request.id)));
            }
            Ok(Self::Request(request))
        } else {
            let notification: Notification = serde_json::from_value(value)
                .map_err(|_| ErrorResponse::invalid_request(None))?;
            Ok(Self::Notification(notification))
        }
    }

    /// Method name of this message.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::Request(request) => &request.method,
            Self::Notification(notification) => &notification.method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request_with_numeric_id() {
        let msg = Message::parse(r#"{"jsonrpc": "2.0", "id": 1, "method": "ping"}"#).unwrap();
        let Message::Request(request) = msg else {
            panic!("expected a request");
        };
        assert_eq!(request.id, MessageId::Number(1));
        assert_eq!(request.method, "ping");
        assert!(request.params.is_none());
    }

    #[test]
    fn parse_request_with_string_id() {
        let msg =
            Message::parse(r#"{"jsonrpc": "2.0", "id": "req-7", "method": "tools/list"}"#).unwrap();
        let Message::Request(request) = msg else {
            panic!("expected a request");
        };
        assert_eq!(request.id, MessageId::String("req-7".to_string()));
    }

    #[test]
    fn parse_notification_has_no_id() {
        let msg =
            Message::parse(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#).unwrap();
        assert!(matches!(msg, Message::Notification(_)));
        assert_eq!(msg.method(), "notifications/initialized");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Message::parse("{ nope").unwrap_err();
        assert_eq!(err.error.code, ErrorCode::ParseError.code());
    }

    #[test]
    fn missing_jsonrpc_member_is_invalid_request() {
        let err = Message::parse(r#"{"id": 1, "method": "ping"}"#).unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn wrong_version_is_invalid_request() {
        let err = Message::parse(r#"{"jsonrpc": "1.0", "id": 1, "method": "ping"}"#).unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn null_id_is_rejected() {
        let err =
            Message::parse(r#"{"jsonrpc": "2.0", "id": null, "method": "ping"}"#).unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn empty_method_is_rejected() {
        let err = Message::parse(r#"{"jsonrpc": "2.0", "id": 2, "method": ""}"#).unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn response_serialises_with_version_and_id() {
        let response = Response::new(MessageId::Number(3), serde_json::json!({"ok": true}));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""jsonrpc":"2.0""#));
        assert!(json.contains(r#""id":3"#));
    }

    #[test]
    fn error_response_serialises_code_and_message() {
        let error = ErrorResponse::method_not_found(MessageId::Number(4), "resources/list");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains(r#""code":-32601"#));
        assert!(json.contains("resources/list"));
    }

    #[test]
    fn parse_error_omits_id() {
        let json = serde_json::to_string(&ErrorResponse::parse_error()).unwrap();
        assert!(!json.contains(r#""id""#));
    }
}
