//! JSON-RPC 2.0 envelope for the MCP adapter.
//!
//! ARCHITECTURE
//! ============
//! Every MCP exchange is one JSON-RPC message. Clients POST a request, the
//! server dispatches on `method`, and the response flows back either inline
//! or through the caller's SSE connection.
//!
//! DESIGN
//! ======
//! - `id` is echoed verbatim. A message with no `id` is a notification and
//!   never gets a response.
//! - Typed errors reach the wire through `ErrorCode`, so the error kind
//!   survives into `error.data` instead of collapsing into a message string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error payloads.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// JSON-RPC id. Strings and numbers are both legal and echoed as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

/// An incoming JSON-RPC message. Request and notification share one shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<RequestId>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl Request {
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Params as an object, or `Value::Null` when absent.
    #[must_use]
    pub fn params(&self) -> &Value {
        self.params.as_ref().unwrap_or(&Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    /// `None` serializes as `null`, which is what parse errors require.
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

impl Response {
    #[must_use]
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
    }

    #[must_use]
    pub fn error(id: Option<RequestId>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            result: None,
            error: Some(RpcError { code, message: message.into(), data: None }),
        }
    }

    /// Structured error from a typed error. `data` carries the grepable code
    /// and retryable flag alongside any extra fields.
    #[must_use]
    pub fn error_from(id: Option<RequestId>, code: i32, err: &(impl ErrorCode + ?Sized), extra: Option<Value>) -> Self {
        let mut data = serde_json::Map::new();
        data.insert("code".into(), Value::String(err.error_code().to_string()));
        data.insert("retryable".into(), Value::Bool(err.retryable()));
        if let Some(Value::Object(extra)) = extra {
            data.extend(extra);
        }
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            id,
            result: None,
            error: Some(RpcError { code, message: err.to_string(), data: Some(Value::Object(data)) }),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
