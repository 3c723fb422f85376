//! MCP JSON-RPC 2.0 Types
//!
//! Type definitions for Model Context Protocol communication.
//! Implements the JSON-RPC 2.0 framing shared by the stdio and HTTP
//! transports.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// JSON-RPC request identifier
///
/// MCP clients send either numbers or strings; responses must echo the exact
/// value back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

/// JSON-RPC 2.0 request structure
///
/// A request without an `id` is a notification and gets no response.
///
/// # Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 123,
///     "method": "tools/list",
///     "params": {}
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MCPRequest {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,

    /// Request identifier; absent for notifications
    #[serde(default)]
    pub id: Option<RequestId>,

    /// Method name to invoke
    pub method: String,

    /// Method parameters as JSON value
    #[serde(default)]
    pub params: Value,
}

impl MCPRequest {
    /// Whether this message is a notification (no response expected)
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response structure
///
/// # Success Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 123,
///     "result": { "tools": [] }
/// }
/// ```
///
/// # Error Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 123,
///     "error": {
///         "code": -32601,
///         "message": "Method not found: foo"
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct MCPResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matches request)
    pub id: RequestId,

    /// Success result (mutually exclusive with error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error information (mutually exclusive with result)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

/// JSON-RPC 2.0 error structure
#[derive(Debug, Serialize, Clone)]
pub struct MCPError {
    /// Error code (standard JSON-RPC)
    pub code: i32,

    /// Human-readable error message
    pub message: String,
}

// JSON-RPC 2.0 standard error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

impl MCPError {
    /// Create a parse error
    pub fn parse_error(message: String) -> Self {
        Self {
            code: PARSE_ERROR,
            message,
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: String) -> Self {
        Self {
            code: INVALID_REQUEST,
            message,
        }
    }

    /// Create a method not found error
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", method),
        }
    }

    /// Create an invalid params error
    pub fn invalid_params(message: String) -> Self {
        Self {
            code: INVALID_PARAMS,
            message,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: String) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message,
        }
    }
}

impl MCPResponse {
    /// Create a success response
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: RequestId, error: MCPError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

// Include tests
#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
