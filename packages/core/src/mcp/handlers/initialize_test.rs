//! Tests for the MCP initialize handler

use super::*;
use crate::mcp::types::{INVALID_PARAMS, INVALID_REQUEST};
use serde_json::json;

#[test]
fn test_initialize_echoes_supported_version() {
    let result = handle_initialize(json!({
        "protocolVersion": "2025-03-26",
        "clientInfo": {"name": "test-client", "version": "1.0.0"},
        "capabilities": {}
    }))
    .unwrap();

    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], "fastidious-mcp-server");
    assert!(result["capabilities"]["tools"].is_object());
}

#[test]
fn test_initialize_accepts_legacy_sse_version() {
    let result = handle_initialize(json!({
        "protocolVersion": "2024-11-05"
    }))
    .unwrap();

    assert_eq!(result["protocolVersion"], "2024-11-05");
}

#[test]
fn test_initialize_rejects_unknown_version() {
    let err = handle_initialize(json!({
        "protocolVersion": "2020-01-01"
    }))
    .unwrap_err();

    assert_eq!(err.code, INVALID_REQUEST);
    assert!(err.message.contains("Unsupported protocol version"));
}

#[test]
fn test_initialize_requires_protocol_version() {
    let err = handle_initialize(json!({})).unwrap_err();
    assert_eq!(err.code, INVALID_PARAMS);
}
