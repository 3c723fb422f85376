//! Tests for MCP JSON-RPC types
//!
//! Serialization round-trips and id handling for requests, responses, and
//! errors.

use super::*;
use serde_json::json;

#[test]
fn test_request_with_numeric_id() {
    let request: MCPRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 42,
        "method": "tools/list",
        "params": {}
    }))
    .unwrap();

    assert_eq!(request.jsonrpc, "2.0");
    assert_eq!(request.id, Some(RequestId::Number(42)));
    assert_eq!(request.method, "tools/list");
    assert!(!request.is_notification());
}

#[test]
fn test_request_with_string_id() {
    let request: MCPRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": "req-7",
        "method": "ping"
    }))
    .unwrap();

    assert_eq!(request.id, Some(RequestId::String("req-7".to_string())));
    // Missing params defaults to null
    assert!(request.params.is_null());
}

#[test]
fn test_notification_has_no_id() {
    let request: MCPRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }))
    .unwrap();

    assert!(request.is_notification());
}

#[test]
fn test_success_response_omits_error() {
    let response = MCPResponse::success(RequestId::Number(1), json!({"ok": true}));
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["id"], 1);
    assert_eq!(value["result"]["ok"], true);
    assert!(value.get("error").is_none());
}

#[test]
fn test_error_response_omits_result() {
    let response = MCPResponse::error(
        RequestId::String("a".to_string()),
        MCPError::method_not_found("bogus"),
    );
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["id"], "a");
    assert_eq!(value["error"]["code"], METHOD_NOT_FOUND);
    assert_eq!(value["error"]["message"], "Method not found: bogus");
    assert!(value.get("result").is_none());
}

#[test]
fn test_error_code_constants() {
    assert_eq!(MCPError::parse_error("x".to_string()).code, PARSE_ERROR);
    assert_eq!(
        MCPError::invalid_request("x".to_string()).code,
        INVALID_REQUEST
    );
    assert_eq!(
        MCPError::invalid_params("x".to_string()).code,
        INVALID_PARAMS
    );
    assert_eq!(
        MCPError::internal_error("x".to_string()).code,
        INTERNAL_ERROR
    );
}

#[test]
fn test_request_id_display() {
    assert_eq!(RequestId::Number(5).to_string(), "5");
    assert_eq!(RequestId::String("abc".to_string()).to_string(), "abc");
}
