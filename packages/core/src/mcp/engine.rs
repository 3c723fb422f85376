//! MCP Protocol Engine
//!
//! One engine per connected client. The engine owns that session's
//! authenticated Fastidious client and routes JSON-RPC methods to handlers;
//! transports feed it one message at a time and forward whatever it returns.
//!
//! Every failure is recovered here into a structured protocol error -
//! nothing a handler does can take the process down.

use crate::mcp::handlers::{initialize, tools};
use crate::mcp::types::{MCPError, MCPRequest, MCPResponse};
use crate::services::{ApiConfig, FastidiousClient};
use serde_json::json;
use tracing::{debug, warn};

/// Protocol engine bound to one session's credentials
///
/// The bearer token is fixed at construction and used for every remote call
/// issued within the session - tool calls never substitute a different one.
#[derive(Debug)]
pub struct McpEngine {
    client: FastidiousClient,
}

impl McpEngine {
    /// Create an engine for one session
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: FastidiousClient::new(config),
        }
    }

    /// The session's Fastidious client
    pub fn client(&self) -> &FastidiousClient {
        &self.client
    }

    /// Process one JSON-RPC message
    ///
    /// Returns `None` for notifications, `Some(response)` for requests -
    /// including error responses for unknown methods or failed dispatches.
    pub async fn handle_request(&self, request: MCPRequest) -> Option<MCPResponse> {
        if request.method.starts_with("notifications/") {
            debug!("MCP notification: {}", request.method);
            return None;
        }

        let Some(id) = request.id else {
            // A non-notification without an id still gets no response;
            // JSON-RPC has nowhere to send one
            warn!("Dropping id-less request for method '{}'", request.method);
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => initialize::handle_initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => tools::handle_tools_list(request.params),
            "tools/call" => tools::handle_tools_call(&self.client, request.params).await,
            _ => {
                warn!("Unknown MCP method: {}", request.method);
                Err(MCPError::method_not_found(&request.method))
            }
        };

        let response = match result {
            Ok(result) => {
                debug!("MCP request {} succeeded", id);
                MCPResponse::success(id, result)
            }
            Err(error) => {
                warn!(
                    "MCP request {} failed: {} (code: {})",
                    id, error.message, error.code
                );
                MCPResponse::error(id, error)
            }
        };

        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::{RequestId, METHOD_NOT_FOUND};
    use serde_json::Value;

    fn engine() -> McpEngine {
        McpEngine::new(ApiConfig::new("http://127.0.0.1:9", "fst_test"))
    }

    fn request(method: &str, params: Value) -> MCPRequest {
        MCPRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(RequestId::Number(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_ping_returns_empty_result() {
        let response = engine()
            .handle_request(request("ping", Value::Null))
            .await
            .unwrap();

        assert_eq!(response.result, Some(json!({})));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let response = engine()
            .handle_request(request("resources/list", Value::Null))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_initialized_notification_gets_no_response() {
        let notification = MCPRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: Value::Null,
        };

        assert!(engine().handle_request(notification).await.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_routes_to_catalog() {
        let response = engine()
            .handle_request(request("tools/list", json!({})))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert!(result["tools"].as_array().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_engine_keeps_session_token() {
        let engine = McpEngine::new(ApiConfig::new("http://localhost:3000", "fst_mine"));
        assert_eq!(engine.client().config().token, "fst_mine");
    }
}
