//! MCP Request Handlers
//!
//! Handler modules for the protocol methods and the Fastidious tool set,
//! plus the shared helpers that turn remote responses into protocol results.

pub mod collections;
pub mod initialize;
pub mod notes;
pub mod tools;

use crate::mcp::types::MCPError;
use crate::models::Note;
use crate::services::FastidiousError;
use serde_json::Value;

/// Classify a client-level failure against the operation being attempted
pub(crate) fn remote_error(operation: &str, err: FastidiousError) -> MCPError {
    MCPError::internal_error(format!("Failed to {}: {}", operation, err))
}

/// Reject non-2xx remote responses with the operation name and status text
pub(crate) fn expect_success(
    operation: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, MCPError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(MCPError::internal_error(format!(
            "Failed to {}: {}",
            operation, status
        )))
    }
}

/// Decode a remote response body as arbitrary JSON
pub(crate) async fn parse_json(
    operation: &str,
    response: reqwest::Response,
) -> Result<Value, MCPError> {
    response.json::<Value>().await.map_err(|e| {
        MCPError::internal_error(format!("Failed to {}: invalid response body: {}", operation, e))
    })
}

/// Decode a remote response body as a list of items
pub(crate) async fn parse_items(
    operation: &str,
    response: reqwest::Response,
) -> Result<Vec<Note>, MCPError> {
    response.json::<Vec<Note>>().await.map_err(|e| {
        MCPError::internal_error(format!("Failed to {}: invalid response body: {}", operation, e))
    })
}
