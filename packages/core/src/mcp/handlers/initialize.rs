//! MCP Initialize Handler
//!
//! Handles the MCP initialization handshake and capability discovery.
//! This is the first method called when a client connects to the server.

use crate::mcp::types::MCPError;
use serde_json::{json, Value};

/// Supported MCP protocol versions (for backward compatibility)
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &[
    "2025-06-18", // Latest spec
    "2025-03-26", // Streamable HTTP
    "2024-11-05", // HTTP+SSE (deprecated but supported)
];

/// Handle the MCP initialize request
///
/// Validates the client's protocol version and returns server info plus
/// capabilities. The tool schemas themselves are retrieved via tools/list.
///
/// # Errors
///
/// Returns an error if protocolVersion is missing or not a version this
/// server supports.
pub fn handle_initialize(params: Value) -> Result<Value, MCPError> {
    let client_version = params["protocolVersion"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing protocolVersion parameter".to_string()))?;

    // Version negotiation: echo the client's version back if we support it
    if !SUPPORTED_PROTOCOL_VERSIONS.contains(&client_version) {
        return Err(MCPError::invalid_request(format!(
            "Unsupported protocol version: {}. Server supports: {:?}",
            client_version, SUPPORTED_PROTOCOL_VERSIONS
        )));
    }

    Ok(json!({
        "protocolVersion": client_version,
        "serverInfo": {
            "name": "fastidious-mcp-server",
            "version": env!("CARGO_PKG_VERSION")
        },
        "capabilities": {
            "tools": {
                "listChanged": false  // Tool list is static, doesn't change after init
            }
        },
        "instructions": "Tools for managing notes and collections in Fastidious. Notes hold Markdown content; collections are containers that can nest inside each other and define custom field schemas for the notes they hold. Use move_note with a null targetParentId to move an item back to the root."
    }))
}

// Include tests
#[cfg(test)]
#[path = "initialize_test.rs"]
mod initialize_test;
