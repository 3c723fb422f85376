//! MCP stdio Server
//!
//! Async Tokio task that handles JSON-RPC 2.0 requests over stdin/stdout.
//! Diagnostic output goes to stderr via tracing, keeping stdout a clean
//! protocol channel.

use crate::mcp::engine::McpEngine;
use crate::mcp::types::{MCPError, MCPRequest, MCPResponse, RequestId};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, warn};

/// Run the MCP stdio server
///
/// Reads line-delimited JSON-RPC requests from stdin, processes them via the
/// engine, and writes responses to stdout. Runs until EOF on stdin.
///
/// # Returns
///
/// Returns Ok(()) when stdin is closed, or Err on fatal I/O errors.
pub async fn run_stdio_server(engine: McpEngine) -> anyhow::Result<()> {
    info!("🔌 MCP stdio server started");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let reader = BufReader::new(stdin);
    let mut writer = BufWriter::new(stdout);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("📥 MCP request: {}", line);

        let request: MCPRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                warn!("❌ Failed to parse JSON-RPC request: {}", e);
                let error_response = MCPResponse::error(
                    RequestId::Number(0), // Unknown id since parsing failed
                    MCPError::parse_error(format!("Invalid JSON: {}", e)),
                );
                write_response(&mut writer, &error_response).await?;
                continue;
            }
        };

        let method = request.method.clone();

        if let Some(response) = engine.handle_request(request).await {
            debug!(
                "📤 MCP response for method '{}' (id={})",
                method, response.id
            );
            write_response(&mut writer, &response).await?;
        }
    }

    info!("🔌 MCP stdio server stopped (stdin closed)");
    Ok(())
}

/// Write a JSON-RPC response line to stdout
async fn write_response(
    writer: &mut BufWriter<tokio::io::Stdout>,
    response: &MCPResponse,
) -> anyhow::Result<()> {
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
