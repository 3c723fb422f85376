//! stdio-mode Fastidious MCP Server
//!
//! Local deployment shape: JSON-RPC over stdin/stdout for clients that spawn
//! the server as a child process. All diagnostics go to stderr so stdout
//! stays a clean protocol channel.
//!
//! # Environment
//!
//! - `FASTIDIOUS_TOKEN` - bearer token for the Fastidious API (required)
//! - `FASTIDIOUS_URL` - base URL of the Fastidious API (default
//!   `http://localhost:3000`)

use fastidious_mcp_core::mcp::run_stdio_server;
use fastidious_mcp_core::{ApiConfig, McpEngine};
use fastidious_mcp_server::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr only - stdout belongs to the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastidious_mcp_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let token = match std::env::var("FASTIDIOUS_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprintln!("❌ FASTIDIOUS_TOKEN environment variable is required");
            eprintln!("   Set it to your Fastidious API token (fst_...)");
            std::process::exit(1);
        }
    };
    let base_url = config::fastidious_url();

    let engine = McpEngine::new(ApiConfig::new(base_url, token));
    run_stdio_server(engine).await
}
