//! Hosted Fastidious MCP Server
//!
//! Serves the streamable HTTP and legacy SSE transports on one port. Tokens
//! arrive per-request as a query parameter, so a single process multiplexes
//! any number of client sessions, each bound to its own credential.
//!
//! # Environment
//!
//! - `PORT` - listen port (default 3001)
//! - `FASTIDIOUS_URL` - base URL of the Fastidious API (default
//!   `http://localhost:3000`)

use fastidious_mcp_server::{config, create_router, AppState, SessionRegistry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastidious_mcp_server=info,fastidious_mcp_core=info".into()),
        )
        .init();

    let port = config::default_port();
    let base_url = config::fastidious_url();

    let state = AppState {
        registry: Arc::new(SessionRegistry::new()),
        base_url: base_url.clone(),
    };
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("🚀 Fastidious MCP server listening on http://{}", addr);
    info!("📡 Fastidious API at {}", base_url);
    info!("   Transports: POST /sse (streamable), GET /sse + POST /message (legacy)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
