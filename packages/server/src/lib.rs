//! Fastidious MCP Hosted Server
//!
//! HTTP front end for the Fastidious MCP engine. Serves two transports
//! concurrently:
//!
//! - **Streamable sessions** (`POST /sse`): discrete JSON-RPC requests keyed
//!   by an `mcp-session-id` header, each session owning one protocol engine
//! - **Legacy event streams** (`GET /sse` + `POST /message`): a long-lived
//!   SSE connection with a side-channel POST for inbound messages
//!
//! Both are token-gated at the transport entry and share nothing beyond the
//! [`session::SessionRegistry`], which is owned by the process and injected
//! into the handlers.

pub mod config;
pub mod routes;
pub mod session;

pub use config::{default_port, fastidious_url};
pub use routes::{create_router, AppState};
pub use session::SessionRegistry;
