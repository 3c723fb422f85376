//! Model Context Protocol (MCP) Integration
//!
//! JSON-RPC 2.0 protocol layer exposing Fastidious operations as MCP tools.
//! Transport-agnostic: the [`engine`] processes one message at a time and is
//! driven by the stdio loop in [`server`] or by the hosted HTTP transports in
//! the `fastidious-mcp-server` crate.
//!
//! # Usage
//!
//! MCP clients speak the standard method set:
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 1,
//!   "method": "tools/call",
//!   "params": {
//!     "name": "create_note",
//!     "arguments": {
//!       "title": "Standup notes",
//!       "content": "- demo went fine"
//!     }
//!   }
//! }
//! ```

pub mod engine;
pub mod handlers;
pub mod server;
pub mod types;

pub use engine::McpEngine;
pub use server::run_stdio_server;
pub use types::{MCPError, MCPRequest, MCPResponse, RequestId};
