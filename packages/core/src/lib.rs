//! Fastidious MCP Core
//!
//! This crate maps Model Context Protocol tool invocations onto the Fastidious
//! notes/collections HTTP API. It contains everything transport-independent:
//! the wire models, the authenticated API client, the tool catalog with its
//! dispatcher, and the per-session protocol engine.
//!
//! # Architecture
//!
//! - **Pure protocol logic**: No HTTP-server dependencies in this crate
//! - **Per-session engine**: One [`McpEngine`] per connected client, bound to
//!   the bearer token supplied at connection time
//! - **Stateless dispatch**: Every remote call is parameterized by the
//!   session's (base URL, token) pair - no global credential state
//! - **stdio transport**: JSON-RPC 2.0 over stdin/stdout for local use;
//!   hosted transports live in the `fastidious-mcp-server` crate
//!
//! # Modules
//!
//! - [`models`] - Note, collection, and field-definition wire types
//! - [`services`] - Fastidious API client and error types
//! - [`mcp`] - JSON-RPC types, tool handlers, engine, and stdio server

pub mod mcp;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use mcp::engine::McpEngine;
pub use mcp::types::{MCPError, MCPRequest, MCPResponse};
pub use models::{FieldDefinition, FieldType, Note, NoteType, SortDirection, ViewMode};
pub use services::{ApiConfig, FastidiousClient, FastidiousError};
