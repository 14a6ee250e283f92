//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the presentation query tools to a client over JSON-RPC 2.0 on
//! a line-oriented transport.
//!
//! # Architecture
//!
//! ```text
//! transport ──▶ server (lifecycle) ──▶ tool registry ──▶ handlers
//!     ▲                                                      │
//!     └───────────── response envelope ◀────────────────────┘
//! ```
//!
//! - [`rpc`] — JSON-RPC 2.0 message types and parsing
//! - [`transport`] — newline-delimited JSON over async I/O
//! - [`server`] — lifecycle state machine and request dispatch
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod rpc;
pub mod server;
pub mod transport;

pub use rpc::{ErrorResponse, Message, Request, Response, PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::{LineTransport, StdioTransport};
