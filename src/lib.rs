//! presentations-mcp: MCP server exposing a JavaOne presentation archive
//! as queryable tools.
//!
//! A client sends a tool name plus a JSON arguments object over a
//! line-oriented JSON-RPC 2.0 channel; the server validates the arguments
//! against the tool's declared schema, dispatches to the bound handler and
//! returns a structured content result or a typed failure. Everything is
//! synchronous per request: one message in, one response out.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`mcp`] — JSON-RPC transport, message types and server lifecycle
//! - [`store`] — Read-only in-memory presentation archive
//! - [`tools`] — Tool registry, schemas and the tool implementations

pub mod config;
pub mod error;
pub mod mcp;
pub mod store;
pub mod tools;
